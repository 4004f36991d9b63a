use once_cell::sync::Lazy;
use regex::Regex;

use super::context::{push_item, table_at, Replaced, Step, TablePath};
use super::value::{parse_value_reporting, unquote_key};
use super::*;
use crate::lexer::scanner::QuoteState;
use crate::lexer::LogicalLine;

static ARRAY_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\[([^\[\]]*)\]\]$").expect("array header pattern is valid"));
static TABLE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\[\]]*)\]$").expect("table header pattern is valid"));

pub(super) fn parse_document(parser: &mut Parser) {
    while let Some(line) = parser.lexer.next() {
        route_line(parser, line);
    }
}

fn route_line(parser: &mut Parser, logical: LogicalLine) {
    let line = logical.line;
    if logical.unterminated {
        parser.report(
            line,
            DiagnosticKind::UnterminatedArray,
            "array is never closed; kept what was read".into(),
        );
    }

    let text = logical.text.as_str();
    if let Some(caps) = ARRAY_HEADER.captures(text) {
        array_header(parser, line, &caps[1]);
    } else if let Some(caps) = TABLE_HEADER.captures(text) {
        table_header(parser, line, &caps[1]);
    } else if let Some((key, value)) = text.split_once('=') {
        assignment(parser, line, key, value);
    } else {
        parser.report(
            line,
            DiagnosticKind::UnrecognizedLine,
            format!("ignoring unrecognized line '{}'", text),
        );
    }
}

/// Split a header name into trimmed, unquoted segments, dropping empty ones.
/// Dots inside a double-quoted segment do not split it.
fn header_segments(raw: &str) -> Vec<String> {
    let mut quotes = QuoteState::default();
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        if quotes.feed(c) && c == '.' {
            segments.push(&raw[start..i]);
            start = i + 1;
        }
    }
    segments.push(&raw[start..]);

    segments
        .into_iter()
        .map(unquote_key)
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn array_header(parser: &mut Parser, line: usize, raw: &str) {
    let segments = header_segments(raw);
    if segments.is_empty() {
        parser.report(line, DiagnosticKind::EmptyHeader, format!("empty header [[{}]]", raw));
        return;
    }
    let name = segments.join(".");
    let mut replaced = Replaced::default();

    if let Some(suffix) = parser.context.relative_suffix(&segments) {
        tracing::trace!(line, header = %name, "array header inside current array item");
        let base = parser.context.item_root();
        parser.context.current = append_item(&mut parser.root, base, suffix, &mut replaced);
    } else {
        tracing::trace!(line, header = %name, "array header from root");
        let item = append_item(&mut parser.root, TablePath::new(), &segments, &mut replaced);
        parser.context.enter_array(&segments, item);
    }
    report_replaced(parser, line, replaced);
}

fn table_header(parser: &mut Parser, line: usize, raw: &str) {
    let segments = header_segments(raw);
    if segments.is_empty() {
        parser.report(line, DiagnosticKind::EmptyHeader, format!("empty header [{}]", raw));
        return;
    }
    let name = segments.join(".");
    let mut replaced = Replaced::default();

    if let Some(suffix) = parser.context.relative_suffix(&segments) {
        tracing::trace!(line, header = %name, "table header inside current array item");
        let base = parser.context.item_root();
        parser.context.current = descend(&mut parser.root, base, suffix, &mut replaced);
    } else {
        tracing::trace!(line, header = %name, "table header from root");
        parser.context.clear_array();
        parser.context.current = descend(&mut parser.root, TablePath::new(), &segments, &mut replaced);
    }
    report_replaced(parser, line, replaced);
}

fn assignment(parser: &mut Parser, line: usize, key: &str, literal: &str) {
    let key = unquote_key(key);
    if key.is_empty() {
        parser.report(
            line,
            DiagnosticKind::EmptyKey,
            "assignment without a key is skipped".into(),
        );
        return;
    }

    let mut issues = Vec::new();
    let value = parse_value_reporting(literal, &mut issues);
    for (kind, message) in issues {
        parser.report(line, kind, format!("{}: {}", key, message));
    }

    let mut replaced = Replaced::default();
    table_at(&mut parser.root, &parser.context.current, &mut replaced).insert(key, value);
}

/// Resolve `segments` below `base` as nested tables and return the path to the last one.
fn descend(root: &mut Table, base: TablePath, segments: &[String], replaced: &mut Replaced) -> TablePath {
    let mut path = base;
    path.extend(segments.iter().cloned().map(Step::Key));
    table_at(root, &path, replaced);
    path
}

/// Resolve all but the last segment as tables below `base`, then append a new
/// table to the array named by the last segment. Returns the path to that table.
fn append_item(root: &mut Table, base: TablePath, segments: &[String], replaced: &mut Replaced) -> TablePath {
    let Some((last, parents)) = segments.split_last() else {
        return base;
    };
    let mut path = base;
    path.extend(parents.iter().cloned().map(Step::Key));
    let index = push_item(table_at(root, &path, replaced), last, replaced);
    path.push(Step::Item(last.clone(), index));
    path
}

fn report_replaced(parser: &mut Parser, line: usize, replaced: Replaced) {
    for key in replaced.tables {
        parser.report(
            line,
            DiagnosticKind::ReplacedWithTable,
            format!("value at '{}' replaced by a table", key),
        );
    }
    for key in replaced.arrays {
        parser.report(
            line,
            DiagnosticKind::ReplacedWithArray,
            format!("value at '{}' replaced by an array of tables", key),
        );
    }
}
