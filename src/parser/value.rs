use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Table, Value};
use crate::error::DiagnosticKind;
use crate::lexer::scanner::QuoteState;

static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("number pattern is valid")
});

/// Degradations noticed while parsing a single literal.
pub(crate) type Issues = Vec<(DiagnosticKind, String)>;

/// Parse a value literal into a [`Value`].
///
/// Never fails: anything unrecognised comes back as its raw text.
pub fn parse_value(literal: &str) -> Value {
    parse_value_reporting(literal, &mut Vec::new())
}

pub(crate) fn parse_value_reporting(literal: &str, issues: &mut Issues) -> Value {
    let s = literal.trim();

    if s.is_empty() {
        return Value::Null;
    }
    if let Some(rest) = s.strip_prefix('[') {
        return parse_array(rest, issues);
    }
    if let Some(rest) = s.strip_prefix('{') {
        return parse_inline_table(rest, issues);
    }
    if let Some(text) = parse_string(s) {
        return Value::String(text);
    }
    match s {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if NUMBER.is_match(s) {
        if let Ok(n) = s.parse::<f64>() {
            if !n.is_finite() {
                issues.push((DiagnosticKind::NumberOverflow, format!("number {} overflows", s)));
            }
            return Value::Number(n);
        }
    }

    if s.starts_with('"') || s.starts_with('\'') {
        issues.push((
            DiagnosticKind::UnterminatedString,
            format!("unterminated string {}", s),
        ));
    } else {
        issues.push((
            DiagnosticKind::BareString,
            format!("unquoted value '{}' kept as a string", s),
        ));
    }
    Value::String(s.to_string())
}

fn parse_array(rest: &str, issues: &mut Issues) -> Value {
    let inner = rest.strip_suffix(']').unwrap_or(rest).trim();
    if inner.is_empty() {
        return Value::Array(Vec::new());
    }

    let items = split_top_level(inner)
        .into_iter()
        .map(str::trim)
        .filter(|elem| !elem.is_empty())
        .map(|elem| parse_value_reporting(elem, issues))
        .collect();
    Value::Array(items)
}

fn parse_inline_table(rest: &str, issues: &mut Issues) -> Value {
    let inner = rest.strip_suffix('}').unwrap_or(rest).trim();
    let mut table = Table::new();
    if inner.is_empty() {
        return Value::Table(table);
    }

    for field in split_top_level(inner) {
        let field = field.trim();
        if field.is_empty() {
            continue;
        }
        let Some((key, value)) = field.split_once('=') else {
            issues.push((
                DiagnosticKind::MalformedInlineField,
                format!("inline table field '{}' has no '='", field),
            ));
            continue;
        };
        table.insert(unquote_key(key), parse_value_reporting(value, issues));
    }
    Value::Table(table)
}

/// Recognise a quoted string and return its contents.
///
/// Single-line `"""…"""` and `'''…'''` are folded into the ordinary forms.
fn parse_string(s: &str) -> Option<String> {
    if s.len() >= 6 {
        if let Some(inner) = s.strip_prefix("'''").and_then(|r| r.strip_suffix("'''")) {
            return Some(inner.to_string());
        }
        if let Some(inner) = s.strip_prefix("\"\"\"").and_then(|r| r.strip_suffix("\"\"\"")) {
            return Some(unescape(inner));
        }
    }
    if s.len() < 2 {
        return None;
    }
    if let Some(inner) = s.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        return Some(unescape(inner));
    }
    s.strip_prefix('\'')
        .and_then(|r| r.strip_suffix('\''))
        .map(str::to_string)
}

/// Resolve `\"`, `\n` and `\t`. Any other backslash pair is kept verbatim.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            _ => {
                out.push('\\');
                continue;
            }
        }
        chars.next();
    }
    out
}

/// Trim a key and drop one layer of matching quotes around it.
pub(crate) fn unquote_key(key: &str) -> String {
    let key = key.trim();
    if key.len() >= 2 {
        for quote in ['"', '\''] {
            if let Some(inner) = key.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
                return inner.to_string();
            }
        }
    }
    key.to_string()
}

/// Split on commas that are outside strings, `[...]` and `{...}`.
pub fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quotes = QuoteState::default();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if !quotes.feed(c) {
            continue;
        }
        match c {
            '[' | '{' => depth += 1,
            ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}
