#[cfg(test)]
use super::*;
use super::value::{parse_value, split_top_level};
use crate::ast::{Value, ValueKind};
use crate::{parse, parse_strict, parse_with_diagnostics};

fn num(doc: &Document, path: &str) -> f64 {
    doc.lookup(path)
        .and_then(Value::as_f64)
        .unwrap_or_else(|| panic!("expected number at {}", path))
}

fn string<'d>(doc: &'d Document, path: &str) -> &'d str {
    doc.lookup(path)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("expected string at {}", path))
}

#[test]
fn test_end_to_end_site_and_items() {
    let input = r#"
[site]
title = "Demo"
[[items]]
name = "a"
[[items]]
name = "b"
"#;
    let doc = parse(input);

    let mut site = Table::new();
    site.insert("title".into(), Value::String("Demo".into()));
    let item = |name: &str| {
        let mut t = Table::new();
        t.insert("name".into(), Value::String(name.into()));
        Value::Table(t)
    };
    let mut expected = Table::new();
    expected.insert("site".into(), Value::Table(site));
    expected.insert("items".into(), Value::Array(vec![item("a"), item("b")]));

    assert_eq!(doc.root(), &expected);
}

#[test]
fn test_string_assignment_is_unescaped() {
    let doc = parse(r#"quote = "say \"hi\"\n\tbye""#);
    assert_eq!(string(&doc, "quote"), "say \"hi\"\n\tbye");

    let doc = parse(r#"path = 'C:\new\table'"#);
    assert_eq!(string(&doc, "path"), r"C:\new\table");
}

#[test]
fn test_string_branch_is_idempotent() {
    for text in ["plain", "with, comma", "hash # inside", "[brackets]"] {
        let once = parse_value(&format!("\"{}\"", text));
        assert_eq!(once, Value::String(text.into()));
        let twice = parse_value(&format!("'{}'", once.as_str().unwrap_or_default()));
        assert_eq!(once, twice);
    }
}

#[test]
fn test_array_of_tables_keeps_source_order() {
    let doc = parse("[[a]]\nx=1\n[[a]]\nx=2");
    let items = doc.get("a").and_then(Value::as_array).expect("a is an array");

    assert_eq!(items.len(), 2);
    assert_eq!(num(&doc, "a.0.x"), 1.0);
    assert_eq!(num(&doc, "a.1.x"), 2.0);
}

#[test]
fn test_nested_table_is_per_array_item() {
    let doc = parse("[[a]]\n[a.b]\nx=1\n[[a]]\n[a.b]\nx=2");

    assert_eq!(num(&doc, "a.0.b.x"), 1.0);
    assert_eq!(num(&doc, "a.1.b.x"), 2.0);
    assert!(doc.get("b").is_none());
}

#[test]
fn test_nested_array_of_tables_under_array_item() {
    let doc = parse("[[a]]\n[[a.c]]\ny=1\n[[a.c]]\ny=2");

    let c = doc.lookup("a.0.c").and_then(Value::as_array).expect("a[0].c is an array");
    assert_eq!(c.len(), 2);
    assert_eq!(num(&doc, "a.0.c.0.y"), 1.0);
    assert_eq!(num(&doc, "a.0.c.1.y"), 2.0);
    assert_eq!(doc.get("a").and_then(Value::as_array).map(<[Value]>::len), Some(1));
}

#[test]
fn test_two_level_nesting_fixture() {
    let input = r#"
title = "Catalog"

[[products]]
name = "Lamp"
[products.details]
weight = 1.5
[[products.variants]]
color = "red"
[[products.variants]]
color = "blue"
[products.details.shipping]
days = 3

[[products]]
name = "Chair"
[[products.variants]]
color = "oak"
[products.details]
weight = 7

[footer]
text = "bye"
"#;
    let doc = parse(input);

    assert_eq!(string(&doc, "title"), "Catalog");

    assert_eq!(string(&doc, "products.0.name"), "Lamp");
    assert_eq!(num(&doc, "products.0.details.weight"), 1.5);
    assert_eq!(num(&doc, "products.0.details.shipping.days"), 3.0);
    assert_eq!(string(&doc, "products.0.variants.0.color"), "red");
    assert_eq!(string(&doc, "products.0.variants.1.color"), "blue");

    assert_eq!(string(&doc, "products.1.name"), "Chair");
    assert_eq!(string(&doc, "products.1.variants.0.color"), "oak");
    assert_eq!(num(&doc, "products.1.details.weight"), 7.0);
    assert!(doc.lookup("products.1.details.shipping").is_none());
    assert!(doc.lookup("products.1.variants.1").is_none());

    // a header outside the array goes back to the root
    assert_eq!(string(&doc, "footer.text"), "bye");
    assert!(doc.lookup("products.1.footer").is_none());
    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["title", "products", "footer"]);
}

#[test]
fn test_unrelated_header_clears_array_context() {
    let doc = parse("[[a]]\nx=1\n[other]\ny=2\n[a.b]\nz=3");

    // [a.b] now resolves from the root, replacing the array at `a` with a table
    assert_eq!(num(&doc, "other.y"), 2.0);
    assert_eq!(num(&doc, "a.b.z"), 3.0);
    assert_eq!(doc.get("a").map(Value::kind), Some(ValueKind::Table));
}

#[test]
fn test_new_root_array_replaces_context() {
    let doc = parse("[[a]]\n[[b]]\n[b.c]\nx=1\n[a.d]\ny=2");

    assert_eq!(num(&doc, "b.0.c.x"), 1.0);
    // `a` is no longer the active array, so [a.d] is absolute
    assert_eq!(num(&doc, "a.d.y"), 2.0);
}

#[test]
fn test_comment_inside_string_is_kept() {
    let doc = parse(r#"key = "a#b" # real comment"#);
    assert_eq!(string(&doc, "key"), "a#b");
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_multiline_array_matches_single_line() {
    let multi = parse("key = [\n 1,\n 2]");
    let single = parse("key = [1, 2]");

    assert_eq!(multi, single);
    assert_eq!(
        single.get("key"),
        Some(&Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]))
    );
}

#[test]
fn test_inline_table_top_level_split() {
    let value = parse_value(r#"{a = "x,y", b = [1,2]}"#);

    assert_eq!(value.get("a"), Some(&Value::String("x,y".into())));
    let b = value.get("b").and_then(Value::as_array).expect("b is an array");
    assert_eq!(b.len(), 2);
}

#[test]
fn test_split_top_level() {
    assert_eq!(split_top_level(r#"1, "a,b", [2, 3], {x = 1, y = 2}"#), vec![
        "1",
        r#" "a,b""#,
        " [2, 3]",
        " {x = 1, y = 2}"
    ]);
    assert_eq!(split_top_level("single"), vec!["single"]);
}

#[test]
fn test_value_priority_order() {
    assert_eq!(parse_value(""), Value::Null);
    assert_eq!(parse_value("[]"), Value::Array(vec![]));
    assert_eq!(parse_value("{ }"), Value::Table(Table::new()));
    assert_eq!(parse_value("true"), Value::Bool(true));
    assert_eq!(parse_value("false"), Value::Bool(false));
    assert_eq!(parse_value("-3.5"), Value::Number(-3.5));
    assert_eq!(parse_value("+2"), Value::Number(2.0));
    assert_eq!(parse_value(".5"), Value::Number(0.5));
    assert_eq!(parse_value("1e3"), Value::Number(1000.0));
    assert_eq!(parse_value("\"true\""), Value::String("true".into()));
    assert_eq!(parse_value("inf"), Value::String("inf".into()));
    assert_eq!(parse_value("hello world"), Value::String("hello world".into()));
}

#[test]
fn test_mixed_and_nested_arrays() {
    let value = parse_value(r#"[1, "two", true, [3, 4], {k = "v"},]"#);
    let items = value.as_array().expect("array");

    assert_eq!(items.len(), 5);
    assert_eq!(items[1], Value::String("two".into()));
    assert_eq!(items[3].get_index(1), Some(&Value::Number(4.0)));
    assert_eq!(items[4].get("k"), Some(&Value::String("v".into())));
}

#[test]
fn test_triple_quoted_strings() {
    assert_eq!(parse_value(r"'''C:\raw'''"), Value::String(r"C:\raw".into()));
    assert_eq!(parse_value(r#""""line\none""""#), Value::String("line\none".into()));
}

#[test]
fn test_only_three_escapes() {
    assert_eq!(parse_value(r#""a\rb\\c""#), Value::String(r"a\rb\\c".into()));
}

#[test]
fn test_empty_value_is_null() {
    let doc = parse("key =");
    assert_eq!(doc.get("key"), Some(&Value::Null));
}

#[test]
fn test_last_assignment_wins() {
    let doc = parse("a = 1\nb = 2\na = 3");
    assert_eq!(num(&doc, "a"), 3.0);
    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_header_through_scalar_replaces_it() {
    let (doc, diagnostics) = parse_with_diagnostics("[a]\nb = 1\n[a.b]\nc = 2");

    assert_eq!(num(&doc, "a.b.c"), 2.0);
    assert!(diagnostics.iter().any(|d| d.kind == DiagnosticKind::ReplacedWithTable));
}

#[test]
fn test_array_header_over_scalar_replaces_it() {
    let (doc, diagnostics) = parse_with_diagnostics("items = 3\n[[items]]\nx = 1");

    assert_eq!(num(&doc, "items.0.x"), 1.0);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::ReplacedWithArray);
    assert_eq!(diagnostics[0].line, 2);
}

#[test]
fn test_dotted_and_quoted_header_segments() {
    let doc = parse("[ server . \"http\" ]\nport = 80");
    assert_eq!(num(&doc, "server.http.port"), 80.0);
}

#[test]
fn test_quoted_header_segment_keeps_its_dots() {
    let doc = parse("[\"a.b\"]\nx = 1\n[[\"v1.2\".notes]]\ntext = \"n\"\n[\"v1.2\".notes.meta]\nok = true");

    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a.b", "v1.2"]);
    assert_eq!(doc.get("a.b").and_then(|t| t.get("x")), Some(&Value::Number(1.0)));

    let note = doc.get("v1.2").and_then(|t| t.get("notes")).and_then(|n| n.get_index(0));
    assert_eq!(note.and_then(|n| n.lookup("meta.ok")), Some(&Value::Bool(true)));
}

#[test]
fn test_empty_path_lookup_matches_nothing() {
    let doc = parse("[a]\nx = 1");
    assert_eq!(doc.lookup(""), None);

    let table = doc.get("a").expect("table a");
    assert_eq!(table.lookup(""), None);
    assert_eq!(table.lookup("x"), Some(&Value::Number(1.0)));
}

#[test]
fn test_overflowing_number_is_reported() {
    let (doc, diagnostics) = parse_with_diagnostics("ok = 1e300\nbig = 1e999");

    assert_eq!(doc.get("big"), Some(&Value::Number(f64::INFINITY)));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::NumberOverflow);
    assert_eq!(diagnostics[0].line, 2);
    assert_eq!(diagnostics[0].kind.code(), 110);
}

#[test]
fn test_malformed_input_never_fails() {
    for input in ["[[", "key = \"unterminated", "=", "= 5", "[]", "[[.]]", "just words", "key = [1, 2"] {
        let (doc, diagnostics) = parse_with_diagnostics(input);
        assert!(!diagnostics.is_empty(), "expected a diagnostic for {:?}", input);
        let _ = doc.len();
    }

    let doc = parse("key = \"unterminated");
    assert_eq!(string(&doc, "key"), "\"unterminated");

    let doc = parse("key = [1, 2");
    assert_eq!(doc.lookup("key.1"), Some(&Value::Number(2.0)));
}

#[test]
fn test_diagnostic_kinds_and_lines() {
    let input = "ok = 1\n[[\n= 2\nname = bare\ntable = {a}\n[ ]";
    let (_, diagnostics) = parse_with_diagnostics(input);
    let kinds: Vec<(usize, DiagnosticKind)> = diagnostics.iter().map(|d| (d.line, d.kind)).collect();

    assert_eq!(kinds, vec![
        (2, DiagnosticKind::UnrecognizedLine),
        (3, DiagnosticKind::EmptyKey),
        (4, DiagnosticKind::BareString),
        (5, DiagnosticKind::MalformedInlineField),
        (6, DiagnosticKind::EmptyHeader),
    ]);
}

#[test]
fn test_strict_mode_reports_first_problem() {
    let err = parse_strict("a = 1\nb = nope\n[[").expect_err("strict parse should fail");
    match err {
        TomletError::Syntax { line, code, .. } => {
            assert_eq!(line, 2);
            assert_eq!(code, Some(109));
        }
        other => panic!("unexpected error {:?}", other),
    }

    let doc = parse_strict("a = 1\n[t]\nb = \"ok\"").expect("clean input parses strictly");
    assert_eq!(string(&doc, "t.b"), "ok");
}

#[test]
fn test_parser_struct_exposes_diagnostics() {
    let mut parser = Parser::new("x = [1,\n2");
    let doc = parser.parse_document().expect("lenient parse");

    assert_eq!(doc.lookup("x.1"), Some(&Value::Number(2.0)));
    assert_eq!(parser.diagnostics().len(), 1);
    assert_eq!(parser.diagnostics()[0].kind, DiagnosticKind::UnterminatedArray);
}
