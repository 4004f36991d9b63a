#[cfg(test)]
use super::*;
use super::scanner::{bracket_balance, strip_comment};

fn texts(input: &str) -> Vec<String> {
    Lexer::new(input).map(|l| l.text).collect()
}

#[test]
fn test_strip_comment_outside_quotes() {
    assert_eq!(strip_comment(r#"key = "a#b" # real comment"#), r#"key = "a#b" "#);
    assert_eq!(strip_comment("# whole line"), "");
    assert_eq!(strip_comment("no comment"), "no comment");
}

#[test]
fn test_strip_comment_escaped_quote() {
    // the escaped quote keeps the scan inside the string
    let line = r##"key = "say \"#hi\"" # gone"##;
    assert_eq!(strip_comment(line), r##"key = "say \"#hi\"" "##);
}

#[test]
fn test_bracket_balance_ignores_strings() {
    assert_eq!(bracket_balance("[1, 2]"), 0);
    assert_eq!(bracket_balance("[ \"]\""), 1);
    assert_eq!(bracket_balance("[[1], ["), 2);
    assert_eq!(bracket_balance("]"), -1);
}

#[test]
fn test_blank_and_comment_lines_are_skipped() {
    let input = r#"
# heading comment

title = "Demo"   # trailing

   # indented comment
"#;
    assert_eq!(texts(input), vec![r#"title = "Demo""#]);
}

#[test]
fn test_line_numbers_are_one_based() {
    let lines: Vec<LogicalLine> = Lexer::new("\n[site]\n\nname = 1").collect();
    assert_eq!(lines[0].line, 2);
    assert_eq!(lines[1].line, 4);
}

#[test]
fn test_multiline_array_reassembly() {
    let input = "key = [\n 1,\n 2]\nnext = true";
    let lines: Vec<LogicalLine> = Lexer::new(input).collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "key = [1,2]");
    assert_eq!(lines[0].line, 1);
    assert!(!lines[0].unterminated);
    assert_eq!(lines[1].text, "next = true");
}

#[test]
fn test_multiline_array_strips_comments_per_line() {
    let input = r#"tags = [ # opening
  "a#1", # first
  "b",   # second
] # done"#;
    assert_eq!(texts(input), vec![r#"tags = ["a#1","b",]"#]);
}

#[test]
fn test_nested_multiline_array() {
    let input = "grid = [\n  [1, 2],\n  [3, 4]\n]";
    assert_eq!(texts(input), vec!["grid = [[1, 2],[3, 4]]"]);
}

#[test]
fn test_bracket_inside_string_does_not_continue() {
    let input = "label = \"[draft\"\nnext = 1";
    assert_eq!(texts(input), vec!["label = \"[draft\"", "next = 1"]);
}

#[test]
fn test_unterminated_array_consumes_rest() {
    let input = "key = [\n1,\n2";
    let lines: Vec<LogicalLine> = Lexer::new(input).collect();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "key = [1,2");
    assert!(lines[0].unterminated);
}

#[test]
fn test_headers_are_not_reassembled() {
    let input = "[[items]]\n[site]";
    assert_eq!(texts(input), vec!["[[items]]", "[site]"]);
}
