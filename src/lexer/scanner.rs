/// Quote tracking shared by every left-to-right scan over a line.
///
/// Only double quotes open a string, and a quote directly after a backslash
/// does not toggle the state.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct QuoteState {
    in_string: bool,
    prev: Option<char>,
}

impl QuoteState {
    /// Advance over `c`. Returns `true` when `c` sits outside any string
    /// and is not itself a string delimiter.
    pub(crate) fn feed(&mut self, c: char) -> bool {
        let escaped = self.prev == Some('\\');
        self.prev = Some(c);
        if c == '"' && !escaped {
            self.in_string = !self.in_string;
            return false;
        }
        !self.in_string
    }
}

/// Cut a line at the first `#` that is not inside a string.
pub(crate) fn strip_comment(line: &str) -> &str {
    let mut quotes = QuoteState::default();
    for (i, c) in line.char_indices() {
        if quotes.feed(c) && c == '#' {
            return &line[..i];
        }
    }
    line
}

/// Net `[` minus `]` count, ignoring brackets inside strings.
pub(crate) fn bracket_balance(s: &str) -> i64 {
    let mut quotes = QuoteState::default();
    s.chars().fold(0, |depth, c| {
        if !quotes.feed(c) {
            return depth;
        }
        match c {
            '[' => depth + 1,
            ']' => depth - 1,
            _ => depth,
        }
    })
}
