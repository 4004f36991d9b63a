// Author: Dustin Pilgrim
// License: MIT

use std::iter::Enumerate;
use std::str::Lines;

pub(crate) mod scanner;

use scanner::{bracket_balance, strip_comment};

/// One comment-free, fully reassembled unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based source line the logical line starts on.
    pub line: usize,
    pub text: String,
    /// Set when a multi-line array ran out of input before closing.
    pub unterminated: bool,
}

/// Turns raw source text into [`LogicalLine`]s.
///
/// Blank and comment-only lines are skipped. An assignment whose value opens
/// more `[` than it closes keeps pulling source lines, comment-stripped and
/// trimmed, onto the end of its text until the brackets balance.
pub struct Lexer<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            lines: input.lines().enumerate(),
        }
    }

    fn complete(&mut self, line: usize, text: &str) -> LogicalLine {
        let mut logical = LogicalLine {
            line,
            text: text.to_string(),
            unterminated: false,
        };

        // headers never continue
        if text.starts_with('[') {
            return logical;
        }
        let Some((_, value)) = text.split_once('=') else {
            return logical;
        };
        let value = value.trim();
        if !value.starts_with('[') {
            return logical;
        }

        let mut depth = bracket_balance(value);
        while depth > 0 {
            let Some((_, raw)) = self.lines.next() else {
                logical.unterminated = true;
                break;
            };
            let more = strip_comment(raw).trim();
            depth += bracket_balance(more);
            logical.text.push_str(more);
        }
        logical
    }
}

impl Iterator for Lexer<'_> {
    type Item = LogicalLine;

    fn next(&mut self) -> Option<LogicalLine> {
        loop {
            let (index, raw) = self.lines.next()?;
            let text = strip_comment(raw).trim();
            if text.is_empty() {
                continue;
            }
            return Some(self.complete(index + 1, text));
        }
    }
}

#[cfg(test)]
mod tests;
