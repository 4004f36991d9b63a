use std::fmt;

use thiserror::Error;

/// The error type for the fallible surfaces of the crate: strict parsing,
/// typed config access, file loading and JSON export.
///
/// Lenient parsing never produces one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TomletError {
    #[error("[TOMLET] Syntax Error at {line}:{column}: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TOMLET] Type Error at line {line}: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    Type {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TOMLET] Validation Error at line {line}: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    Validation {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a lookup path does not exist in the document.
    #[error("[TOMLET] Path '{path}' not found{}{}", hint_suffix(.hint), code_suffix(.code))]
    NotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TOMLET] File Error '{path}': {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    File {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TOMLET] Export Error: {message}{}", code_suffix(.code))]
    Export { message: String, code: Option<u32> },
}

impl TomletError {
    /// The numeric code attached to the error, if any.
    pub fn code(&self) -> Option<u32> {
        match self {
            TomletError::Syntax { code, .. }
            | TomletError::Type { code, .. }
            | TomletError::Validation { code, .. }
            | TomletError::NotFound { code, .. }
            | TomletError::File { code, .. }
            | TomletError::Export { code, .. } => *code,
        }
    }

    pub fn file_error(message: String, path: String) -> Self {
        TomletError::File {
            message,
            path,
            hint: Some("Check file path and permissions".into()),
            code: Some(300),
        }
    }

    pub(crate) fn type_error(message: String, hint: &str, code: u32) -> Self {
        TomletError::Type {
            message,
            line: 0,
            hint: Some(hint.into()),
            code: Some(code),
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h))
}

fn code_suffix(code: &Option<u32>) -> String {
    code.map_or(String::new(), |c| format!(" Code: {}", c))
}

/// A degradation the lenient parser applied to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A multi-line array ran into the end of input.
    UnterminatedArray,
    /// A value opened a quote it never closed; kept as a raw string.
    UnterminatedString,
    /// A line that is neither a header nor an assignment.
    UnrecognizedLine,
    /// An assignment with nothing before the `=`.
    EmptyKey,
    /// A header such as `[ ]` or `[[.]]` naming no path.
    EmptyHeader,
    /// A header walked through a non-table value and replaced it.
    ReplacedWithTable,
    /// An array-of-tables header found a non-array value and replaced it.
    ReplacedWithArray,
    /// An inline table field without `=`; skipped.
    MalformedInlineField,
    /// An unquoted literal that is neither a boolean nor a number.
    BareString,
    /// A number literal too large for `f64`; kept as an infinite number.
    NumberOverflow,
}

impl DiagnosticKind {
    pub fn code(self) -> u32 {
        match self {
            DiagnosticKind::UnterminatedArray => 101,
            DiagnosticKind::UnterminatedString => 102,
            DiagnosticKind::UnrecognizedLine => 103,
            DiagnosticKind::EmptyKey => 104,
            DiagnosticKind::EmptyHeader => 105,
            DiagnosticKind::ReplacedWithTable => 106,
            DiagnosticKind::ReplacedWithArray => 107,
            DiagnosticKind::MalformedInlineField => 108,
            DiagnosticKind::BareString => 109,
            DiagnosticKind::NumberOverflow => 110,
        }
    }

    fn hint(self) -> &'static str {
        match self {
            DiagnosticKind::UnterminatedArray => "Close the array with ']'",
            DiagnosticKind::UnterminatedString => "Close the string with a matching quote",
            DiagnosticKind::UnrecognizedLine => "Expected [table], [[array]] or key = value",
            DiagnosticKind::EmptyKey => "Put a key name before '='",
            DiagnosticKind::EmptyHeader => "Give the header a dotted name",
            DiagnosticKind::ReplacedWithTable | DiagnosticKind::ReplacedWithArray => {
                "A header reuses a key that already holds a value"
            }
            DiagnosticKind::MalformedInlineField => "Inline table fields are written key = value",
            DiagnosticKind::BareString => "Quote string values",
            DiagnosticKind::NumberOverflow => "Use a smaller number, or quote it as a string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line the logical line started on.
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} (code {})", self.line, self.message, self.kind.code())
    }
}

impl From<Diagnostic> for TomletError {
    fn from(diagnostic: Diagnostic) -> Self {
        TomletError::Syntax {
            message: diagnostic.message,
            line: diagnostic.line,
            column: 0,
            hint: Some(diagnostic.kind.hint().into()),
            code: Some(diagnostic.kind.code()),
        }
    }
}
