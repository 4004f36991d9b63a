//! A lenient parser for a pragmatic subset of TOML.
//!
//! Parsing never fails: malformed input degrades to the best structure that
//! can be recovered, and every such recovery is recorded as a
//! [`Diagnostic`]. Headers nested under an array-of-tables (`[[items]]`
//! followed by `[items.meta]` or `[[items.tags]]`) attach to the most recent
//! element of that array rather than to the document root.
//!
//! ```
//! let doc = tomlet::parse("[[items]]\nname = \"a\"\n[items.meta]\nsize = 2\n");
//! assert_eq!(doc.lookup("items.0.meta.size").and_then(|v| v.as_f64()), Some(2.0));
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;

pub use ast::{Document, Table, Value, ValueKind};
pub use config::TomletConfig;
pub use error::{Diagnostic, DiagnosticKind, TomletError};
pub use parser::{ParseOptions, Parser};

/// Parse `text` leniently. Always returns a document.
pub fn parse(text: &str) -> Document {
    parse_with_diagnostics(text).0
}

/// Parse `text` leniently and also return every recovery the parser made.
pub fn parse_with_diagnostics(text: &str) -> (Document, Vec<Diagnostic>) {
    let mut parser = Parser::new(text);
    // lenient parsing has no error path
    let doc = parser.parse_document().unwrap_or_default();
    (doc, parser.diagnostics().to_vec())
}

pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Document, TomletError> {
    Parser::with_options(text, options).parse_document()
}

/// Parse `text`, failing on the first construct the lenient parser would have to recover from.
pub fn parse_strict(text: &str) -> Result<Document, TomletError> {
    parse_with_options(text, ParseOptions::strict())
}
