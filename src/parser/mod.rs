use serde::{Deserialize, Serialize};

use crate::ast::{Document, Table};
use crate::error::{Diagnostic, DiagnosticKind};
use crate::lexer::Lexer;
use crate::TomletError;

mod context;
mod document;
pub mod value;

use context::NestingContext;

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Turn the first degradation into an error instead of recovering from it.
    pub strict: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    options: ParseOptions,
    root: Table,
    context: NestingContext,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(input),
            options,
            root: Table::new(),
            context: NestingContext::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Consume the remaining input and hand back the document.
    ///
    /// In the default lenient mode this always succeeds. With
    /// [`ParseOptions::strict`] the first recorded [`Diagnostic`] is returned
    /// as a [`TomletError::Syntax`] instead.
    pub fn parse_document(&mut self) -> Result<Document, TomletError> {
        document::parse_document(self);
        let doc = Document::from_table(std::mem::take(&mut self.root));

        if self.options.strict {
            if let Some(first) = self.diagnostics.first() {
                return Err(first.clone().into());
            }
        }
        Ok(doc)
    }

    /// Everything the parser recovered from so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn report(&mut self, line: usize, kind: DiagnosticKind, message: String) {
        tracing::debug!(line, code = kind.code(), "{}", message);
        self.diagnostics.push(Diagnostic::new(line, kind, message));
    }
}

#[cfg(test)]
mod tests;
