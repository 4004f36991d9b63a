// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::{Document, Value};
use crate::error::Diagnostic;
use crate::parser::{ParseOptions, Parser};
use crate::TomletError;

mod access;
mod conversion;
mod helpers;
mod validation;

/// A parsed configuration file plus typed, path-based access to it.
///
/// This sits on top of the parser: it owns the source text (for line-aware
/// error messages) and the document, and never mutates the document.
#[derive(Debug, Clone)]
pub struct TomletConfig {
    document: Document,
    diagnostics: Vec<Diagnostic>,
    raw_content: String,
    source: Option<PathBuf>,
}

impl TomletConfig {
    /// Parse a config from a string, leniently.
    pub fn from_str(content: &str) -> Result<Self, TomletError> {
        Self::with_options(content, ParseOptions::default())
    }

    /// Parse a config from a string with explicit [`ParseOptions`].
    ///
    /// Only fails when `options.strict` is set and the content needs recovery.
    pub fn with_options(content: &str, options: ParseOptions) -> Result<Self, TomletError> {
        let mut parser = Parser::with_options(content, options);
        let document = parser.parse_document()?;

        Ok(Self {
            document,
            diagnostics: parser.diagnostics().to_vec(),
            raw_content: content.to_string(),
            source: None,
        })
    }

    /// Load a config file. A leading `~/` is expanded to the home directory.
    ///
    /// # Example
    /// ```no_run
    /// # use tomlet::TomletConfig;
    /// let config = TomletConfig::from_file("~/.config/site/page.toml")?;
    /// let title: String = config.get("site.title")?;
    /// # Ok::<(), tomlet::TomletError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TomletError> {
        Self::from_file_with_options(path, ParseOptions::default())
    }

    pub fn from_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self, TomletError> {
        let path = expand_home(path.as_ref())?;
        tracing::debug!(path = %path.display(), "loading config");

        let content = fs::read_to_string(&path).map_err(|e| TomletError::File {
            message: format!("Failed to read file: {}", e),
            path: path.display().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        let mut config = Self::with_options(&content, options)?;
        config.source = Some(path);
        Ok(config)
    }

    /// Load from `primary`, or from `fallback` if `primary` cannot be read.
    ///
    /// Parse errors from the primary file (strict mode only) are not retried.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, TomletError> {
        match Self::from_file(&primary) {
            Ok(config) => Ok(config),
            Err(TomletError::File { .. }) => {
                tracing::debug!(
                    primary = %primary.as_ref().display(),
                    fallback = %fallback.as_ref().display(),
                    "primary config unreadable, trying fallback"
                );
                Self::from_file(&fallback).map_err(|e| match e {
                    TomletError::File { message, .. } => TomletError::File {
                        message: format!(
                            "Failed to load config from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the config files exists".into()),
                        code: Some(302),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Recoveries the parser made while reading this config.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The file this config was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn to_json(&self) -> Result<String, TomletError> {
        crate::export::export_document_to_json(&self.document)
    }

    pub fn into_value(self) -> Value {
        self.document.into()
    }
}

fn expand_home(path: &Path) -> Result<PathBuf, TomletError> {
    let Some(rest) = path.to_str().and_then(|p| p.strip_prefix("~/")) else {
        return Ok(path.to_path_buf());
    };
    let home = dirs::home_dir().ok_or_else(|| TomletError::File {
        message: "Could not determine home directory for ~ expansion".into(),
        path: path.display().to_string(),
        hint: Some("Set HOME or use an absolute path".into()),
        code: Some(300),
    })?;
    Ok(home.join(rest))
}
