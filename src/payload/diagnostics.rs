//! Payload errors with source-annotated diagnostics

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::core::error::MalformedInputError;

/// Anything that can go wrong turning a payload file into engine input
#[derive(Debug, Error, Diagnostic)]
pub enum PayloadError {
    #[error("cannot read {path}")]
    #[diagnostic(code(brickyard::payload::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] PayloadSyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Malformed(#[from] MalformedInputError),
}

/// A payload that is not valid JSON/YAML, pointing at the offending spot
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(brickyard::payload::syntax),
    help("the payload must be valid JSON (or YAML for .yaml/.yml files)")
)]
pub struct PayloadSyntaxError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,
}

impl PayloadSyntaxError {
    pub fn from_json_error(err: &serde_json::Error, content: &str, filename: &str) -> Self {
        let span = (err.line() > 0)
            .then(|| SourceSpan::from((offset_of(content, err.line(), err.column()), 1)));
        Self {
            message: format!("invalid JSON in {}: {}", filename, err),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }

    pub fn from_yaml_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let span = err
            .location()
            .map(|loc| SourceSpan::from((loc.index().min(content.len()), 1)));
        Self {
            message: format!("invalid YAML in {}: {}", filename, err),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }
}

/// Byte offset of a 1-based line/column position, clamped to the content
fn offset_of(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(content.len())
}
