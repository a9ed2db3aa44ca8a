//! Error types for token documents and reference sheets

use crate::ast::Span;
use thiserror::Error;
use tokensmith_common::{Diagnostic, DiagnosticKind};

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{document} is not valid JSON: {message}")]
    InvalidJson { document: String, message: String },

    #[error("{document} is missing the required field '{field}'")]
    MissingField { document: String, field: String },

    #[error("{document} has an unexpected shape: {message}")]
    InvalidShape { document: String, message: String },

    #[error("Unexpected token at {span:?}: expected {expected}, found {found}")]
    UnexpectedToken {
        span: Span,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Invalid value at {span:?}: {message}")]
    InvalidValue { span: Span, message: String },

    #[error("Lexer error at {span:?}")]
    LexError { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidValue { span, .. }
            | ParseError::LexError { span } => Some(*span),
            _ => None,
        }
    }

    /// Report this error as a run diagnostic about `document`
    pub fn to_diagnostic(&self, document: &str) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::ParseError, self.to_string()).with_subject(document)
    }
}

/// Pretty-print errors with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub mod pretty {
    use super::ParseError;
    use ariadne::{Color, Label, Report, ReportKind, Source};

    pub fn format_error(error: &ParseError, filename: &str, source: &str) -> String {
        let span = error.span().unwrap_or(crate::ast::Span {
            start: source.len().saturating_sub(1),
            end: source.len(),
        });

        let label = match error {
            ParseError::UnexpectedToken { expected, .. } | ParseError::UnexpectedEof { expected } => {
                format!("expected {}", expected)
            }
            ParseError::InvalidValue { message, .. } => message.clone(),
            ParseError::LexError { .. } => "unrecognized input".to_string(),
            other => other.to_string(),
        };

        let report = Report::build(ReportKind::Error, filename, span.start)
            .with_message(error.to_string())
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_color(Color::Red)
                    .with_message(label),
            )
            .finish();

        let mut output = Vec::new();
        if report
            .write((filename, Source::from(source)), &mut output)
            .is_err()
        {
            return error.to_string();
        }
        String::from_utf8(output).unwrap_or_else(|_| error.to_string())
    }
}
