use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "error"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Info => write!(f, "info"),
        }
    }
}

/// What a diagnostic is about. Each kind has a stable kebab-case code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A document could not be read as a token export
    ParseError,
    /// A single variable inside a document was unusable
    SkippedVariable,
    /// A color component was outside [0, 1]
    InvalidColor,
    /// A line of the custom colors text could not be understood
    InvalidCustomColor,
    /// A token was only present in one mode of its axis
    MissingModeVariant,
    /// A multi-mode token resolved to the same primitive on every mode
    RedundantToken,
    /// A multi-mode token resolved to the same numeric value on every mode
    RedundantTokenNumeric,
    /// A token mixed appearance and viewport modes
    MixedAxisModes,
    /// A token had differing values under mode keys mapped to no known mode
    AmbiguousModes,
    /// A token had no resolvable value on any mode
    MalformedToken,
    /// A reference pointed at a primitive or token that does not exist
    UnresolvedAlias,
    /// A token would have redefined a published primitive
    TokenShadowsPrimitive,
    /// A viewport token whose values cannot be interpolated
    NonInterpolableToken,
}

impl DiagnosticKind {
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::ParseError => "parse-error",
            DiagnosticKind::SkippedVariable => "skipped-variable",
            DiagnosticKind::InvalidColor => "invalid-color",
            DiagnosticKind::InvalidCustomColor => "invalid-custom-color",
            DiagnosticKind::MissingModeVariant => "missing-mode-variant",
            DiagnosticKind::RedundantToken => "redundant-token",
            DiagnosticKind::RedundantTokenNumeric => "redundant-token-numeric",
            DiagnosticKind::MixedAxisModes => "mixed-axis-modes",
            DiagnosticKind::AmbiguousModes => "ambiguous-modes",
            DiagnosticKind::MalformedToken => "malformed-token",
            DiagnosticKind::UnresolvedAlias => "unresolved-alias",
            DiagnosticKind::TokenShadowsPrimitive => "token-shadows-primitive",
            DiagnosticKind::NonInterpolableToken => "non-interpolable-token",
        }
    }

    pub fn default_level(&self) -> DiagnosticLevel {
        match self {
            DiagnosticKind::ParseError => DiagnosticLevel::Error,
            DiagnosticKind::RedundantToken | DiagnosticKind::RedundantTokenNumeric => {
                DiagnosticLevel::Info
            }
            _ => DiagnosticLevel::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A non-fatal problem (or note) collected during a compilation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level
    pub level: DiagnosticLevel,

    /// What kind of problem this is
    pub kind: DiagnosticKind,

    /// The document, variable or custom property this is about
    pub subject: Option<String>,

    /// Human-readable message
    pub message: String,

    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            level: kind.default_level(),
            kind,
            subject: None,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.level, self.kind)?;
        if let Some(subject) = &self.subject {
            write!(f, " {}:", subject)?;
        }
        write!(f, " {}", self.message)
    }
}
