use crate::fluid::FluidWindow;
use crate::primitives::PrimitiveSet;
use crate::tokens::{Token, TokenSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tokensmith_common::{Diagnostic, DiagnosticLevel};
use tokensmith_parser::CssValue;
use tracing::{debug, warn};

/// Which side(s) of the appearance axis the output supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Both,
}

impl ThemeMode {
    /// Value of the `color-scheme` declaration
    pub fn color_scheme(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Both => "light dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::Both => write!(f, "both"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "both" => Ok(ThemeMode::Both),
            other => Err(format!(
                "Unknown theme mode '{}': expected light, dark or both",
                other
            )),
        }
    }
}

/// Per-call configuration of a compilation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    pub theme_mode: ThemeMode,
    /// Keep `clamp()` on typography tokens
    pub typo_responsive: bool,
    /// Keep `clamp()` on spacing tokens
    pub spacing_responsive: bool,
    /// Create missing primitives for token endpoints
    pub synthesize_project_primitives: bool,
    pub custom_colors_text: String,
    pub fluid: FluidWindow,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Both,
            typo_responsive: true,
            spacing_responsive: true,
            synthesize_project_primitives: true,
            custom_colors_text: String::new(),
            fluid: FluidWindow::default(),
        }
    }
}

/// State of one compilation run. Created at the start of
/// [`Evaluator::evaluate`](crate::Evaluator::evaluate) and consumed by it;
/// nothing survives between runs.
pub struct CompileContext {
    pub options: CompileOptions,
    pub primitives: PrimitiveSet,
    pub tokens: TokenSet,
    /// Global tokens waiting until project tokens have claimed their names
    pub(crate) staged_globals: Vec<Token>,
    /// Literal values to fall back on when an imported alias dangles
    pub(crate) alias_fallbacks: HashMap<String, CssValue>,
    /// Variable id → emitted custom property name
    pub(crate) ids: HashMap<String, String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileContext {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            primitives: PrimitiveSet::new(),
            tokens: TokenSet::new(),
            staged_globals: Vec::new(),
            alias_fallbacks: HashMap::new(),
            ids: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Info => debug!(kind = %diagnostic.kind, "{}", diagnostic),
            _ => warn!(kind = %diagnostic.kind, "{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn stage_global(&mut self, token: Token) {
        self.staged_globals.push(token);
    }

    pub(crate) fn is_token_name(&self, name: &str) -> bool {
        self.tokens.contains(name) || self.staged_globals.iter().any(|t| t.name == name)
    }
}
