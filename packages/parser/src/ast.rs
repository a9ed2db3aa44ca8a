use crate::category::Category;
use crate::mode::ModeId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use tokensmith_common::Diagnostic;

/// Byte range in a source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// An sRGB color with components in `[0, 1]` as exported
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl RawColor {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => return None,
        };
        let channel = |i: usize| -> Option<f64> {
            let byte = u8::from_str_radix(&expanded[i..i + 2], 16).ok()?;
            Some(byte as f64 / 255.0)
        };
        let a = if expanded.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

/// A literal value carried by a variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum RawValue {
    Color(RawColor),
    Number(f64),
    Text(String),
}

/// One mode's value: a literal, an alias, or both.
///
/// Documents never produce a value with none of the three set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedValue {
    pub raw: Option<RawValue>,
    /// Path of the aliased variable, e.g. `color/gray/900`
    pub alias_name: Option<String>,
    /// Id of the aliased variable
    pub variable_id: Option<String>,
}

impl ResolvedValue {
    pub fn raw(raw: RawValue) -> Self {
        Self {
            raw: Some(raw),
            ..Default::default()
        }
    }

    pub fn alias(alias_name: impl Into<String>) -> Self {
        Self {
            alias_name: Some(alias_name.into()),
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias_name: impl Into<String>) -> Self {
        self.alias_name = Some(alias_name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_none() && self.alias_name.is_none() && self.variable_id.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Color,
    Number,
    Text,
}

/// Which export style a variable came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableForm {
    /// `valuesByMode`: leaf values, becomes a primitive
    Primitive,
    /// `resolvedValuesByMode`: alias-aware, becomes a token
    Semantic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeEntry {
    /// `None` when the mode key could not be mapped to a known mode
    pub mode: Option<ModeId>,
    pub value: ResolvedValue,
}

/// A variable after ingestion: category and slug are decided once here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedVariable {
    pub id: Option<String>,
    /// Original slash-delimited path
    pub path: String,
    pub category: Category,
    pub slug: String,
    /// Whether the path itself named the category
    pub named: bool,
    pub kind: VariableKind,
    pub form: VariableForm,
    pub values: Vec<ModeEntry>,
}

impl NormalizedVariable {
    pub fn classified(&self) -> crate::category::Classified {
        crate::category::Classified {
            category: self.category,
            slug: self.slug.clone(),
            named: self.named,
        }
    }

    pub fn primitive_name(&self) -> String {
        self.classified().primitive_name()
    }

    pub fn token_name(&self) -> String {
        self.classified().token_name()
    }
}

/// One ingested JSON export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDocument {
    pub name: String,
    pub mode: Option<ModeId>,
    pub variables: Vec<NormalizedVariable>,
    /// Variables that were dropped while reading the document
    pub skipped: Vec<Diagnostic>,
}

/// A CSS custom property value, structured just enough to rewrite
/// references and responsive expressions without touching text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CssValue {
    Literal { text: String },
    Var { name: String },
    Clamp {
        min: Box<CssValue>,
        preferred: String,
        max: Box<CssValue>,
    },
    LightDark {
        light: Box<CssValue>,
        dark: Box<CssValue>,
    },
}

fn var_reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"var\(\s*(--[A-Za-z0-9_-]+)").expect("valid var() pattern"))
}

impl CssValue {
    pub fn literal(text: impl Into<String>) -> Self {
        CssValue::Literal { text: text.into() }
    }

    pub fn var(name: impl Into<String>) -> Self {
        CssValue::Var { name: name.into() }
    }

    pub fn clamp(min: CssValue, preferred: impl Into<String>, max: CssValue) -> Self {
        CssValue::Clamp {
            min: Box::new(min),
            preferred: preferred.into(),
            max: Box::new(max),
        }
    }

    pub fn light_dark(light: CssValue, dark: CssValue) -> Self {
        CssValue::LightDark {
            light: Box::new(light),
            dark: Box::new(dark),
        }
    }

    pub fn is_clamp(&self) -> bool {
        matches!(self, CssValue::Clamp { .. })
    }

    pub fn is_light_dark(&self) -> bool {
        matches!(self, CssValue::LightDark { .. })
    }

    /// The referenced name when this value is exactly `var(--x)`
    pub fn as_var(&self) -> Option<&str> {
        match self {
            CssValue::Var { name } => Some(name),
            _ => None,
        }
    }

    /// Every custom property this value reads, in textual order
    pub fn references(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references(&self, out: &mut Vec<String>) {
        match self {
            CssValue::Literal { text } => scan_references(text, out),
            CssValue::Var { name } => out.push(name.clone()),
            CssValue::Clamp { min, preferred, max } => {
                min.collect_references(out);
                scan_references(preferred, out);
                max.collect_references(out);
            }
            CssValue::LightDark { light, dark } => {
                light.collect_references(out);
                dark.collect_references(out);
            }
        }
    }
}

fn scan_references(text: &str, out: &mut Vec<String>) {
    for captures in var_reference_regex().captures_iter(text) {
        out.push(captures[1].to_string());
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssValue::Literal { text } => f.write_str(text),
            CssValue::Var { name } => write!(f, "var({})", name),
            CssValue::Clamp { min, preferred, max } => {
                write!(f, "clamp({}, {}, {})", min, preferred, max)
            }
            CssValue::LightDark { light, dark } => write!(f, "light-dark({}, {})", light, dark),
        }
    }
}

/// A `--name: value;` declaration read from a reference sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub value: CssValue,
    pub span: Span,
}

/// Canonical CSS text handed to a run, reduced to its custom properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSheet {
    pub name: String,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CustomColorValue {
    Hex(RawColor),
    /// An `oklch(...)` literal, kept verbatim
    Literal(String),
}

/// One line of the custom colors text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomColor {
    /// Sanitized slug; the primitive is `--color-<name>`
    pub name: String,
    pub value: CustomColorValue,
}

impl CustomColor {
    pub fn primitive_name(&self) -> String {
        format!("--color-{}", self.name)
    }
}
