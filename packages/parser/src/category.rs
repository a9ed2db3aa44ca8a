//! Category detection for variable paths.
//!
//! Exporters spell the same concept many ways (`FontSize`, `fontSize`,
//! `Font-Size`, `font.fontSize`). Every spelling is matched once, at
//! ingestion, against an ordered alias table; nothing downstream looks at
//! raw path segments again.

use crate::ast::VariableKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical primitive category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Color,
    Spacing,
    Radius,
    FontSize,
    LineHeight,
    FontFamily,
    FontWeight,
    ZIndex,
    Transition,
    Breakpoint,
    Other,
}

/// Categories that can be matched from a path segment, in match order
const MATCHABLE: [Category; 9] = [
    Category::Color,
    Category::Spacing,
    Category::Radius,
    Category::FontSize,
    Category::LineHeight,
    Category::FontFamily,
    Category::FontWeight,
    Category::ZIndex,
    Category::Transition,
];

/// Only this many leading segments are considered when looking for a category
const CATEGORY_SEARCH_DEPTH: usize = 2;

impl Category {
    /// CSS custom property prefix (`--<prefix>-<slug>`)
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Category::Color => Some("color"),
            Category::Spacing => Some("spacing"),
            Category::Radius => Some("radius"),
            Category::FontSize => Some("text"),
            Category::LineHeight => Some("line-height"),
            Category::FontFamily => Some("font"),
            Category::FontWeight => Some("font-weight"),
            Category::ZIndex => Some("z"),
            Category::Transition => Some("transition"),
            Category::Breakpoint => Some("breakpoint"),
            Category::Other => None,
        }
    }

    /// Normalized spellings that name this category
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Category::Color => &["color", "colors", "colour", "colours"],
            Category::Spacing => &["spacing", "space", "spaces", "gap"],
            Category::Radius => &["radius", "radii", "borderradius", "rounded", "corner"],
            Category::FontSize => &["fontsize", "fontsizes", "textsize", "text"],
            Category::LineHeight => &["lineheight", "lineheights", "leading"],
            Category::FontFamily => &["fontfamily", "fontfamilies", "family"],
            Category::FontWeight => &["fontweight", "fontweights", "weight"],
            Category::ZIndex => &["zindex", "z", "elevation"],
            Category::Transition => &["transition", "transitions", "duration", "motion"],
            Category::Breakpoint => &["breakpoint", "breakpoints"],
            Category::Other => &[],
        }
    }

    pub fn is_typography(&self) -> bool {
        matches!(
            self,
            Category::FontSize | Category::LineHeight | Category::FontFamily | Category::FontWeight
        )
    }

    /// Whether a variable of `kind` may live in this category
    fn accepts(&self, kind: VariableKind) -> bool {
        match kind {
            VariableKind::Color => *self == Category::Color,
            VariableKind::Number => !matches!(self, Category::Color | Category::FontFamily),
            VariableKind::Text => *self != Category::Color,
        }
    }

    /// Category of an already-emitted custom property, by its prefix
    pub fn from_property_name(name: &str) -> Category {
        let Some(bare) = name.strip_prefix("--") else {
            return Category::Other;
        };
        // Longer prefixes first so `font-weight` wins over `font`
        const BY_PREFIX: [(&str, Category); 10] = [
            ("font-weight-", Category::FontWeight),
            ("line-height-", Category::LineHeight),
            ("breakpoint-", Category::Breakpoint),
            ("transition-", Category::Transition),
            ("spacing-", Category::Spacing),
            ("radius-", Category::Radius),
            ("color-", Category::Color),
            ("text-", Category::FontSize),
            ("font-", Category::FontFamily),
            ("z-", Category::ZIndex),
        ];
        BY_PREFIX
            .iter()
            .find(|(prefix, _)| bare.starts_with(prefix))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Other)
    }

    /// Find the category named by a single (unnormalized) path segment
    pub fn from_segment(segment: &str) -> Option<Category> {
        let normalized = normalize_segment(segment);
        MATCHABLE
            .into_iter()
            .find(|category| category.aliases().contains(&normalized.as_str()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix() {
            Some(prefix) => f.write_str(prefix),
            None => f.write_str("other"),
        }
    }
}

/// Result of classifying a variable path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classified {
    pub category: Category,
    /// Sanitized remainder of the path, without any category prefix
    pub slug: String,
    /// Whether the path itself named the category
    pub named: bool,
}

impl Classified {
    /// Name used when the variable is a primitive: always category-prefixed
    pub fn primitive_name(&self) -> String {
        match self.category.prefix() {
            Some(prefix) => format!("--{}-{}", prefix, self.slug),
            None => format!("--{}", self.slug),
        }
    }

    /// Name used when the variable is a semantic token: prefixed only when
    /// the path named its category
    pub fn token_name(&self) -> String {
        match (self.named, self.category.prefix()) {
            (true, Some(prefix)) => format!("--{}-{}", prefix, self.slug),
            _ => format!("--{}", self.slug),
        }
    }
}

/// Classify a slash-delimited variable path
pub fn classify_path(path: &str, kind: VariableKind) -> Classified {
    let segments: Vec<&str> = path
        .split(|c| c == '/' || c == '.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    for (index, segment) in segments.iter().enumerate().take(CATEGORY_SEARCH_DEPTH) {
        let Some(category) = Category::from_segment(segment) else {
            continue;
        };
        if !category.accepts(kind) {
            continue;
        }
        let rest = sanitize(&segments[index + 1..].join("-"));
        if rest.is_empty() {
            continue;
        }
        return Classified {
            category,
            slug: strip_category_prefix(&rest, category).to_string(),
            named: true,
        };
    }

    let category = match kind {
        VariableKind::Color => Category::Color,
        _ => Category::Other,
    };
    let slug = sanitize(&segments.join("-"));
    Classified {
        category,
        slug: strip_category_prefix(&slug, category).to_string(),
        named: false,
    }
}

/// Lower-case a path fragment into a custom-property-safe slug
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if matches!(c, '-' | '_' | ' ' | '/' | '.') && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// Segment comparison form: lower-case alphanumerics only
fn normalize_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Drop a leading spelling of the category (`text-16` under font-size → `16`)
fn strip_category_prefix(slug: &str, category: Category) -> &str {
    for (pos, _) in slug.match_indices('-') {
        let head = &slug[..pos];
        let matches_prefix = category.prefix() == Some(head);
        let matches_alias = category.aliases().contains(&normalize_segment(head).as_str());
        if matches_prefix || matches_alias {
            let rest = &slug[pos + 1..];
            if !rest.is_empty() {
                return rest;
            }
        }
    }
    slug
}
