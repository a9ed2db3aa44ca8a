use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tokensmith_evaluator::{compare_property_names, ThemeModel};
use tokensmith_parser::Category;
use tracing::debug;

pub const THEME_JSON_SCHEMA: &str = "https://schemas.wp.org/trunk/theme.json";
pub const THEME_JSON_VERSION: u32 = 3;

/// Errors that can occur during theme.json compilation
#[derive(Error, Debug)]
pub enum WordPressError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type WordPressResult<T> = Result<T, WordPressError>;

/// Options for theme.json compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print JSON
    pub pretty: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeJson {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: u32,
    pub settings: Settings,
    pub styles: Styles,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub color: ColorSettings,
    pub spacing: SpacingSettings,
    pub typography: TypographySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSettings {
    pub default_palette: bool,
    pub palette: Vec<PaletteEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub slug: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingSettings {
    pub default_spacing_sizes: bool,
    pub spacing_sizes: Vec<SizeEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographySettings {
    pub default_font_sizes: bool,
    pub fluid: bool,
    pub font_sizes: Vec<SizeEntry>,
    pub font_families: Vec<FontFamilyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub slug: String,
    pub name: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFamilyEntry {
    pub slug: String,
    pub name: String,
    pub font_family: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Styles {
    #[serde(skip_serializing_if = "StyleColor::is_empty", default)]
    pub color: StyleColor,
    #[serde(skip_serializing_if = "StyleSpacing::is_empty", default)]
    pub spacing: StyleSpacing,
    #[serde(skip_serializing_if = "StyleTypography::is_empty", default)]
    pub typography: StyleTypography,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleColor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl StyleColor {
    fn is_empty(&self) -> bool {
        self.background.is_none() && self.text.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSpacing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_gap: Option<String>,
}

impl StyleSpacing {
    fn is_empty(&self) -> bool {
        self.block_gap.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTypography {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl StyleTypography {
    fn is_empty(&self) -> bool {
        self.font_size.is_none() && self.font_family.is_none()
    }
}

/// A property name and its category, in emission order
struct Preset<'a> {
    name: &'a str,
    category: Category,
}

impl Preset<'_> {
    /// `--color-gray-900` → `gray-900`; unprefixed names keep their body
    fn slug(&self) -> String {
        let bare = self.name.trim_start_matches("--");
        self.category
            .prefix()
            .and_then(|prefix| bare.strip_prefix(prefix))
            .and_then(|rest| rest.strip_prefix('-'))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(bare)
            .to_string()
    }

    fn css(&self) -> String {
        format!("var({})", self.name)
    }
}

/// `gray-900` → `Gray 900`
fn display_name(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_scale_step(slug: &str) -> bool {
    slug.chars().all(|c| c.is_ascii_digit() || c == '-')
}

/// Primitives and tokens of a category, sorted by name
fn presets(model: &ThemeModel, category: Category) -> (Vec<Preset<'_>>, Vec<Preset<'_>>) {
    let mut primitives: Vec<Preset> = model
        .primitives
        .iter()
        .filter(|p| p.category == category)
        .map(|p| Preset {
            name: &p.name,
            category,
        })
        .collect();
    let mut tokens: Vec<Preset> = model
        .tokens
        .iter()
        .filter(|t| t.category == category)
        .map(|t| Preset {
            name: &t.name,
            category,
        })
        .collect();
    primitives.sort_by(|a, b| compare_property_names(a.name, b.name));
    tokens.sort_by(|a, b| compare_property_names(a.name, b.name));
    (primitives, tokens)
}

/// Named tokens when there are any, else the primitive scale
fn size_entries(model: &ThemeModel, category: Category) -> Vec<SizeEntry> {
    let (primitives, tokens) = presets(model, category);
    let named: Vec<&Preset> = tokens.iter().filter(|t| !is_scale_step(&t.slug())).collect();
    let chosen: Vec<&Preset> = if named.is_empty() {
        primitives.iter().collect()
    } else {
        named
    };
    chosen
        .into_iter()
        .map(|preset| {
            let slug = preset.slug();
            SizeEntry {
                name: display_name(&slug),
                size: preset.css(),
                slug,
            }
        })
        .collect()
}

fn palette(model: &ThemeModel) -> Vec<PaletteEntry> {
    let (primitives, tokens) = presets(model, Category::Color);
    let mut seen = HashSet::new();
    primitives
        .iter()
        .chain(tokens.iter())
        .filter_map(|preset| {
            let slug = preset.slug();
            if !seen.insert(slug.clone()) {
                debug!(slug = %slug, "Duplicate palette slug skipped");
                return None;
            }
            Some(PaletteEntry {
                name: display_name(&slug),
                color: preset.css(),
                slug,
            })
        })
        .collect()
}

fn font_families(model: &ThemeModel) -> Vec<FontFamilyEntry> {
    let (primitives, _) = presets(model, Category::FontFamily);
    primitives
        .iter()
        .map(|preset| {
            let slug = preset.slug();
            FontFamilyEntry {
                name: display_name(&slug),
                font_family: preset.css(),
                slug,
            }
        })
        .collect()
}

fn preset_ref(kind: &str, slug: &str) -> String {
    format!("var:preset|{}|{}", kind, slug)
}

/// Project the theme model onto WordPress presets
pub fn build_theme_json(model: &ThemeModel) -> ThemeJson {
    let palette = palette(model);
    let spacing_sizes = size_entries(model, Category::Spacing);
    let font_sizes = size_entries(model, Category::FontSize);
    let font_families = font_families(model);

    let has_color = |slug: &str| palette.iter().any(|p| p.slug == slug);
    let styles = Styles {
        color: StyleColor {
            background: has_color("surface").then(|| preset_ref("color", "surface")),
            text: has_color("on-surface").then(|| preset_ref("color", "on-surface")),
        },
        spacing: StyleSpacing {
            block_gap: spacing_sizes
                .iter()
                .any(|s| s.slug == "m")
                .then(|| preset_ref("spacing", "m")),
        },
        typography: StyleTypography {
            font_size: font_sizes
                .iter()
                .any(|s| s.slug == "m")
                .then(|| preset_ref("font-size", "m")),
            font_family: font_families
                .iter()
                .find(|family| family.slug == "sans")
                .or_else(|| font_families.first())
                .map(|family| preset_ref("font-family", &family.slug)),
        },
    };

    debug!(
        palette = palette.len(),
        spacing = spacing_sizes.len(),
        font_sizes = font_sizes.len(),
        "Built theme.json presets"
    );

    ThemeJson {
        schema: THEME_JSON_SCHEMA.to_string(),
        version: THEME_JSON_VERSION,
        settings: Settings {
            color: ColorSettings {
                default_palette: false,
                palette,
            },
            spacing: SpacingSettings {
                default_spacing_sizes: false,
                spacing_sizes,
            },
            typography: TypographySettings {
                default_font_sizes: false,
                fluid: false,
                font_sizes,
                font_families,
            },
        },
        styles,
    }
}

/// Compile the theme model to `theme.json` text
pub fn compile_to_theme_json(model: &ThemeModel, options: CompileOptions) -> WordPressResult<String> {
    let theme = build_theme_json(model);
    let mut text = if options.pretty {
        serde_json::to_string_pretty(&theme)?
    } else {
        serde_json::to_string(&theme)?
    };
    text.push('\n');
    Ok(text)
}
