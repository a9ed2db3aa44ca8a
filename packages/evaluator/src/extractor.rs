//! Primitive extraction: custom colors, primitive documents and reference
//! sheets into the run's namespace

use crate::color::Rgba;
use crate::context::CompileContext;
use crate::primitives::{Origin, Primitive};
use crate::tokens::{Token, TokenOrigin};
use crate::units::{format_decimal, format_px, length_to_px, px_to_rem, RADIUS_FULL_PX};
use std::collections::{BTreeMap, HashSet};
use tokensmith_common::{Diagnostic, DiagnosticKind};
use tokensmith_parser::{
    classify_path, Category, CssValue, CustomColor, CustomColorValue, ModeEntry,
    NormalizedVariable, RawValue, ReferenceSheet, ResolvedValue, TokenDocument, VariableForm,
};
use tracing::debug;

pub fn extract_custom_colors(ctx: &mut CompileContext, colors: &[CustomColor]) {
    for color in colors {
        let value = match &color.value {
            CustomColorValue::Hex(raw) => match Rgba::try_from(*raw) {
                Ok(rgba) => CssValue::literal(rgba.to_oklch().to_string()),
                Err(e) => {
                    ctx.report(
                        Diagnostic::new(DiagnosticKind::InvalidColor, e.to_string())
                            .with_subject(color.primitive_name()),
                    );
                    continue;
                }
            },
            CustomColorValue::Literal(text) => CssValue::literal(text.clone()),
        };
        ctx.primitives.insert(Primitive::new(
            color.primitive_name(),
            Category::Color,
            value,
            Origin::Custom,
        ));
    }
}

/// Map every variable id to the name it will be emitted under
pub fn index_variable_ids(
    ctx: &mut CompileContext,
    documents: &[TokenDocument],
    candidates: &TokenCandidates,
) {
    for variable in documents.iter().flat_map(|d| d.variables.iter()) {
        let Some(id) = &variable.id else { continue };
        let name = if candidates.contains(variable) {
            variable.token_name()
        } else {
            primitive_name(variable)
        };
        ctx.ids.entry(id.clone()).or_insert(name);
    }
}

/// Which variables are resolved as tokens. Semantic variables always
/// are; primitive-style ones when their value differs between two modes,
/// compared across every document so per-mode dumps of one variable meet.
#[derive(Debug, Clone, Default)]
pub struct TokenCandidates {
    varying: HashSet<String>,
}

impl TokenCandidates {
    pub fn collect(documents: &[TokenDocument]) -> Self {
        let mut tagged: BTreeMap<String, Vec<&ModeEntry>> = BTreeMap::new();
        for variable in documents.iter().flat_map(|d| d.variables.iter()) {
            if variable.form == VariableForm::Primitive {
                tagged
                    .entry(variable.token_name())
                    .or_default()
                    .extend(variable.values.iter().filter(|e| e.mode.is_some()));
            }
        }

        let varying = tagged
            .into_iter()
            .filter(|(_, entries)| {
                entries
                    .iter()
                    .any(|a| entries.iter().any(|b| a.mode != b.mode && a.value != b.value))
            })
            .map(|(name, _)| name)
            .collect();
        Self { varying }
    }

    pub fn contains(&self, variable: &NormalizedVariable) -> bool {
        variable.form == VariableForm::Semantic || self.varying.contains(&variable.token_name())
    }
}

/// Name of a primitive-style variable, `--radius-full` for the sentinel
fn primitive_name(variable: &NormalizedVariable) -> String {
    if variable.category == Category::Radius {
        let is_full = variable
            .values
            .first()
            .and_then(|e| match e.value.raw {
                Some(RawValue::Number(px)) => Some(px >= RADIUS_FULL_PX),
                _ => None,
            })
            .unwrap_or(false);
        if is_full {
            return "--radius-full".to_string();
        }
    }
    variable.primitive_name()
}

pub fn extract_document_primitives(
    ctx: &mut CompileContext,
    documents: &[TokenDocument],
    candidates: &TokenCandidates,
) {
    for document in documents {
        debug!(document = %document.name, variables = document.variables.len(), "Extracting primitives");
        for variable in &document.variables {
            if candidates.contains(variable) {
                continue;
            }
            let Some(entry) = variable.values.first() else {
                continue;
            };
            let name = primitive_name(variable);
            if let Some(primitive) = primitive_from_value(ctx, variable, &name, &entry.value) {
                ctx.primitives.insert(primitive);
            }
        }
    }
}

fn primitive_from_value(
    ctx: &mut CompileContext,
    variable: &NormalizedVariable,
    name: &str,
    value: &ResolvedValue,
) -> Option<Primitive> {
    let literal = match &value.raw {
        Some(raw) => match literal_value(variable.category, raw) {
            Ok(literal) => Some(literal),
            Err(message) => {
                ctx.report(
                    Diagnostic::new(DiagnosticKind::InvalidColor, message).with_subject(name),
                );
                None
            }
        },
        None => None,
    };

    // An alias is stored as var(--target), never as the raw copy
    let alias = value
        .alias_name
        .as_deref()
        .map(|path| classify_path(path, variable.kind).primitive_name())
        .or_else(|| {
            value
                .variable_id
                .as_ref()
                .and_then(|id| ctx.ids.get(id).cloned())
        });

    match (alias, literal) {
        (Some(target), literal) if target != name => {
            if let Some((css, _)) = literal {
                ctx.alias_fallbacks.insert(name.to_string(), css);
            }
            Some(Primitive::new(
                name,
                variable.category,
                CssValue::var(target),
                Origin::Imported,
            ))
        }
        (_, Some((css, px))) => {
            let primitive = Primitive::new(name, variable.category, css, Origin::Imported);
            Some(match px {
                Some(px) => primitive.with_px(px),
                None => primitive,
            })
        }
        (Some(_), None) | (None, None) => {
            if value.variable_id.is_some() {
                ctx.report(
                    Diagnostic::new(
                        DiagnosticKind::UnresolvedAlias,
                        format!("alias of {} points at an unknown variable", variable.path),
                    )
                    .with_subject(name),
                );
            }
            None
        }
    }
}

/// Unit-normalize a literal for its category. Returns the CSS value and,
/// for numbers, the size in px.
pub fn literal_value(category: Category, raw: &RawValue) -> Result<(CssValue, Option<f64>), String> {
    match raw {
        RawValue::Color(color) => {
            let rgba = Rgba::try_from(*color).map_err(|e| e.to_string())?;
            Ok((CssValue::literal(rgba.to_oklch().to_string()), None))
        }
        RawValue::Number(n) => Ok(number_value(category, *n)),
        RawValue::Text(text) => Ok((CssValue::literal(text.clone()), None)),
    }
}

fn number_value(category: Category, n: f64) -> (CssValue, Option<f64>) {
    match category {
        Category::Radius if n >= RADIUS_FULL_PX => {
            (CssValue::literal(format_px(RADIUS_FULL_PX)), Some(RADIUS_FULL_PX))
        }
        Category::ZIndex | Category::FontWeight => {
            (CssValue::literal(format_decimal(n, 4)), None)
        }
        Category::Transition => (CssValue::literal(format!("{}ms", format_decimal(n, 2))), None),
        Category::Breakpoint => (CssValue::literal(format_px(n)), Some(n)),
        _ => (CssValue::literal(px_to_rem(n)), Some(n)),
    }
}

/// Reference sheets: `clamp()` and `light-dark()` declarations become
/// global tokens, everything else canonical primitives
pub fn extract_reference_sheets(ctx: &mut CompileContext, sheets: &[ReferenceSheet]) {
    for sheet in sheets {
        debug!(sheet = %sheet.name, declarations = sheet.declarations.len(), "Reading reference sheet");
        for declaration in &sheet.declarations {
            let category = Category::from_property_name(&declaration.name);
            if declaration.value.is_clamp() || declaration.value.is_light_dark() {
                ctx.stage_global(Token::new(
                    declaration.name.clone(),
                    category,
                    declaration.value.clone(),
                    TokenOrigin::Global,
                ));
                continue;
            }

            let mut primitive = Primitive::new(
                declaration.name.clone(),
                category,
                declaration.value.clone(),
                Origin::Reference,
            );
            if let CssValue::Literal { text } = &declaration.value {
                if let Some(px) = length_to_px(text) {
                    primitive = primitive.with_px(px);
                }
            }
            ctx.primitives.insert(primitive);
        }
    }
}

/// Imported aliases whose target is not a primitive fall back to the raw
/// value exported alongside them
pub fn settle_imported_aliases(ctx: &mut CompileContext) {
    let dangling: Vec<(String, CssValue)> = ctx
        .primitives
        .iter()
        .filter(|p| p.origin == Origin::Imported)
        .filter_map(|p| {
            let target = p.value.as_var()?;
            if ctx.primitives.contains(target) {
                return None;
            }
            ctx.alias_fallbacks
                .get(&p.name)
                .map(|fallback| (p.name.clone(), fallback.clone()))
        })
        .collect();

    for (name, fallback) in dangling {
        debug!(primitive = %name, "Alias target missing, using exported value");
        ctx.primitives.replace_value(&name, fallback);
    }
}
