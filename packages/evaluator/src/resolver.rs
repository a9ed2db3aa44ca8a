//! Mode-aware token resolution.
//!
//! Values of the same token name are gathered across documents and
//! grouped by mode. Each mode's value is resolved to a primitive reference
//! (existing or synthesized) or a literal, then the modes are compared:
//! identical values collapse into a primitive alias, viewport pairs become
//! `clamp()` and appearance pairs become `light-dark()`.

use crate::context::CompileContext;
use crate::extractor::{literal_value, TokenCandidates};
use crate::fluid::{fluid_between, FluidPoint};
use crate::primitives::{Origin, Primitive};
use crate::tokens::{Token, TokenOrigin};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tokensmith_common::{Diagnostic, DiagnosticKind};
use tokensmith_parser::{
    classify_path, Axis, Category, CssValue, ModeEntry, ModeId, RawValue, ResolvedValue,
    TokenDocument, VariableKind,
};
use tracing::{debug, instrument};

/// Every value a token name carries, across all documents
#[derive(Debug, Clone)]
struct TokenGroup {
    name: String,
    category: Category,
    kind: VariableKind,
    entries: Vec<ModeEntry>,
}

/// One mode's resolved value
#[derive(Debug, Clone, PartialEq)]
struct Endpoint {
    value: CssValue,
    px: Option<f64>,
}

pub struct Resolver<'a> {
    ctx: &'a mut CompileContext,
    token_names: HashSet<String>,
    two_sided: HashSet<Axis>,
}

/// Resolve every token candidate in `documents` into the context
#[instrument(skip_all, fields(documents = documents.len()))]
pub fn resolve_tokens(
    ctx: &mut CompileContext,
    documents: &[TokenDocument],
    candidates: &TokenCandidates,
) {
    let groups = group_tokens(documents, candidates);
    debug!(tokens = groups.len(), "Resolving tokens");

    let mut resolver = Resolver::new(ctx, &groups);
    for group in groups.values() {
        resolver.resolve_group(group);
    }
}

fn group_tokens(
    documents: &[TokenDocument],
    candidates: &TokenCandidates,
) -> BTreeMap<String, TokenGroup> {
    let mut groups: BTreeMap<String, TokenGroup> = BTreeMap::new();
    for variable in documents.iter().flat_map(|d| d.variables.iter()) {
        if !candidates.contains(variable) {
            continue;
        }
        groups
            .entry(variable.token_name())
            .or_insert_with(|| TokenGroup {
                name: variable.token_name(),
                category: variable.category,
                kind: variable.kind,
                entries: Vec::new(),
            })
            .entries
            .extend(variable.values.iter().cloned());
    }
    groups
}

impl<'a> Resolver<'a> {
    fn new(ctx: &'a mut CompileContext, groups: &BTreeMap<String, TokenGroup>) -> Self {
        let mut two_sided = HashSet::new();
        for group in groups.values() {
            let modes: BTreeSet<ModeId> = group.entries.iter().filter_map(|e| e.mode).collect();
            for mode in &modes {
                if modes.contains(&mode.opposite()) {
                    two_sided.insert(mode.axis());
                }
            }
        }
        Self {
            ctx,
            token_names: groups.keys().cloned().collect(),
            two_sided,
        }
    }

    fn report(&mut self, kind: DiagnosticKind, subject: &str, message: impl Into<String>) {
        self.ctx
            .report(Diagnostic::new(kind, message).with_subject(subject));
    }

    fn is_token(&self, name: &str) -> bool {
        self.token_names.contains(name) || self.ctx.is_token_name(name)
    }

    fn resolve_group(&mut self, group: &TokenGroup) {
        // Tagged values win; untagged ones only stand in when nothing is tagged
        let mut by_mode: BTreeMap<ModeId, &ResolvedValue> = BTreeMap::new();
        for entry in &group.entries {
            if let Some(mode) = entry.mode {
                by_mode.entry(mode).or_insert(&entry.value);
            }
        }

        let axes: BTreeSet<Axis> = by_mode.keys().map(ModeId::axis).collect();
        if axes.len() > 1 {
            let modes: Vec<&str> = by_mode.keys().map(ModeId::as_str).collect();
            self.report(
                DiagnosticKind::MixedAxisModes,
                &group.name,
                format!("modes {} mix appearance and viewport; token dropped", modes.join(", ")),
            );
            return;
        }

        let mut endpoints: Vec<(Option<ModeId>, Endpoint)> = Vec::new();
        if by_mode.is_empty() {
            let mut distinct: Vec<&ResolvedValue> = Vec::new();
            for entry in &group.entries {
                if !distinct.contains(&&entry.value) {
                    distinct.push(&entry.value);
                }
            }
            if distinct.len() > 1 {
                self.report(
                    DiagnosticKind::AmbiguousModes,
                    &group.name,
                    format!(
                        "{} differing values under unrecognized mode keys; keeping the first",
                        distinct.len()
                    ),
                );
            }
            if let Some(entry) = group.entries.first() {
                if let Some(endpoint) = self.resolve_value(group, &entry.value) {
                    endpoints.push((None, endpoint));
                }
            }
        } else {
            for (mode, value) in by_mode {
                if let Some(endpoint) = self.resolve_value(group, value) {
                    endpoints.push((Some(mode), endpoint));
                }
            }
        }

        let (axis, first, second, mirrored) = match endpoints.len() {
            0 => {
                self.report(
                    DiagnosticKind::MalformedToken,
                    &group.name,
                    "no mode has a resolvable value; token dropped",
                );
                return;
            }
            1 => {
                let (mode, endpoint) = endpoints.remove(0);
                match mode.filter(|m| self.two_sided.contains(&m.axis())) {
                    Some(mode) => {
                        self.report(
                            DiagnosticKind::MissingModeVariant,
                            &group.name,
                            format!("only defined for {}; using it for {} too", mode, mode.opposite()),
                        );
                        (mode.axis(), endpoint.clone(), endpoint, true)
                    }
                    None => {
                        debug!(token = %group.name, "Single-mode token becomes an alias");
                        self.register_alias(group, endpoint);
                        return;
                    }
                }
            }
            _ => {
                let (mode, first) = endpoints.remove(0);
                let (_, second) = endpoints.remove(0);
                let axis = mode.map(|m| m.axis()).unwrap_or(Axis::Appearance);
                (axis, first, second, false)
            }
        };

        self.combine(group, axis, first, second, mirrored);
    }

    /// Turn the two sides of an axis into one value
    fn combine(&mut self, group: &TokenGroup, axis: Axis, first: Endpoint, second: Endpoint, mirrored: bool) {
        if first.value == second.value {
            if !mirrored {
                self.report(
                    DiagnosticKind::RedundantToken,
                    &group.name,
                    format!("same value ({}) on every mode; collapsed", first.value),
                );
            }
            self.register_alias(group, first);
            return;
        }

        if let (Some(a), Some(b)) = (first.px, second.px) {
            if (a - b).abs() < 1e-6 {
                self.report(
                    DiagnosticKind::RedundantTokenNumeric,
                    &group.name,
                    format!("{} and {} are both {}px; collapsed", first.value, second.value, a),
                );
                let literal = match literal_value(group.category, &RawValue::Number(a)) {
                    Ok((css, _)) => css,
                    Err(_) => first.value.clone(),
                };
                self.register_alias(
                    group,
                    Endpoint {
                        value: literal,
                        px: Some(a),
                    },
                );
                return;
            }
        }

        let value = match axis {
            Axis::Appearance => CssValue::light_dark(first.value, second.value),
            Axis::Viewport => match (first.px, second.px) {
                (Some(mobile), Some(desktop)) => fluid_between(
                    FluidPoint {
                        px: mobile,
                        css: first.value,
                    },
                    FluidPoint {
                        px: desktop,
                        css: second.value,
                    },
                    &self.ctx.options.fluid,
                ),
                _ => {
                    self.report(
                        DiagnosticKind::NonInterpolableToken,
                        &group.name,
                        format!(
                            "{} and {} cannot be interpolated; keeping the mobile value",
                            first.value, second.value
                        ),
                    );
                    self.register_alias(group, first);
                    return;
                }
            },
        };
        self.register_token(group, value);
    }

    fn register_token(&mut self, group: &TokenGroup, value: CssValue) {
        if self.ctx.primitives.contains(&group.name) {
            self.report(
                DiagnosticKind::TokenShadowsPrimitive,
                &group.name,
                "a primitive with this name already exists; token dropped",
            );
            return;
        }
        debug!(token = %group.name, value = %value, "Registering token");
        self.ctx.tokens.insert(Token::new(
            group.name.clone(),
            group.category,
            value,
            TokenOrigin::Project,
        ));
    }

    /// Register a value with no mode variation. It is a primitive alias
    /// unless it reads another token, which keeps it in the token layer.
    fn register_alias(&mut self, group: &TokenGroup, endpoint: Endpoint) {
        if endpoint.value.as_var() == Some(group.name.as_str()) {
            return;
        }
        if let Some(existing) = self.ctx.primitives.get(&group.name) {
            let conflict = (existing.value != endpoint.value).then(|| {
                format!(
                    "would redefine the primitive ({} instead of {}); dropped",
                    endpoint.value, existing.value
                )
            });
            if let Some(message) = conflict {
                self.report(DiagnosticKind::TokenShadowsPrimitive, &group.name, message);
            }
            return;
        }

        let reads_token = endpoint
            .value
            .references()
            .iter()
            .any(|name| !self.ctx.primitives.contains(name) && self.is_token(name));
        if reads_token {
            self.register_token(group, endpoint.value);
            return;
        }

        let mut primitive = Primitive::new(group.name.clone(), group.category, endpoint.value, Origin::Alias);
        primitive.px = endpoint.px;
        self.ctx.primitives.insert(primitive);
    }

    fn resolve_value(&mut self, group: &TokenGroup, value: &ResolvedValue) -> Option<Endpoint> {
        let raw_px = match value.raw {
            Some(RawValue::Number(n)) => Some(n),
            _ => None,
        };

        if let Some(path) = &value.alias_name {
            let classified = classify_path(path, group.kind);
            let target = classified.primitive_name();
            if let Some(primitive) = self.ctx.primitives.get(&target) {
                return Some(Endpoint {
                    value: CssValue::var(target.clone()),
                    px: primitive.px.or(raw_px),
                });
            }
            let token_target = classified.token_name();
            if token_target != group.name && self.is_token(&token_target) {
                return Some(Endpoint {
                    value: CssValue::var(token_target),
                    px: raw_px,
                });
            }
            // The aliased color was never exported: create it under its own name
            if let Some(RawValue::Color(_)) = &value.raw {
                if self.ctx.options.synthesize_project_primitives {
                    if let Some(endpoint) = self.synthesize_color(group, value, target) {
                        return Some(endpoint);
                    }
                }
            }
        }

        if let Some(id) = &value.variable_id {
            if let Some(name) = self.ctx.ids.get(id).cloned() {
                if let Some(primitive) = self.ctx.primitives.get(&name) {
                    return Some(Endpoint {
                        px: primitive.px.or(raw_px),
                        value: CssValue::var(name),
                    });
                }
                if name != group.name && self.is_token(&name) {
                    return Some(Endpoint {
                        value: CssValue::var(name),
                        px: raw_px,
                    });
                }
            }
        }

        let raw = value.raw.as_ref()?;
        let (literal, px) = match literal_value(group.category, raw) {
            Ok(converted) => converted,
            Err(message) => {
                self.report(DiagnosticKind::InvalidColor, &group.name, message);
                return None;
            }
        };

        match raw {
            RawValue::Number(n) if px.is_some() => Some(self.numeric_endpoint(group, *n, literal)),
            RawValue::Color(_) => {
                if let Some(existing) = self.ctx.primitives.find_by_value(Category::Color, &literal) {
                    return Some(Endpoint {
                        value: CssValue::var(existing.name.clone()),
                        px: None,
                    });
                }
                if self.ctx.options.synthesize_project_primitives {
                    if let Some(hex) = color_hex(raw) {
                        let name = format!("--color-{}", hex);
                        if let Some(endpoint) = self.synthesize_color(group, value, name) {
                            return Some(endpoint);
                        }
                    }
                }
                Some(Endpoint {
                    value: literal,
                    px: None,
                })
            }
            _ => {
                let value = match self.ctx.primitives.find_by_value(group.category, &literal) {
                    Some(existing) => CssValue::var(existing.name.clone()),
                    None => literal,
                };
                Some(Endpoint { value, px: None })
            }
        }
    }

    /// A px value: an existing primitive of that size, a synthesized
    /// `--<prefix>-<px>`, or the rem literal
    fn numeric_endpoint(&mut self, group: &TokenGroup, px: f64, literal: CssValue) -> Endpoint {
        if let Some(primitive) = self.ctx.primitives.lookup_by_px(group.category, px) {
            return Endpoint {
                value: CssValue::var(primitive.name.clone()),
                px: Some(px),
            };
        }

        if self.ctx.options.synthesize_project_primitives {
            if let Some(prefix) = group.category.prefix() {
                let name = format!("--{}-{}", prefix, px.round() as i64);
                let primitive =
                    Primitive::new(name.clone(), group.category, literal.clone(), Origin::Synthesized)
                        .with_px(px);
                if self.ctx.primitives.insert(primitive) {
                    debug!(token = %group.name, primitive = %name, "Synthesized primitive");
                    return Endpoint {
                        value: CssValue::var(name),
                        px: Some(px),
                    };
                }
            }
        }

        Endpoint {
            value: literal,
            px: Some(px),
        }
    }

    fn synthesize_color(&mut self, group: &TokenGroup, value: &ResolvedValue, name: String) -> Option<Endpoint> {
        let raw = value.raw.as_ref()?;
        let (literal, _) = literal_value(Category::Color, raw).ok()?;
        let primitive = Primitive::new(name.clone(), Category::Color, literal, Origin::Synthesized);
        if !self.ctx.primitives.insert(primitive) {
            return None;
        }
        debug!(token = %group.name, primitive = %name, "Synthesized color primitive");
        Some(Endpoint {
            value: CssValue::var(name),
            px: None,
        })
    }
}

fn color_hex(raw: &RawValue) -> Option<String> {
    match raw {
        RawValue::Color(color) => crate::color::Rgba::try_from(*color).ok().map(|c| c.to_hex()),
        _ => None,
    }
}
