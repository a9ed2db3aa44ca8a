//! # Tokensmith Evaluator
//!
//! Turns parsed token documents and reference sheets into a [`ThemeModel`]:
//! the primitive namespace, the semantic tokens and the diagnostics of the
//! run.
//!
//! ## Determinism Contract
//!
//! For the same documents, reference sheets and options, `evaluate()`
//! produces an identical model on every invocation. All collections are
//! ordered maps or input-ordered vectors; nothing depends on hash order,
//! time or environment.
//!
//! ## Run order
//!
//! 1. Custom colors, primitive documents, reference sheets, then built-in
//!    defaults fill the primitive namespace. The first writer of a name
//!    wins.
//! 2. Tokens are resolved against that namespace, synthesizing primitives
//!    where needed.
//! 3. Global tokens (reference sheets, defaults) fill names no project
//!    token claimed.
//! 4. Aliases and tokens with unresolvable references are pruned.
//! 5. Output options collapse `light-dark()` / `clamp()` as requested.

use crate::context::{CompileContext, CompileOptions, ThemeMode};
use crate::defaults::{insert_default_primitives, stage_default_tokens};
use crate::extractor::{
    extract_custom_colors, extract_document_primitives, extract_reference_sheets,
    index_variable_ids, settle_imported_aliases, TokenCandidates,
};
use crate::output::apply_output_options;
use crate::primitives::{Origin, PrimitiveSet};
use crate::resolver::resolve_tokens;
use crate::tokens::TokenSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokensmith_common::{Diagnostic, DiagnosticKind};
use tokensmith_parser::{parse_custom_colors, CustomColor, ReferenceSheet, TokenDocument};
use tracing::{debug, info, instrument};

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Invalid fluid window: min viewport {min}px must be below max viewport {max}px")]
    InvalidFluidWindow { min: f64, max: f64 },
}

/// Configuration of the run, echoed in the sheet headers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub primary_color: Option<String>,
    pub theme_mode: ThemeMode,
    pub typo_responsive: bool,
    pub spacing_responsive: bool,
}

/// Everything emission needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeModel {
    pub primitives: PrimitiveSet,
    pub tokens: TokenSet,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: CompileOptions,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Evaluate a document set into a theme model
    #[instrument(skip_all, fields(documents = documents.len(), references = references.len()))]
    pub fn evaluate(
        &self,
        documents: &[TokenDocument],
        references: &[ReferenceSheet],
    ) -> EvalResult<ThemeModel> {
        info!("Starting theme evaluation");

        let window = self.options.fluid;
        if !window.is_valid() {
            return Err(EvalError::InvalidFluidWindow {
                min: window.min_viewport,
                max: window.max_viewport,
            });
        }

        let mut ctx = CompileContext::new(self.options.clone());
        for document in documents {
            for skipped in &document.skipped {
                ctx.report(skipped.clone());
            }
        }

        let (custom_colors, custom_diagnostics) =
            parse_custom_colors(&self.options.custom_colors_text);
        for diagnostic in custom_diagnostics {
            ctx.report(diagnostic);
        }

        // Primitive namespace, in writer precedence order
        let candidates = TokenCandidates::collect(documents);
        extract_custom_colors(&mut ctx, &custom_colors);
        index_variable_ids(&mut ctx, documents, &candidates);
        extract_document_primitives(&mut ctx, documents, &candidates);
        extract_reference_sheets(&mut ctx, references);
        insert_default_primitives(&mut ctx);
        settle_imported_aliases(&mut ctx);
        stage_default_tokens(&mut ctx);
        debug!(primitives = ctx.primitives.len(), "Primitive namespace assembled");

        resolve_tokens(&mut ctx, documents, &candidates);
        insert_global_tokens(&mut ctx);
        prune_unresolved(&mut ctx);
        apply_output_options(&mut ctx.tokens, &ctx.options);

        let summary = RunSummary {
            primary_color: primary_color(&custom_colors, &ctx.primitives),
            theme_mode: self.options.theme_mode,
            typo_responsive: self.options.typo_responsive,
            spacing_responsive: self.options.spacing_responsive,
        };

        info!(
            primitives = ctx.primitives.len(),
            tokens = ctx.tokens.len(),
            diagnostics = ctx.diagnostics.len(),
            "Theme evaluation complete"
        );

        Ok(ThemeModel {
            primitives: ctx.primitives,
            tokens: ctx.tokens,
            diagnostics: ctx.diagnostics,
            summary,
        })
    }
}

/// Global tokens take every name that no project token or primitive holds
fn insert_global_tokens(ctx: &mut CompileContext) {
    for token in std::mem::take(&mut ctx.staged_globals) {
        let holder = ctx.primitives.get(&token.name).map(|p| p.origin);
        if holder == Some(Origin::Alias) {
            debug!(token = %token.name, "Collapsed project token shadows global token");
            continue;
        }
        if holder.is_some() {
            ctx.report(
                Diagnostic::new(
                    DiagnosticKind::TokenShadowsPrimitive,
                    "a primitive with this name already exists; global token dropped",
                )
                .with_subject(token.name.clone()),
            );
            continue;
        }
        let name = token.name.clone();
        if !ctx.tokens.insert(token) {
            debug!(token = %name, "Project token shadows global token");
        }
    }
}

/// Remove primitives and tokens that read undefined names, until nothing
/// changes. Primitives may only read primitives so the primitives sheet
/// stands alone.
fn prune_unresolved(ctx: &mut CompileContext) {
    loop {
        let dangling_primitives: Vec<(String, String)> = ctx
            .primitives
            .iter()
            .filter_map(|p| {
                p.value
                    .references()
                    .into_iter()
                    .find(|r| !ctx.primitives.contains(r))
                    .map(|missing| (p.name.clone(), missing))
            })
            .collect();

        let dangling_tokens: Vec<(String, String)> = ctx
            .tokens
            .iter()
            .filter_map(|t| {
                t.value
                    .references()
                    .into_iter()
                    .find(|r| !ctx.primitives.contains(r) && !ctx.tokens.contains(r))
                    .map(|missing| (t.name.clone(), missing))
            })
            .collect();

        if dangling_primitives.is_empty() && dangling_tokens.is_empty() {
            break;
        }

        for (name, missing) in dangling_primitives {
            ctx.primitives.remove(&name);
            ctx.report(
                Diagnostic::new(
                    DiagnosticKind::UnresolvedAlias,
                    format!("references {}, which is not a primitive; dropped", missing),
                )
                .with_subject(name),
            );
        }
        for (name, missing) in dangling_tokens {
            ctx.tokens.remove(&name);
            ctx.report(
                Diagnostic::new(
                    DiagnosticKind::UnresolvedAlias,
                    format!("references {}, which is never defined; dropped", missing),
                )
                .with_subject(name),
            );
        }
    }
}

/// The custom color named `primary`, else the first custom color, else a
/// `--color-primary` primitive
fn primary_color(custom: &[CustomColor], primitives: &PrimitiveSet) -> Option<String> {
    custom
        .iter()
        .find(|c| c.name == "primary")
        .or_else(|| custom.first())
        .map(|c| c.name.clone())
        .or_else(|| {
            primitives
                .get("--color-primary")
                .filter(|p| p.origin != Origin::Default)
                .map(|_| "primary".to_string())
        })
}
