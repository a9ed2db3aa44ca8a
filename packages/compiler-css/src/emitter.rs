//! Deterministic sheet emission.
//!
//! The only place that produces CSS text. Declarations are grouped into
//! fixed sections and blocks, then sorted with the numeric-aware name
//! comparator, so the same model always renders byte-identical sheets.
//! Each sheet is verified before rendering: every `var()` must name a
//! property declared in that same sheet.

use crate::context::{CssWriter, EmitOptions};
use crate::error::{CssError, CssResult};
use crate::sections::{primitive_placement, token_placement, Block, Section};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tokensmith_evaluator::{compare_property_names, Primitive, RunSummary, ThemeModel, Token};
use tokensmith_parser::CssValue;
use tracing::{debug, instrument};

pub const GENERATOR: &str = concat!("tokensmith ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Primitives,
    Tokens,
}

impl SheetKind {
    pub fn title(&self) -> &'static str {
        match self {
            SheetKind::Primitives => "Theme primitives",
            SheetKind::Tokens => "Theme tokens",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            SheetKind::Primitives => "theme.css",
            SheetKind::Tokens => "theme-tokens.css",
        }
    }
}

/// The two CSS artifacts of a run
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedSheets {
    pub primitives: String,
    pub tokens: String,
}

struct Line<'a> {
    name: &'a str,
    value: String,
    px: Option<f64>,
}

type Layout<'a> = BTreeMap<Section, BTreeMap<Block, Vec<Line<'a>>>>;

/// Render both sheets
#[instrument(skip_all, fields(primitives = model.primitives.len(), tokens = model.tokens.len()))]
pub fn emit_css(model: &ThemeModel, options: &EmitOptions) -> CssResult<EmittedSheets> {
    let all_primitives: Vec<&Primitive> = model.primitives.iter().collect();
    let all_tokens: Vec<&Token> = model.tokens.iter().collect();

    let primitives = render_sheet(
        SheetKind::Primitives,
        &model.summary,
        &all_primitives,
        &[],
        options,
    )?;

    let referenced = referenced_primitives(model);
    debug!(referenced = referenced.len(), "Primitives carried into the tokens sheet");
    let tokens = render_sheet(
        SheetKind::Tokens,
        &model.summary,
        &referenced,
        &all_tokens,
        options,
    )?;

    Ok(EmittedSheets { primitives, tokens })
}

/// Primitives the tokens read, directly or through other primitives
fn referenced_primitives(model: &ThemeModel) -> Vec<&Primitive> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut pending: Vec<String> = model
        .tokens
        .iter()
        .flat_map(|t| t.value.references())
        .collect();

    while let Some(name) = pending.pop() {
        let Some(primitive) = model.primitives.get(&name) else {
            continue;
        };
        if seen.insert(name) {
            pending.extend(primitive.value.references());
        }
    }

    seen.iter()
        .filter_map(|name| model.primitives.get(name))
        .collect()
}

/// Every reference must resolve inside the sheet
pub fn verify_sheet(kind: SheetKind, primitives: &[&Primitive], tokens: &[&Token]) -> CssResult<()> {
    let declared: HashSet<&str> = primitives
        .iter()
        .map(|p| p.name.as_str())
        .chain(tokens.iter().map(|t| t.name.as_str()))
        .collect();

    let values = primitives
        .iter()
        .map(|p| (&p.name, &p.value))
        .chain(tokens.iter().map(|t| (&t.name, &t.value)));
    for (name, value) in values {
        if let Some(reference) = value
            .references()
            .into_iter()
            .find(|r| !declared.contains(r.as_str()))
        {
            return Err(CssError::UnresolvedReference {
                sheet: kind.file_name().to_string(),
                name: name.clone(),
                reference,
            });
        }
    }
    Ok(())
}

fn render_sheet(
    kind: SheetKind,
    summary: &RunSummary,
    primitives: &[&Primitive],
    tokens: &[&Token],
    options: &EmitOptions,
) -> CssResult<String> {
    verify_sheet(kind, primitives, tokens)?;

    let mut layout: Layout = BTreeMap::new();
    for primitive in primitives {
        let (section, block) = primitive_placement(primitive);
        let px = primitive
            .px
            .filter(|_| matches!(primitive.value, CssValue::Literal { .. }));
        layout
            .entry(section)
            .or_default()
            .entry(block)
            .or_default()
            .push(Line {
                name: &primitive.name,
                value: single_line(&primitive.value),
                px,
            });
    }
    for token in tokens {
        let (section, block) = token_placement(token);
        layout
            .entry(section)
            .or_default()
            .entry(block)
            .or_default()
            .push(Line {
                name: &token.name,
                value: single_line(&token.value),
                px: None,
            });
    }

    let writer = CssWriter::new(options.clone());
    write_header(&writer, kind, summary);
    writer.add_line(":root {");
    writer.indent();

    let mut first = true;
    if kind == SheetKind::Tokens {
        writer.declaration("color-scheme", summary.theme_mode.color_scheme());
        first = false;
    }

    for (section, mut blocks) in layout {
        if !first {
            writer.blank_line();
        }
        first = false;

        let out = writer.with_new_buffer();
        out.comment(section.title());
        for (block, lines) in blocks.iter_mut() {
            lines.sort_by(|a, b| compare_property_names(a.name, b.name));
            if let Some(label) = block.label() {
                out.comment(label);
            }
            for line in lines.iter() {
                out.px_declaration(line.name, &line.value, line.px);
            }
        }
        writer.merge_buffer(&out);
    }

    writer.dedent();
    writer.add_line("}");
    Ok(writer.get_output())
}

fn write_header(writer: &CssWriter, kind: SheetKind, summary: &RunSummary) {
    let flag = |on: bool| if on { "on" } else { "off" };
    writer.add_line("/*");
    for line in [
        kind.title().to_string(),
        format!("Generated by {}", GENERATOR),
        format!(
            "Primary color: {}",
            summary.primary_color.as_deref().unwrap_or("none")
        ),
        format!("Theme mode: {}", summary.theme_mode),
        format!("Responsive typography: {}", flag(summary.typo_responsive)),
        format!("Responsive spacing: {}", flag(summary.spacing_responsive)),
    ] {
        writer.add_line(&format!(" * {}", line));
    }
    writer.add_line(" */");
}

/// Declarations never span lines
fn single_line(value: &CssValue) -> String {
    value.to_string().split_whitespace().collect::<Vec<_>>().join(" ")
}
