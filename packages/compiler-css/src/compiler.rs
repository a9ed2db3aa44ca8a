use crate::context::EmitOptions;
use crate::emitter::{emit_css, EmittedSheets};
use crate::error::CssResult;
use crate::json::emit_json;
use serde_json::Value;
use tokensmith_common::Diagnostic;
use tokensmith_evaluator::{CompileOptions, Evaluator, ThemeModel};
use tokensmith_parser::{parse_document, parse_reference_sheet, ModeId};
use tracing::{info, warn};

/// One variable export, as read from disk
#[derive(Debug, Clone)]
pub struct DocumentSource {
    pub name: String,
    pub text: String,
    pub mode: Option<ModeId>,
}

impl DocumentSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>, mode: Option<ModeId>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            mode,
        }
    }
}

/// One canonical reference stylesheet
#[derive(Debug, Clone)]
pub struct ReferenceSource {
    pub name: String,
    pub text: String,
}

impl ReferenceSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct ThemeOutput {
    pub sheets: EmittedSheets,
    pub json: Value,
    pub model: ThemeModel,
    /// Parse errors of skipped sources, then the evaluator's diagnostics
    pub diagnostics: Vec<Diagnostic>,
}

impl ThemeOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse, evaluate and emit. A source that fails to parse is reported and
/// left out; the run continues with the others.
pub fn compile_theme(
    documents: &[DocumentSource],
    references: &[ReferenceSource],
    options: &CompileOptions,
    emit: &EmitOptions,
) -> CssResult<ThemeOutput> {
    let mut diagnostics = Vec::new();

    let mut parsed = Vec::with_capacity(documents.len());
    for source in documents {
        match parse_document(&source.name, &source.text, source.mode) {
            Ok(document) => parsed.push(document),
            Err(error) => {
                warn!(document = %source.name, error = %error, "Skipping unreadable document");
                diagnostics.push(error.to_diagnostic(&source.name));
            }
        }
    }

    let mut sheets = Vec::with_capacity(references.len());
    for source in references {
        match parse_reference_sheet(&source.name, &source.text) {
            Ok(sheet) => sheets.push(sheet),
            Err(error) => {
                warn!(sheet = %source.name, error = %error, "Skipping unreadable reference sheet");
                diagnostics.push(error.to_diagnostic(&source.name));
            }
        }
    }

    let model = Evaluator::with_options(options.clone()).evaluate(&parsed, &sheets)?;
    let emitted = emit_css(&model, emit)?;
    let json = emit_json(&model);
    diagnostics.extend(model.diagnostics.iter().cloned());

    info!(
        documents = parsed.len(),
        references = sheets.len(),
        diagnostics = diagnostics.len(),
        "Theme compiled"
    );

    Ok(ThemeOutput {
        sheets: emitted,
        json,
        model,
        diagnostics,
    })
}
