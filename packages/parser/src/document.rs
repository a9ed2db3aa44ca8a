//! Reading variable exports into [`TokenDocument`]s.
//!
//! All key-name variations are handled here, once. A document that is not
//! JSON or has no `variables` array is an error; an individual variable
//! that cannot be used is skipped with a diagnostic and the rest of the
//! document is kept.

use crate::ast::{
    ModeEntry, NormalizedVariable, RawColor, RawValue, ResolvedValue, TokenDocument,
    VariableForm, VariableKind,
};
use crate::category::classify_path;
use crate::error::{ParseError, ParseResult};
use crate::mode::ModeId;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokensmith_common::{Diagnostic, DiagnosticKind};

const RAW_VALUE_KEYS: [&str; 3] = ["resolvedValue", "rawValue", "value"];
const ALIAS_ID_KEYS: [&str; 2] = ["variableId", "alias"];

/// Parse JSON text. `mode` is the caller's tag for the whole document,
/// typically derived from its file name.
pub fn parse_document(name: &str, source: &str, mode: Option<ModeId>) -> ParseResult<TokenDocument> {
    let value: Value = serde_json::from_str(source).map_err(|e| ParseError::InvalidJson {
        document: name.to_string(),
        message: e.to_string(),
    })?;
    parse_document_value(name, &value, mode)
}

/// Parse an already-materialized JSON value
pub fn parse_document_value(
    name: &str,
    value: &Value,
    mode: Option<ModeId>,
) -> ParseResult<TokenDocument> {
    let object = value.as_object().ok_or_else(|| ParseError::InvalidShape {
        document: name.to_string(),
        message: "expected a JSON object at the top level".to_string(),
    })?;

    let variables = match object.get("variables") {
        Some(Value::Array(variables)) => variables,
        Some(_) => {
            return Err(ParseError::InvalidShape {
                document: name.to_string(),
                message: "'variables' must be an array".to_string(),
            })
        }
        None => {
            return Err(ParseError::MissingField {
                document: name.to_string(),
                field: "variables".to_string(),
            })
        }
    };

    let document_mode = mode.or_else(|| {
        object
            .get("mode")
            .and_then(Value::as_str)
            .and_then(ModeId::from_label)
    });
    let modes = ModeTable {
        labels: mode_labels(object),
        fallback: document_mode,
    };

    let mut reader = DocumentReader {
        document: name,
        modes: &modes,
        skipped: Vec::new(),
    };
    let variables = variables
        .iter()
        .enumerate()
        .filter_map(|(index, variable)| reader.read_variable(index, variable))
        .collect();

    Ok(TokenDocument {
        name: name.to_string(),
        mode: document_mode,
        variables,
        skipped: reader.skipped,
    })
}

/// Mode keys as labelled by the document: either `{"1:0": "Light"}` or
/// `[{"modeId": "1:0", "name": "Light"}]`
fn mode_labels(object: &Map<String, Value>) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    match object.get("modes") {
        Some(Value::Object(map)) => {
            for (key, label) in map {
                let label = match label {
                    Value::String(s) => Some(s.as_str()),
                    Value::Object(o) => o.get("name").and_then(Value::as_str),
                    _ => None,
                };
                if let Some(label) = label {
                    labels.insert(key.clone(), label.to_string());
                }
            }
        }
        Some(Value::Array(list)) => {
            for entry in list {
                let key = entry
                    .get("modeId")
                    .or_else(|| entry.get("id"))
                    .and_then(Value::as_str);
                let label = entry.get("name").and_then(Value::as_str);
                if let (Some(key), Some(label)) = (key, label) {
                    labels.insert(key.to_string(), label.to_string());
                }
            }
        }
        _ => {}
    }
    labels
}

struct ModeTable {
    labels: HashMap<String, String>,
    fallback: Option<ModeId>,
}

impl ModeTable {
    fn resolve(&self, key: &str) -> Option<ModeId> {
        self.labels
            .get(key)
            .and_then(|label| ModeId::from_label(label))
            .or_else(|| ModeId::from_label(key))
            .or(self.fallback)
    }
}

struct DocumentReader<'a> {
    document: &'a str,
    modes: &'a ModeTable,
    skipped: Vec<Diagnostic>,
}

impl<'a> DocumentReader<'a> {
    fn skip(&mut self, subject: &str, reason: impl Into<String>) {
        self.skipped.push(
            Diagnostic::new(
                DiagnosticKind::SkippedVariable,
                format!("{} (in {})", reason.into(), self.document),
            )
            .with_subject(subject),
        );
    }

    fn read_variable(&mut self, index: usize, variable: &Value) -> Option<NormalizedVariable> {
        let Some(path) = variable.get("name").and_then(Value::as_str) else {
            self.skip(&format!("#{}", index), "variable has no name");
            return None;
        };

        let kind_name = variable
            .get("type")
            .or_else(|| variable.get("resolvedType"))
            .and_then(Value::as_str);
        let kind = match kind_name.map(str::to_ascii_uppercase).as_deref() {
            Some("COLOR") => VariableKind::Color,
            Some("FLOAT") | Some("NUMBER") => VariableKind::Number,
            Some("STRING") => VariableKind::Text,
            Some(other) => {
                self.skip(path, format!("unsupported type '{}'", other));
                return None;
            }
            None => {
                self.skip(path, "variable has no type");
                return None;
            }
        };

        let (form, by_mode) = if let Some(map) = variable.get("resolvedValuesByMode") {
            (VariableForm::Semantic, map)
        } else if let Some(map) = variable.get("valuesByMode") {
            (VariableForm::Primitive, map)
        } else {
            self.skip(path, "variable has neither valuesByMode nor resolvedValuesByMode");
            return None;
        };
        let Some(by_mode) = by_mode.as_object() else {
            self.skip(path, "mode values must be an object");
            return None;
        };

        let values: Vec<ModeEntry> = by_mode
            .iter()
            .filter_map(|(key, raw)| {
                // Some exporters annotate plain mode values with the alias
                // they came from, so both forms accept the resolved shape
                let value = read_resolved(kind, raw)?;
                Some(ModeEntry {
                    mode: self.modes.resolve(key),
                    value,
                })
            })
            .collect();

        if values.is_empty() {
            self.skip(path, "no usable value in any mode");
            return None;
        }

        let classified = classify_path(path, kind);
        if classified.slug.is_empty() {
            self.skip(path, "name has no usable characters");
            return None;
        }

        Some(NormalizedVariable {
            id: variable.get("id").and_then(Value::as_str).map(str::to_string),
            path: path.to_string(),
            category: classified.category,
            slug: classified.slug,
            named: classified.named,
            kind,
            form,
            values,
        })
    }
}

/// A `valuesByMode` entry: a literal or a `VARIABLE_ALIAS` object
fn read_mode_value(kind: VariableKind, value: &Value) -> Option<ResolvedValue> {
    if let Some(id) = alias_id(value) {
        return Some(ResolvedValue {
            variable_id: Some(id),
            ..Default::default()
        });
    }
    read_raw(kind, value).map(ResolvedValue::raw)
}

/// A mode entry: `{resolvedValue, aliasName, variableId}` or a bare value
fn read_resolved(kind: VariableKind, value: &Value) -> Option<ResolvedValue> {
    let Some(object) = value.as_object() else {
        return read_mode_value(kind, value);
    };
    let has_resolved_keys = RAW_VALUE_KEYS
        .iter()
        .chain(ALIAS_ID_KEYS.iter())
        .chain(["aliasName"].iter())
        .any(|key| object.contains_key(*key));
    if !has_resolved_keys {
        return read_mode_value(kind, value);
    }

    let raw = RAW_VALUE_KEYS
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(|v| read_raw(kind, v));
    let alias_name = object
        .get("aliasName")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);
    let variable_id = ALIAS_ID_KEYS.iter().find_map(|key| match object.get(*key) {
        Some(Value::String(id)) => Some(id.clone()),
        Some(other) => alias_id(other),
        None => None,
    });

    let resolved = ResolvedValue {
        raw,
        alias_name,
        variable_id,
    };
    (!resolved.is_empty()).then_some(resolved)
}

fn alias_id(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if object.get("type").and_then(Value::as_str) != Some("VARIABLE_ALIAS") {
        return None;
    }
    object.get("id").and_then(Value::as_str).map(str::to_string)
}

fn read_raw(kind: VariableKind, value: &Value) -> Option<RawValue> {
    match (kind, value) {
        (VariableKind::Color, Value::Object(o)) => {
            let channel = |key: &str| o.get(key).and_then(Value::as_f64);
            Some(RawValue::Color(RawColor::new(
                channel("r")?,
                channel("g")?,
                channel("b")?,
                channel("a").unwrap_or(1.0),
            )))
        }
        (VariableKind::Color, Value::String(s)) => RawColor::from_hex(s.trim()).map(RawValue::Color),
        (VariableKind::Number, Value::Number(n)) => n.as_f64().map(RawValue::Number),
        (VariableKind::Number, Value::String(s)) => s
            .trim()
            .trim_end_matches("px")
            .parse::<f64>()
            .ok()
            .map(RawValue::Number),
        (VariableKind::Text, Value::String(s)) => Some(RawValue::Text(s.clone())),
        (VariableKind::Text, Value::Number(n)) => Some(RawValue::Text(n.to_string())),
        _ => None,
    }
}
