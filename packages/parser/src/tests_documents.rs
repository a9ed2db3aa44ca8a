use crate::*;
use serde_json::json;
use tokensmith_common::DiagnosticKind;

#[test]
fn test_primitive_export() {
    let source = r#"{
        "variables": [
            { "name": "color/gray/900", "type": "COLOR",
              "valuesByMode": { "1:0": { "r": 0.07, "g": 0.09, "b": 0.15, "a": 1 } } },
            { "name": "Spacing/16", "type": "FLOAT", "valuesByMode": { "1:0": 16 } }
        ]
    }"#;
    let doc = parse_document("primitives.json", source, None).unwrap();
    assert_eq!(doc.variables.len(), 2);
    assert!(doc.skipped.is_empty());

    let gray = &doc.variables[0];
    assert_eq!(gray.primitive_name(), "--color-gray-900");
    assert_eq!(gray.form, VariableForm::Primitive);
    assert_eq!(gray.values[0].mode, None);

    let spacing = &doc.variables[1];
    assert_eq!(spacing.category, Category::Spacing);
    assert_eq!(
        spacing.values[0].value.raw,
        Some(RawValue::Number(16.0))
    );
}

#[test]
fn test_semantic_export_with_mode_labels() {
    let value = json!({
        "modes": { "m1": "Light Mode", "m2": "Dark Mode" },
        "variables": [{
            "name": "surface/default",
            "resolvedType": "COLOR",
            "resolvedValuesByMode": {
                "m1": { "resolvedValue": { "r": 1, "g": 1, "b": 1 }, "aliasName": "color/white" },
                "m2": { "resolvedValue": { "r": 0, "g": 0, "b": 0 }, "aliasName": "color/black" }
            }
        }]
    });
    let doc = parse_document_value("tokens.json", &value, None).unwrap();
    let surface = &doc.variables[0];
    assert_eq!(surface.form, VariableForm::Semantic);
    assert_eq!(surface.token_name(), "--surface-default");
    let modes: Vec<_> = surface.values.iter().map(|e| e.mode).collect();
    assert_eq!(modes, vec![Some(ModeId::Light), Some(ModeId::Dark)]);
    assert_eq!(surface.values[1].value.alias_name.as_deref(), Some("color/black"));
    assert_eq!(
        surface.values[0].value.raw,
        Some(RawValue::Color(RawColor::new(1.0, 1.0, 1.0, 1.0)))
    );
}

#[test]
fn test_document_mode_tags_unknown_keys() {
    let value = json!({
        "variables": [{
            "name": "FontSize/m",
            "type": "FLOAT",
            "resolvedValuesByMode": { "1:0": { "resolvedValue": 16, "aliasName": "FontSize/text-16" } }
        }]
    });
    let doc = parse_document_value("sizes.mobile.json", &value, Some(ModeId::Mobile)).unwrap();
    assert_eq!(doc.mode, Some(ModeId::Mobile));
    assert_eq!(doc.variables[0].values[0].mode, Some(ModeId::Mobile));
    assert_eq!(doc.variables[0].token_name(), "--text-m");

    let value = json!({ "mode": "Desktop", "variables": value["variables"].clone() });
    let doc = parse_document_value("sizes.json", &value, None).unwrap();
    assert_eq!(doc.variables[0].values[0].mode, Some(ModeId::Desktop));
}

#[test]
fn test_variable_alias_objects() {
    let value = json!({
        "variables": [{
            "id": "VariableID:1",
            "name": "color/brand",
            "type": "COLOR",
            "valuesByMode": { "light": { "type": "VARIABLE_ALIAS", "id": "VariableID:7" } }
        }]
    });
    let doc = parse_document_value("aliases.json", &value, None).unwrap();
    let entry = &doc.variables[0].values[0];
    assert_eq!(entry.mode, Some(ModeId::Light));
    assert_eq!(entry.value.variable_id.as_deref(), Some("VariableID:7"));
    assert_eq!(entry.value.raw, None);
    assert_eq!(doc.variables[0].id.as_deref(), Some("VariableID:1"));
}

#[test]
fn test_bad_variables_are_skipped_not_fatal() {
    let value = json!({
        "variables": [
            { "name": "ok/one", "type": "FLOAT", "valuesByMode": { "a": 4 } },
            { "name": "no/type", "valuesByMode": { "a": 4 } },
            { "name": "weird", "type": "BOOLEAN", "valuesByMode": { "a": true } },
            { "type": "FLOAT", "valuesByMode": { "a": 4 } },
            { "name": "empty", "type": "COLOR", "valuesByMode": { "a": 12 } },
            { "name": "nothing", "type": "FLOAT" }
        ]
    });
    let doc = parse_document_value("mixed.json", &value, None).unwrap();
    assert_eq!(doc.variables.len(), 1);
    assert_eq!(doc.skipped.len(), 5);
    assert!(doc
        .skipped
        .iter()
        .all(|d| d.kind == DiagnosticKind::SkippedVariable));
}

#[test]
fn test_document_errors() {
    assert!(matches!(
        parse_document("broken.json", "{ not json", None),
        Err(ParseError::InvalidJson { .. })
    ));
    assert!(matches!(
        parse_document("empty.json", "{}", None),
        Err(ParseError::MissingField { ref field, .. }) if field == "variables"
    ));
    assert!(matches!(
        parse_document("list.json", "[]", None),
        Err(ParseError::InvalidShape { .. })
    ));
}

#[test]
fn test_hex_string_colors_accepted() {
    let value = json!({
        "variables": [{ "name": "brand", "type": "color", "valuesByMode": { "x": "#ff0000" } }]
    });
    let doc = parse_document_value("hex.json", &value, None).unwrap();
    assert_eq!(doc.variables[0].primitive_name(), "--color-brand");
    assert_eq!(
        doc.variables[0].values[0].value.raw,
        Some(RawValue::Color(RawColor::new(1.0, 0.0, 0.0, 1.0)))
    );
}
