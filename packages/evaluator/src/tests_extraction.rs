//! Primitive namespace tests: documents, reference sheets, custom colors
//! and built-in defaults
use crate::*;
use serde_json::{json, Value};
use tokensmith_common::DiagnosticKind;
use tokensmith_parser::{parse_document_value, parse_reference_sheet, ModeId, ReferenceSheet, TokenDocument};

fn primitives_doc(variables: Value) -> TokenDocument {
    parse_document_value("primitives.json", &json!({ "variables": variables }), None)
        .expect("valid document")
}

fn value_of(model: &ThemeModel, name: &str) -> String {
    model
        .primitives
        .get(name)
        .unwrap_or_else(|| panic!("missing primitive {}", name))
        .value
        .to_string()
}

fn sheet(source: &str) -> ReferenceSheet {
    parse_reference_sheet("reference.css", source).expect("valid sheet")
}

#[test]
fn test_empty_input_still_has_defaults() {
    let model = Evaluator::new().evaluate(&[], &[]).unwrap();

    assert_eq!(value_of(&model, "--color-white"), "oklch(1 0 0)");
    assert_eq!(value_of(&model, "--spacing-16"), "1rem");
    assert_eq!(value_of(&model, "--text-16"), "1rem");
    assert_eq!(value_of(&model, "--radius-full"), "9999px");
    assert_eq!(value_of(&model, "--breakpoint-desktop"), "1280px");

    let spacing = model.tokens.get("--spacing-m").unwrap();
    assert_eq!(
        spacing.value.to_string(),
        "clamp(var(--spacing-16), 0.804rem + 0.8696vw, var(--spacing-24))"
    );
    assert_eq!(spacing.origin, TokenOrigin::Global);
    assert_eq!(
        model.tokens.get("--surface").unwrap().value.to_string(),
        "light-dark(var(--color-white), var(--color-gray-950))"
    );
    assert!(model.diagnostics.is_empty(), "{:?}", model.diagnostics);
    assert_eq!(model.summary.primary_color, None);
}

#[test]
fn test_document_units_per_category() {
    let doc = primitives_doc(json!([
        { "name": "spacing/gutter", "type": "FLOAT", "valuesByMode": { "1:0": 20 } },
        { "name": "zIndex/modal", "type": "FLOAT", "valuesByMode": { "1:0": 500 } },
        { "name": "duration/fast", "type": "FLOAT", "valuesByMode": { "1:0": 120 } },
        { "name": "fontWeight/heavy", "type": "FLOAT", "valuesByMode": { "1:0": 800 } },
        { "name": "radius/pill", "type": "FLOAT", "valuesByMode": { "1:0": 9999 } },
        { "name": "opacity/disabled", "type": "FLOAT", "valuesByMode": { "1:0": 8 } }
    ]));
    let model = Evaluator::new().evaluate(&[doc], &[]).unwrap();

    assert_eq!(value_of(&model, "--spacing-gutter"), "1.25rem");
    assert_eq!(value_of(&model, "--z-modal"), "500");
    assert_eq!(value_of(&model, "--transition-fast"), "120ms");
    assert_eq!(value_of(&model, "--font-weight-heavy"), "800");
    assert_eq!(value_of(&model, "--opacity-disabled"), "0.5rem");

    let full = model.primitives.get("--radius-full").unwrap();
    assert_eq!(full.origin, Origin::Imported);
    assert_eq!(full.value.to_string(), "9999px");
    assert!(model.primitives.get("--radius-pill").is_none());
}

#[test]
fn test_variable_alias_by_id() {
    let doc = primitives_doc(json!([
        {
            "id": "VariableID:1:1",
            "name": "color/blue/500",
            "type": "COLOR",
            "valuesByMode": { "1:0": { "r": 0, "g": 0, "b": 1, "a": 1 } }
        },
        {
            "id": "VariableID:1:2",
            "name": "color/brand",
            "type": "COLOR",
            "valuesByMode": { "1:0": { "type": "VARIABLE_ALIAS", "id": "VariableID:1:1" } }
        }
    ]));
    let model = Evaluator::new().evaluate(&[doc], &[]).unwrap();

    assert_eq!(value_of(&model, "--color-blue-500"), "oklch(0.452 0.3132 264.052)");
    assert_eq!(value_of(&model, "--color-brand"), "var(--color-blue-500)");
}

#[test]
fn test_alias_to_unknown_id_is_dropped() {
    let doc = primitives_doc(json!([
        {
            "name": "color/ghost",
            "type": "COLOR",
            "valuesByMode": { "1:0": { "type": "VARIABLE_ALIAS", "id": "VariableID:404" } }
        }
    ]));
    let model = Evaluator::new().evaluate(&[doc], &[]).unwrap();

    assert!(model.primitives.get("--color-ghost").is_none());
    assert!(model
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::UnresolvedAlias
            && d.subject.as_deref() == Some("--color-ghost")));
}

#[test]
fn test_alias_falls_back_to_exported_value() {
    let doc = primitives_doc(json!([
        {
            "name": "color/link",
            "type": "COLOR",
            "valuesByMode": { "1:0": { "value": "#ff0000", "aliasName": "color/brand/500" } }
        },
        {
            "name": "color/ink",
            "type": "COLOR",
            "valuesByMode": { "1:0": { "value": "#111827", "aliasName": "color/gray/900" } }
        }
    ]));
    let model = Evaluator::new().evaluate(&[doc], &[]).unwrap();

    assert_eq!(value_of(&model, "--color-link"), "oklch(0.628 0.2577 29.2339)");
    assert_eq!(value_of(&model, "--color-ink"), "var(--color-gray-900)");
}

#[test]
fn test_reference_sheet_tokens_and_primitives() {
    let reference = sheet(
        r#"
        /* canonical scale */
        :root {
            --color-brand: #ff0000;
            --spacing-gutter: 20px;
            --spacing-m: clamp(var(--spacing-16), 0.5rem + 2vw, var(--spacing-32));
            --ink: light-dark(var(--color-black), var(--color-white));
        }
        "#,
    );
    let model = Evaluator::new().evaluate(&[], &[reference]).unwrap();

    let brand = model.primitives.get("--color-brand").unwrap();
    assert_eq!(brand.origin, Origin::Reference);
    assert_eq!(brand.value.to_string(), "#ff0000");
    assert_eq!(model.primitives.get("--spacing-gutter").unwrap().px, Some(20.0));

    // The reference clamp replaces the built-in one
    assert_eq!(
        model.tokens.get("--spacing-m").unwrap().value.to_string(),
        "clamp(var(--spacing-16), 0.5rem + 2vw, var(--spacing-32))"
    );
    assert!(model.tokens.get("--ink").unwrap().value.is_light_dark());
}

#[test]
fn test_reference_clamp_fixed_when_spacing_not_responsive() {
    let reference = sheet(":root { --spacing-m: clamp(var(--spacing-16), 0.5rem + 2vw, var(--spacing-32)); }");
    let options = CompileOptions {
        spacing_responsive: false,
        ..Default::default()
    };
    let model = Evaluator::with_options(options)
        .evaluate(&[], &[reference])
        .unwrap();

    let token = model.tokens.get("--spacing-m").unwrap();
    assert_eq!(token.value.to_string(), "var(--spacing-16)");
    assert_eq!(token.axis, None);
    assert!(model.tokens.get("--text-m").unwrap().value.is_clamp());
}

#[test]
fn test_documents_win_over_reference_sheet() {
    let doc = primitives_doc(json!([
        { "name": "color/brand", "type": "COLOR", "valuesByMode": { "1:0": "#0000ff" } }
    ]));
    let reference = sheet(":root { --color-brand: #ff0000; --color-accent: #00ff00; }");
    let model = Evaluator::new().evaluate(&[doc], &[reference]).unwrap();

    assert_eq!(value_of(&model, "--color-brand"), "oklch(0.452 0.3132 264.052)");
    assert_eq!(value_of(&model, "--color-accent"), "#00ff00");
}

#[cfg(test)]
mod custom_color_tests {
    use super::*;

    fn with_colors(text: &str) -> Evaluator {
        Evaluator::with_options(CompileOptions {
            custom_colors_text: text.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_custom_colors_become_primitives() {
        let model = with_colors("// brand\nprimary: #0000ff\naccent = #ff0000\nbad: #12\n")
            .evaluate(&[], &[])
            .unwrap();

        let primary = model.primitives.get("--color-primary").unwrap();
        assert_eq!(primary.origin, Origin::Custom);
        assert_eq!(primary.value.to_string(), "oklch(0.452 0.3132 264.052)");
        assert_eq!(value_of(&model, "--color-accent"), "oklch(0.628 0.2577 29.2339)");
        assert!(model.primitives.get("--color-bad").is_none());
        assert!(model
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::InvalidCustomColor));
        assert_eq!(model.summary.primary_color.as_deref(), Some("primary"));
    }

    #[test]
    fn test_custom_color_overrides_default() {
        let model = with_colors("white: #fefefe").evaluate(&[], &[]).unwrap();
        assert_eq!(model.primitives.get("--color-white").unwrap().origin, Origin::Custom);
    }

    #[test]
    fn test_first_custom_color_is_primary_fallback() {
        let model = with_colors("accent: #ff0000\nbrand: #0000ff")
            .evaluate(&[], &[])
            .unwrap();
        assert_eq!(model.summary.primary_color.as_deref(), Some("accent"));
    }

    #[test]
    fn test_document_primary_color() {
        let doc = primitives_doc(json!([
            { "name": "color/primary", "type": "COLOR", "valuesByMode": { "1:0": "#3366ff" } }
        ]));
        let model = Evaluator::new().evaluate(&[doc], &[]).unwrap();
        assert_eq!(model.summary.primary_color.as_deref(), Some("primary"));
    }

    #[test]
    fn test_tokens_reuse_custom_colors() {
        let light = json!({ "variables": [
            { "name": "accent", "type": "COLOR", "resolvedValuesByMode": { "1:0": { "resolvedValue": { "r": 1, "g": 0, "b": 0, "a": 1 } } } }
        ] });
        let dark = json!({ "variables": [
            { "name": "accent", "type": "COLOR", "resolvedValuesByMode": { "1:0": { "resolvedValue": { "r": 1, "g": 1, "b": 1, "a": 1 } } } }
        ] });
        let docs = vec![
            parse_document_value("light.json", &light, Some(ModeId::Light)).unwrap(),
            parse_document_value("dark.json", &dark, Some(ModeId::Dark)).unwrap(),
        ];
        let model = with_colors("accent: #ff0000").evaluate(&docs, &[]).unwrap();

        assert_eq!(
            model.tokens.get("--accent").unwrap().value.to_string(),
            "light-dark(var(--color-accent), var(--color-white))"
        );
        assert!(model.primitives.get("--color-ff0000").is_none());
    }
}
