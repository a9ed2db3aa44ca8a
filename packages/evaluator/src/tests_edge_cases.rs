//! Edge case tests for evaluator
//! Boundary conditions, invalid options and unusual inputs
use crate::*;
use serde_json::json;
use tokensmith_common::DiagnosticKind;
use tokensmith_parser::{parse_document_value, parse_reference_sheet, ModeId};

#[cfg(test)]
mod edge_case_tests {
    use super::*;

    #[test]
    fn test_inverted_fluid_window_is_an_error() {
        let options = CompileOptions {
            fluid: FluidWindow {
                min_viewport: 1280.0,
                max_viewport: 360.0,
            },
            ..Default::default()
        };
        let result = Evaluator::with_options(options).evaluate(&[], &[]);
        assert_eq!(
            result.unwrap_err(),
            EvalError::InvalidFluidWindow {
                min: 1280.0,
                max: 360.0
            }
        );
    }

    #[test]
    fn test_custom_fluid_window() {
        let mobile = json!({ "variables": [
            { "name": "Spacing/card", "type": "FLOAT", "resolvedValuesByMode": { "1:0": { "resolvedValue": 16 } } }
        ] });
        let desktop = json!({ "variables": [
            { "name": "Spacing/card", "type": "FLOAT", "resolvedValuesByMode": { "1:0": { "resolvedValue": 32 } } }
        ] });
        let docs = vec![
            parse_document_value("mobile.json", &mobile, Some(ModeId::Mobile)).unwrap(),
            parse_document_value("desktop.json", &desktop, Some(ModeId::Desktop)).unwrap(),
        ];
        let options = CompileOptions {
            fluid: FluidWindow {
                min_viewport: 400.0,
                max_viewport: 1200.0,
            },
            ..Default::default()
        };
        let model = Evaluator::with_options(options).evaluate(&docs, &[]).unwrap();

        assert_eq!(
            model.tokens.get("--spacing-card").unwrap().value.to_string(),
            "clamp(var(--spacing-16), 0.5rem + 2vw, var(--spacing-32))"
        );
        assert_eq!(
            model.primitives.get("--breakpoint-mobile").unwrap().value.to_string(),
            "400px"
        );
    }

    #[test]
    fn test_shrinking_value_keeps_ordered_bounds() {
        let mobile = json!({ "variables": [
            { "name": "Spacing/hero", "type": "FLOAT", "resolvedValuesByMode": { "1:0": { "resolvedValue": 24 } } }
        ] });
        let desktop = json!({ "variables": [
            { "name": "Spacing/hero", "type": "FLOAT", "resolvedValuesByMode": { "1:0": { "resolvedValue": 16 } } }
        ] });
        let docs = vec![
            parse_document_value("mobile.json", &mobile, Some(ModeId::Mobile)).unwrap(),
            parse_document_value("desktop.json", &desktop, Some(ModeId::Desktop)).unwrap(),
        ];
        let model = Evaluator::new().evaluate(&docs, &[]).unwrap();
        assert_eq!(
            model.tokens.get("--spacing-hero").unwrap().value.to_string(),
            "clamp(var(--spacing-16), 1.696rem - 0.8696vw, var(--spacing-24))"
        );
    }

    #[test]
    fn test_untagged_semantic_becomes_alias() {
        let doc = json!({ "variables": [
            {
                "name": "Spacing/section",
                "type": "FLOAT",
                "resolvedValuesByMode": { "1:0": { "resolvedValue": 24, "aliasName": "Spacing/24" } }
            }
        ] });
        let docs = vec![parse_document_value("semantic.json", &doc, None).unwrap()];
        let model = Evaluator::new().evaluate(&docs, &[]).unwrap();

        let section = model.primitives.get("--spacing-section").unwrap();
        assert_eq!(section.origin, Origin::Alias);
        assert_eq!(section.value.to_string(), "var(--spacing-24)");
        assert!(model.tokens.get("--spacing-section").is_none());
        assert!(model.diagnostics.is_empty(), "{:?}", model.diagnostics);
    }

    #[test]
    fn test_untagged_values_that_differ_are_reported() {
        let doc = json!({ "variables": [
            {
                "name": "Spacing/gutter",
                "type": "FLOAT",
                "resolvedValuesByMode": {
                    "1:0": { "resolvedValue": 16, "aliasName": "Spacing/16" },
                    "1:1": { "resolvedValue": 32, "aliasName": "Spacing/32" }
                }
            }
        ] });
        let docs = vec![parse_document_value("semantic.json", &doc, None).unwrap()];
        let model = Evaluator::new().evaluate(&docs, &[]).unwrap();

        let gutter = model.primitives.get("--spacing-gutter").unwrap();
        assert_eq!(gutter.value.to_string(), "var(--spacing-16)");
        let ambiguous: Vec<_> = model
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::AmbiguousModes)
            .collect();
        assert_eq!(ambiguous.len(), 1);
        assert_eq!(ambiguous[0].subject.as_deref(), Some("--spacing-gutter"));
    }

    #[test]
    fn test_skipped_variables_reported() {
        let doc = json!({ "variables": [
            { "name": "flags/beta", "type": "BOOLEAN", "valuesByMode": { "1:0": true } },
            { "type": "COLOR", "valuesByMode": { "1:0": "#ffffff" } },
            { "name": "color/ok", "type": "COLOR", "valuesByMode": { "1:0": "#ffffff" } }
        ] });
        let docs = vec![parse_document_value("primitives.json", &doc, None).unwrap()];
        let model = Evaluator::new().evaluate(&docs, &[]).unwrap();

        let skipped = model
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::SkippedVariable)
            .count();
        assert_eq!(skipped, 2);
        assert!(model.primitives.contains("--color-ok"));
    }

    #[test]
    fn test_dangling_references_pruned_transitively() {
        let sheet = parse_reference_sheet(
            "reference.css",
            ":root { --color-broken: var(--color-missing); --color-uses-broken: var(--color-broken); }",
        )
        .unwrap();
        let model = Evaluator::new().evaluate(&[], &[sheet]).unwrap();

        assert!(!model.primitives.contains("--color-broken"));
        assert!(!model.primitives.contains("--color-uses-broken"));
        let unresolved: Vec<_> = model
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::UnresolvedAlias)
            .filter_map(|d| d.subject.as_deref())
            .collect();
        assert_eq!(unresolved, vec!["--color-broken", "--color-uses-broken"]);
    }

    #[test]
    fn test_single_theme_collapses_light_dark() {
        let light = json!({ "variables": [
            { "name": "surface/card", "type": "COLOR", "resolvedValuesByMode": { "1:0": { "resolvedValue": "#ffffff", "aliasName": "color/white" } } }
        ] });
        let dark = json!({ "variables": [
            { "name": "surface/card", "type": "COLOR", "resolvedValuesByMode": { "1:0": { "resolvedValue": "#000000", "aliasName": "color/black" } } }
        ] });
        let docs = vec![
            parse_document_value("light.json", &light, Some(ModeId::Light)).unwrap(),
            parse_document_value("dark.json", &dark, Some(ModeId::Dark)).unwrap(),
        ];
        let options = CompileOptions {
            theme_mode: ThemeMode::Dark,
            ..Default::default()
        };
        let model = Evaluator::with_options(options).evaluate(&docs, &[]).unwrap();

        let card = model.tokens.get("--surface-card").unwrap();
        assert_eq!(card.value.to_string(), "var(--color-black)");
        assert_eq!(card.axis, None);
        assert_eq!(
            model.tokens.get("--surface").unwrap().value.to_string(),
            "var(--color-gray-950)"
        );
        assert_eq!(model.summary.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn test_mode_labels_from_document() {
        let doc = json!({
            "modes": { "1:0": "Light", "1:1": "Dark Mode" },
            "variables": [
                {
                    "name": "surface/raised",
                    "type": "COLOR",
                    "resolvedValuesByMode": {
                        "1:0": { "resolvedValue": "#ffffff", "aliasName": "color/white" },
                        "1:1": { "resolvedValue": "#111827", "aliasName": "color/gray/900" }
                    }
                }
            ]
        });
        let docs = vec![parse_document_value("theme.json", &doc, None).unwrap()];
        let model = Evaluator::new().evaluate(&docs, &[]).unwrap();
        assert_eq!(
            model.tokens.get("--surface-raised").unwrap().value.to_string(),
            "light-dark(var(--color-white), var(--color-gray-900))"
        );
    }

    #[test]
    fn test_summary_echoes_options() {
        let options = CompileOptions {
            typo_responsive: false,
            spacing_responsive: false,
            ..Default::default()
        };
        let model = Evaluator::with_options(options).evaluate(&[], &[]).unwrap();
        assert!(!model.summary.typo_responsive);
        assert!(!model.summary.spacing_responsive);
        assert_eq!(model.summary.theme_mode, ThemeMode::Both);
        assert!(model.tokens.iter().all(|t| !t.value.is_clamp()));
    }
}
