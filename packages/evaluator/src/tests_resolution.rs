//! Token resolution tests: grouping by mode, collapsing, fluid and
//! light-dark values, synthesis
use crate::*;
use serde_json::{json, Value};
use tokensmith_common::DiagnosticKind;
use tokensmith_parser::{parse_document_value, ModeId, TokenDocument};

fn doc(name: &str, mode: Option<ModeId>, value: Value) -> TokenDocument {
    parse_document_value(name, &value, mode).expect("valid document")
}

fn semantic(name: &str, kind: &str, value: Value) -> Value {
    json!({ "name": name, "type": kind, "resolvedValuesByMode": { "m": value } })
}

fn evaluate(documents: &[TokenDocument]) -> ThemeModel {
    Evaluator::new().evaluate(documents, &[]).expect("evaluation")
}

fn evaluate_with(documents: &[TokenDocument], options: CompileOptions) -> ThemeModel {
    Evaluator::with_options(options)
        .evaluate(documents, &[])
        .expect("evaluation")
}

fn token(model: &ThemeModel, name: &str) -> String {
    model
        .tokens
        .get(name)
        .unwrap_or_else(|| panic!("missing token {}", name))
        .value
        .to_string()
}

fn count(model: &ThemeModel, kind: DiagnosticKind) -> usize {
    model.diagnostics.iter().filter(|d| d.kind == kind).count()
}

fn rgb(r: f64, g: f64, b: f64) -> Value {
    json!({ "r": r, "g": g, "b": b, "a": 1 })
}

fn appearance_docs(light: Value, dark: Value) -> Vec<TokenDocument> {
    vec![
        doc("light.json", Some(ModeId::Light), json!({ "variables": [light] })),
        doc("dark.json", Some(ModeId::Dark), json!({ "variables": [dark] })),
    ]
}

#[cfg(test)]
mod appearance_tests {
    use super::*;

    #[test]
    fn test_light_dark_token() {
        let docs = appearance_docs(
            semantic("surface/card", "COLOR", json!({ "resolvedValue": rgb(1.0, 1.0, 1.0), "aliasName": "color/white" })),
            semantic("surface/card", "COLOR", json!({ "resolvedValue": rgb(0.07, 0.09, 0.15), "aliasName": "color/gray/900" })),
        );
        let model = evaluate(&docs);
        assert_eq!(
            token(&model, "--surface-card"),
            "light-dark(var(--color-white), var(--color-gray-900))"
        );
        assert_eq!(model.tokens.get("--surface-card").unwrap().origin, TokenOrigin::Project);
    }

    #[test]
    fn test_identical_modes_collapse_to_alias() {
        let value = json!({ "resolvedValue": rgb(1.0, 1.0, 1.0), "aliasName": "color/white" });
        let docs = appearance_docs(
            semantic("surface/card", "COLOR", value.clone()),
            semantic("surface/card", "COLOR", value),
        );

        // Re-running on the same input never produces a token
        for _ in 0..2 {
            let model = evaluate(&docs);
            assert!(model.tokens.get("--surface-card").is_none());
            let alias = model.primitives.get("--surface-card").unwrap();
            assert_eq!(alias.origin, Origin::Alias);
            assert_eq!(alias.value.to_string(), "var(--color-white)");
            assert_eq!(count(&model, DiagnosticKind::RedundantToken), 1);
        }
    }

    #[test]
    fn test_bare_colors_reuse_or_synthesize() {
        let docs = appearance_docs(
            semantic("accent", "COLOR", json!({ "resolvedValue": rgb(0.2, 0.4, 0.6) })),
            semantic("accent", "COLOR", json!({ "resolvedValue": rgb(1.0, 1.0, 1.0) })),
        );
        let model = evaluate(&docs);
        assert_eq!(
            token(&model, "--accent"),
            "light-dark(var(--color-336699), var(--color-white))"
        );
        assert_eq!(
            model.primitives.get("--color-336699").unwrap().origin,
            Origin::Synthesized
        );
    }

    #[test]
    fn test_missing_alias_target_synthesized_under_alias_name() {
        let docs = appearance_docs(
            semantic("link", "COLOR", json!({ "resolvedValue": rgb(0.0, 0.4, 1.0), "aliasName": "color/brand/500" })),
            semantic("link", "COLOR", json!({ "resolvedValue": rgb(1.0, 1.0, 1.0), "aliasName": "color/white" })),
        );
        let model = evaluate(&docs);
        assert_eq!(token(&model, "--link"), "light-dark(var(--color-brand-500), var(--color-white))");
        assert_eq!(
            model.primitives.get("--color-brand-500").unwrap().origin,
            Origin::Synthesized
        );
    }

    #[test]
    fn test_without_synthesis_literals_are_kept() {
        let docs = appearance_docs(
            semantic("accent", "COLOR", json!({ "resolvedValue": rgb(1.0, 0.0, 0.0) })),
            semantic("accent", "COLOR", json!({ "resolvedValue": rgb(1.0, 1.0, 1.0) })),
        );
        let options = CompileOptions {
            synthesize_project_primitives: false,
            ..Default::default()
        };
        let model = evaluate_with(&docs, options);
        assert_eq!(
            token(&model, "--accent"),
            "light-dark(oklch(0.628 0.2577 29.2339), var(--color-white))"
        );
        assert!(model.primitives.iter().all(|p| p.origin != Origin::Synthesized));
    }

    #[test]
    fn test_token_reading_token_stays_a_token() {
        let card = json!({ "resolvedValue": rgb(1.0, 1.0, 1.0), "aliasName": "color/white" });
        let card_dark = json!({ "resolvedValue": rgb(0.0, 0.0, 0.0), "aliasName": "color/black" });
        let button = json!({ "resolvedValue": rgb(1.0, 1.0, 1.0), "aliasName": "surface/card" });
        let docs = vec![
            doc(
                "light.json",
                Some(ModeId::Light),
                json!({ "variables": [semantic("surface/card", "COLOR", card), semantic("button/bg", "COLOR", button.clone())] }),
            ),
            doc(
                "dark.json",
                Some(ModeId::Dark),
                json!({ "variables": [semantic("surface/card", "COLOR", card_dark), semantic("button/bg", "COLOR", button)] }),
            ),
        ];
        let model = evaluate(&docs);
        assert_eq!(token(&model, "--button-bg"), "var(--surface-card)");
        assert!(model.primitives.get("--button-bg").is_none());
    }
}

#[cfg(test)]
mod viewport_tests {
    use super::*;

    fn sizes(mobile: Vec<Value>, desktop: Vec<Value>) -> Vec<TokenDocument> {
        vec![
            doc("sizes.mobile.json", Some(ModeId::Mobile), json!({ "variables": mobile })),
            doc("sizes.desktop.json", Some(ModeId::Desktop), json!({ "variables": desktop })),
        ]
    }

    fn size(name: &str, px: f64, alias: Option<&str>) -> Value {
        let mut value = json!({ "resolvedValue": px });
        if let Some(alias) = alias {
            value["aliasName"] = json!(alias);
        }
        semantic(name, "FLOAT", value)
    }

    #[test]
    fn test_font_size_clamp() {
        let docs = sizes(
            vec![size("FontSize/m", 16.0, Some("FontSize/text-16"))],
            vec![size("FontSize/m", 18.0, Some("FontSize/text-18"))],
        );
        let model = evaluate(&docs);
        assert_eq!(
            token(&model, "--text-m"),
            "clamp(var(--text-16), 0.951rem + 0.2174vw, var(--text-18))"
        );
        assert_eq!(model.tokens.get("--text-m").unwrap().origin, TokenOrigin::Project);
    }

    #[test]
    fn test_single_mode_font_token_is_mirrored() {
        let docs = sizes(
            vec![
                size("FontSize/m", 16.0, Some("FontSize/text-16")),
                size("FontSize/l", 18.0, None),
            ],
            vec![size("FontSize/l", 24.0, None)],
        );
        let model = evaluate(&docs);

        let mirrored = model.primitives.get("--text-m").unwrap();
        assert_eq!(mirrored.value.to_string(), "var(--text-16)");
        assert_eq!(count(&model, DiagnosticKind::MissingModeVariant), 1);
        assert_eq!(count(&model, DiagnosticKind::RedundantToken), 0);
        assert!(model.tokens.get("--text-m").is_none());
        assert_eq!(
            token(&model, "--text-l"),
            "clamp(var(--text-18), 0.978rem + 0.6522vw, var(--text-24))"
        );
    }

    #[test]
    fn test_per_mode_primitive_dumps_become_fluid_token() {
        let hero = |px: f64| {
            json!({ "variables": [{ "name": "FontSize/hero", "type": "FLOAT", "valuesByMode": { "1:0": px } }] })
        };
        let docs = vec![
            doc("sizes.mobile.json", Some(ModeId::Mobile), hero(20.0)),
            doc("sizes.desktop.json", Some(ModeId::Desktop), hero(40.0)),
        ];
        let model = evaluate(&docs);

        assert!(model.primitives.get("--text-hero").is_none());
        let hero = model.tokens.get("--text-hero").expect("fluid token");
        assert!(hero.value.is_clamp(), "{}", hero.value);
        assert_eq!(hero.origin, TokenOrigin::Project);
    }

    #[test]
    fn test_per_mode_primitive_dumps_with_same_value_stay_primitive() {
        let gutter = json!({ "variables": [{ "name": "spacing/gutter", "type": "FLOAT", "valuesByMode": { "1:0": 20 } }] });
        let docs = vec![
            doc("sizes.mobile.json", Some(ModeId::Mobile), gutter.clone()),
            doc("sizes.desktop.json", Some(ModeId::Desktop), gutter),
        ];
        let model = evaluate(&docs);

        assert_eq!(model.primitives.get("--spacing-gutter").unwrap().value.to_string(), "1.25rem");
        assert!(model.tokens.get("--spacing-gutter").is_none());
    }

    #[test]
    fn test_same_px_different_names_collapse_numerically() {
        let primitives = doc(
            "primitives.json",
            None,
            json!({ "variables": [{ "name": "spacing/base", "type": "FLOAT", "valuesByMode": { "1:0": 16 } }] }),
        );
        let mut docs = sizes(
            vec![size("Spacing/gutter", 16.0, Some("Spacing/16"))],
            vec![size("Spacing/gutter", 16.0, Some("spacing/base"))],
        );
        docs.insert(0, primitives);
        let model = evaluate(&docs);

        let collapsed = model.primitives.get("--spacing-gutter").unwrap();
        assert_eq!(collapsed.value.to_string(), "1rem");
        assert_eq!(collapsed.origin, Origin::Alias);
        assert_eq!(count(&model, DiagnosticKind::RedundantTokenNumeric), 1);
    }

    #[test]
    fn test_unknown_sizes_synthesize_primitives() {
        let docs = sizes(
            vec![size("Spacing/huge", 100.0, None)],
            vec![size("Spacing/huge", 140.0, None)],
        );
        let model = evaluate(&docs);
        assert_eq!(
            token(&model, "--spacing-huge"),
            "clamp(var(--spacing-100), 5.272rem + 4.3478vw, var(--spacing-140))"
        );
        assert_eq!(
            model.primitives.get("--spacing-100").unwrap().value.to_string(),
            "6.25rem"
        );

        let options = CompileOptions {
            synthesize_project_primitives: false,
            ..Default::default()
        };
        let model = evaluate_with(&docs, options);
        assert_eq!(
            token(&model, "--spacing-huge"),
            "clamp(6.25rem, 5.272rem + 4.3478vw, 8.75rem)"
        );
        assert!(model.primitives.get("--spacing-100").is_none());
    }

    #[test]
    fn test_text_values_are_not_interpolated() {
        let docs = sizes(
            vec![semantic("font/heading", "STRING", json!({ "resolvedValue": "Inter" }))],
            vec![semantic("font/heading", "STRING", json!({ "resolvedValue": "Inter Display" }))],
        );
        let model = evaluate(&docs);
        assert_eq!(count(&model, DiagnosticKind::NonInterpolableToken), 1);
        assert_eq!(
            model.primitives.get("--font-heading").unwrap().value.to_string(),
            "Inter"
        );
    }
}

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[test]
    fn test_mixed_axes_dropped() {
        let docs = vec![
            doc("light.json", Some(ModeId::Light), json!({ "variables": [semantic("inset/card", "FLOAT", json!({ "resolvedValue": 8 }))] })),
            doc("mobile.json", Some(ModeId::Mobile), json!({ "variables": [semantic("inset/card", "FLOAT", json!({ "resolvedValue": 12 }))] })),
        ];
        let model = evaluate(&docs);
        assert_eq!(count(&model, DiagnosticKind::MixedAxisModes), 1);
        assert!(model.tokens.get("--inset-card").is_none());
        assert!(model.primitives.get("--inset-card").is_none());
    }

    #[test]
    fn test_unresolvable_token_is_malformed() {
        let docs = appearance_docs(
            semantic("Spacing/ghost", "FLOAT", json!({ "aliasName": "Spacing/nowhere" })),
            semantic("Spacing/ghost", "FLOAT", json!({ "aliasName": "Spacing/elsewhere" })),
        );
        let model = evaluate(&docs);
        assert_eq!(count(&model, DiagnosticKind::MalformedToken), 1);
        assert!(model.tokens.get("--spacing-ghost").is_none());
    }

    #[test]
    fn test_token_cannot_redefine_primitive() {
        let docs = appearance_docs(
            semantic("color/white", "COLOR", json!({ "resolvedValue": rgb(1.0, 1.0, 0.9) })),
            semantic("color/white", "COLOR", json!({ "resolvedValue": rgb(0.0, 0.0, 0.0) })),
        );
        let model = evaluate(&docs);
        assert_eq!(count(&model, DiagnosticKind::TokenShadowsPrimitive), 1);
        assert_eq!(
            model.primitives.get("--color-white").unwrap().value.to_string(),
            "oklch(1 0 0)"
        );
        assert!(model.tokens.get("--color-white").is_none());
    }

    #[test]
    fn test_out_of_range_color_reported() {
        let docs = appearance_docs(
            semantic("accent", "COLOR", json!({ "resolvedValue": rgb(1.5, 0.0, 0.0) })),
            semantic("accent", "COLOR", json!({ "resolvedValue": rgb(1.0, 1.0, 1.0) })),
        );
        let model = evaluate(&docs);
        assert_eq!(count(&model, DiagnosticKind::InvalidColor), 1);
        assert_eq!(count(&model, DiagnosticKind::MissingModeVariant), 1);
        assert_eq!(model.primitives.get("--accent").unwrap().value.to_string(), "var(--color-white)");
    }
}
