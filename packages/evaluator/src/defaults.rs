//! Built-in fallback scales.
//!
//! Inserted after every other source, so anything a project or reference
//! sheet defines wins. With no input at all they still make a complete
//! primitives sheet.

use crate::color::Rgba;
use crate::context::CompileContext;
use crate::fluid::fluid;
use crate::primitives::{Origin, Primitive};
use crate::tokens::{Token, TokenOrigin};
use crate::units::{format_px, px_to_rem, RADIUS_FULL_PX};
use tokensmith_parser::{Category, CssValue};

const COLORS: [(&str, &str); 13] = [
    ("white", "#ffffff"),
    ("black", "#000000"),
    ("gray-50", "#f9fafb"),
    ("gray-100", "#f3f4f6"),
    ("gray-200", "#e5e7eb"),
    ("gray-300", "#d1d5db"),
    ("gray-400", "#9ca3af"),
    ("gray-500", "#6b7280"),
    ("gray-600", "#4b5563"),
    ("gray-700", "#374151"),
    ("gray-800", "#1f2937"),
    ("gray-900", "#111827"),
    ("gray-950", "#030712"),
];

const SPACING_PX: [f64; 15] = [
    0.0, 2.0, 4.0, 8.0, 12.0, 16.0, 20.0, 24.0, 32.0, 40.0, 48.0, 64.0, 80.0, 96.0, 128.0,
];
const RADIUS_PX: [f64; 6] = [2.0, 4.0, 8.0, 12.0, 16.0, 24.0];
const TEXT_PX: [f64; 11] = [12.0, 14.0, 16.0, 18.0, 20.0, 24.0, 30.0, 36.0, 48.0, 60.0, 72.0];
const LINE_HEIGHT_PX: [f64; 8] = [16.0, 20.0, 24.0, 28.0, 32.0, 36.0, 40.0, 48.0];

const FONT_FAMILIES: [(&str, &str); 3] = [
    ("sans", r#"system-ui, -apple-system, "Segoe UI", Roboto, sans-serif"#),
    ("serif", r#"ui-serif, Georgia, Cambria, "Times New Roman", serif"#),
    ("mono", "ui-monospace, SFMono-Regular, Menlo, Consolas, monospace"),
];
const FONT_WEIGHTS: [(&str, u32); 4] =
    [("regular", 400), ("medium", 500), ("semibold", 600), ("bold", 700)];
const Z_LAYERS: [(&str, u32); 5] =
    [("base", 0), ("dropdown", 100), ("overlay", 200), ("modal", 300), ("toast", 400)];
const TRANSITIONS: [(&str, u32); 3] = [("fast", 150), ("base", 250), ("slow", 400)];

/// Fluid spacing tokens: (name, mobile px, desktop px)
const SPACING_TOKENS: [(&str, f64, f64); 5] = [
    ("xs", 4.0, 8.0),
    ("s", 8.0, 12.0),
    ("m", 16.0, 24.0),
    ("l", 24.0, 40.0),
    ("xl", 32.0, 64.0),
];
const TEXT_TOKENS: [(&str, f64, f64); 5] = [
    ("s", 14.0, 16.0),
    ("m", 16.0, 18.0),
    ("l", 18.0, 24.0),
    ("xl", 24.0, 36.0),
    ("2xl", 30.0, 48.0),
];
/// Appearance tokens: (name, light primitive, dark primitive)
const APPEARANCE_TOKENS: [(&str, &str, &str); 4] = [
    ("surface", "--color-white", "--color-gray-950"),
    ("on-surface", "--color-gray-900", "--color-gray-50"),
    ("border", "--color-gray-200", "--color-gray-800"),
    ("muted", "--color-gray-500", "--color-gray-400"),
];

pub fn insert_default_primitives(ctx: &mut CompileContext) {
    let primitives = &mut ctx.primitives;

    for (name, hex) in COLORS {
        if let Some(color) = Rgba::from_hex(hex) {
            primitives.insert(Primitive::new(
                format!("--color-{}", name),
                Category::Color,
                CssValue::literal(color.to_oklch().to_string()),
                Origin::Default,
            ));
        }
    }

    let dimensions = [
        (Category::Spacing, &SPACING_PX[..]),
        (Category::Radius, &RADIUS_PX[..]),
        (Category::FontSize, &TEXT_PX[..]),
        (Category::LineHeight, &LINE_HEIGHT_PX[..]),
    ];
    for (category, scale) in dimensions {
        let prefix = category.prefix().unwrap_or_default();
        for &px in scale {
            primitives.insert(
                Primitive::new(
                    format!("--{}-{}", prefix, px),
                    category,
                    CssValue::literal(px_to_rem(px)),
                    Origin::Default,
                )
                .with_px(px),
            );
        }
    }
    primitives.insert(
        Primitive::new("--radius-none", Category::Radius, CssValue::literal("0"), Origin::Default)
            .with_px(0.0),
    );
    primitives.insert(
        Primitive::new(
            "--radius-full",
            Category::Radius,
            CssValue::literal(format_px(RADIUS_FULL_PX)),
            Origin::Default,
        )
        .with_px(RADIUS_FULL_PX),
    );

    for (name, stack) in FONT_FAMILIES {
        primitives.insert(Primitive::new(
            format!("--font-{}", name),
            Category::FontFamily,
            CssValue::literal(stack),
            Origin::Default,
        ));
    }
    for (name, weight) in FONT_WEIGHTS {
        primitives.insert(Primitive::new(
            format!("--font-weight-{}", name),
            Category::FontWeight,
            CssValue::literal(weight.to_string()),
            Origin::Default,
        ));
    }
    for (name, z) in Z_LAYERS {
        primitives.insert(Primitive::new(
            format!("--z-{}", name),
            Category::ZIndex,
            CssValue::literal(z.to_string()),
            Origin::Default,
        ));
    }
    for (name, ms) in TRANSITIONS {
        primitives.insert(Primitive::new(
            format!("--transition-{}", name),
            Category::Transition,
            CssValue::literal(format!("{}ms", ms)),
            Origin::Default,
        ));
    }

    let window = ctx.options.fluid;
    for (name, px) in [("mobile", window.min_viewport), ("desktop", window.max_viewport)] {
        primitives.insert(
            Primitive::new(
                format!("--breakpoint-{}", name),
                Category::Breakpoint,
                CssValue::literal(format_px(px)),
                Origin::Default,
            )
            .with_px(px),
        );
    }
}

/// Stage the default global tokens. Must run after every primitive source
/// so the clamps pick up the final namespace.
pub fn stage_default_tokens(ctx: &mut CompileContext) {
    let window = ctx.options.fluid;
    let mut staged = Vec::new();

    for (category, scale) in [(Category::Spacing, &SPACING_TOKENS), (Category::FontSize, &TEXT_TOKENS)] {
        let prefix = category.prefix().unwrap_or_default();
        for &(name, mobile, desktop) in scale.iter() {
            staged.push(Token::new(
                format!("--{}-{}", prefix, name),
                category,
                fluid(mobile, desktop, category, &window, &ctx.primitives),
                TokenOrigin::Global,
            ));
        }
    }

    for (name, light, dark) in APPEARANCE_TOKENS {
        staged.push(Token::new(
            format!("--{}", name),
            Category::Color,
            CssValue::light_dark(CssValue::var(light), CssValue::var(dark)),
            TokenOrigin::Global,
        ));
    }

    for token in staged {
        ctx.stage_global(token);
    }
}
