//! Output options applied to the resolved model before emission

use crate::context::{CompileOptions, ThemeMode};
use crate::tokens::TokenSet;
use tokensmith_parser::{Category, CssValue};
use tracing::debug;

/// Collapse `light-dark()` for a single theme and `clamp()` for
/// non-responsive typography or spacing
pub fn apply_output_options(tokens: &mut TokenSet, options: &CompileOptions) {
    for token in tokens.iter_mut() {
        let fixed = match token.category {
            category if category.is_typography() => !options.typo_responsive,
            // Radius shares the spacing section and its responsiveness
            Category::Spacing | Category::Radius => !options.spacing_responsive,
            _ => false,
        };

        let value = collapse(&token.value, options.theme_mode, fixed);
        if value != token.value {
            debug!(token = %token.name, from = %token.value, to = %value, "Collapsed for output");
            token.value = value;
            if !token.value.is_clamp() && !token.value.is_light_dark() {
                token.axis = None;
            }
        }
    }
}

fn collapse(value: &CssValue, theme: ThemeMode, fixed: bool) -> CssValue {
    match value {
        CssValue::LightDark { light, dark } => match theme {
            ThemeMode::Light => collapse(light, theme, fixed),
            ThemeMode::Dark => collapse(dark, theme, fixed),
            ThemeMode::Both => CssValue::light_dark(
                collapse(light, theme, fixed),
                collapse(dark, theme, fixed),
            ),
        },
        CssValue::Clamp { min, .. } if fixed => (**min).clone(),
        other => other.clone(),
    }
}
