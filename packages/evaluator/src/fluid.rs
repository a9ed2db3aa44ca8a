//! Fluid (`clamp()`) interpolation between a mobile and a desktop value

use crate::primitives::PrimitiveSet;
use crate::units::{format_decimal, px_to_rem, ROOT_FONT_SIZE_PX};
use serde::{Deserialize, Serialize};
use tokensmith_parser::{Category, CssValue};

/// Viewport widths (px) between which values interpolate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FluidWindow {
    pub min_viewport: f64,
    pub max_viewport: f64,
}

impl Default for FluidWindow {
    fn default() -> Self {
        Self {
            min_viewport: 360.0,
            max_viewport: 1280.0,
        }
    }
}

impl FluidWindow {
    pub fn is_valid(&self) -> bool {
        self.min_viewport.is_finite()
            && self.max_viewport.is_finite()
            && self.min_viewport >= 0.0
            && self.min_viewport < self.max_viewport
    }
}

/// One end of a fluid range: its size and how to write it
#[derive(Debug, Clone, PartialEq)]
pub struct FluidPoint {
    pub px: f64,
    pub css: CssValue,
}

impl FluidPoint {
    /// Reference a primitive of `category` when one matches, else a rem literal
    pub fn lookup(px: f64, category: Category, primitives: &PrimitiveSet) -> Self {
        let css = match primitives.lookup_by_px(category, px) {
            Some(primitive) => CssValue::var(primitive.name.clone()),
            None => CssValue::literal(px_to_rem(px)),
        };
        Self { px, css }
    }
}

/// `fluid(min, max)` with endpoints looked up among `primitives`
pub fn fluid(
    mobile_px: f64,
    desktop_px: f64,
    category: Category,
    window: &FluidWindow,
    primitives: &PrimitiveSet,
) -> CssValue {
    fluid_between(
        FluidPoint::lookup(mobile_px, category, primitives),
        FluidPoint::lookup(desktop_px, category, primitives),
        window,
    )
}

/// Interpolate from `mobile` at the window's minimum to `desktop` at its
/// maximum. Equal sizes give the single value, never a clamp.
pub fn fluid_between(mobile: FluidPoint, desktop: FluidPoint, window: &FluidWindow) -> CssValue {
    if (mobile.px - desktop.px).abs() < 1e-6 {
        return mobile.css;
    }

    let slope = (desktop.px - mobile.px) * 100.0 / (window.max_viewport - window.min_viewport);
    let intercept_px = mobile.px - slope * window.min_viewport / 100.0;

    let intercept = format_decimal(intercept_px / ROOT_FONT_SIZE_PX, 3);
    let slope_text = format_decimal(slope.abs(), 4);
    let sign = if slope < 0.0 { '-' } else { '+' };
    let preferred = format!("{}rem {} {}vw", intercept, sign, slope_text);

    // clamp() needs its bounds in ascending order
    let (lower, upper) = if mobile.px <= desktop.px {
        (mobile, desktop)
    } else {
        (desktop, mobile)
    };
    CssValue::clamp(lower.css, preferred, upper.css)
}
