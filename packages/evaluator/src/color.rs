//! sRGB → OKLCH conversion
//!
//! sRGB components go through the standard transfer function to linear
//! light, then Björn Ottosson's LMS matrices and a cube root to OKLab,
//! and finally to polar OKLCH.

use crate::units::format_decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tokensmith_parser::RawColor;

pub type ColorResult<T> = Result<T, ColorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("Color channel '{channel}' is {value}, expected a number in [0, 1]")]
    OutOfRange { channel: char, value: f64 },
}

/// Validated sRGB color, every component in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> ColorResult<Self> {
        for (channel, value) in [('r', r), ('g', g), ('b', b), ('a', a)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ColorError::OutOfRange { channel, value });
            }
        }
        Ok(Self { r, g, b, a })
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        RawColor::from_hex(hex).and_then(|raw| Self::try_from(raw).ok())
    }

    pub fn alpha(&self) -> f64 {
        self.a
    }

    pub fn to_oklab(&self) -> Oklab {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);

        let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
        let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
        let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }

    pub fn to_oklch(&self) -> Oklch {
        let lab = self.to_oklab();
        let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
        let mut h = lab.b.atan2(lab.a).to_degrees();
        if h < 0.0 {
            h += 360.0;
        }
        Oklch {
            l: lab.l,
            c,
            h,
            alpha: self.a,
        }
    }

    /// `rrggbb`, plus `aa` when not opaque
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v * 255.0).round() as u8;
        let mut hex = format!("{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b));
        if byte(self.a) != 255 {
            hex.push_str(&format!("{:02x}", byte(self.a)));
        }
        hex
    }
}

impl TryFrom<RawColor> for Rgba {
    type Error = ColorError;

    fn try_from(raw: RawColor) -> ColorResult<Self> {
        Rgba::new(raw.r, raw.g, raw.b, raw.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    /// Degrees in `[0, 360)`
    pub h: f64,
    pub alpha: f64,
}

impl fmt::Display for Oklch {
    /// `oklch(L C H)` or `oklch(L C H / A)`, at most 4 decimals each
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = format_decimal(self.l, 4);
        let c = format_decimal(self.c, 4);
        // An achromatic color has no meaningful hue
        let h = if c == "0" {
            "0".to_string()
        } else {
            let h = format_decimal(self.h, 4);
            if h == "360" {
                "0".to_string()
            } else {
                h
            }
        };

        write!(f, "oklch({} {} {}", l, c, h)?;
        if (self.alpha - 1.0).abs() > 1e-9 {
            write!(f, " / {}", format_decimal(self.alpha, 4))?;
        }
        write!(f, ")")
    }
}

/// Convert to the CSS `oklch()` string
pub fn to_oklch(rgba: &Rgba) -> String {
    rgba.to_oklch().to_string()
}

fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
