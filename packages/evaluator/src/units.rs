//! px ↔ rem conversion, decimal formatting and the numeric-aware ordering
//! of custom property names

use std::cmp::Ordering;

/// Browser default root font size
pub const ROOT_FONT_SIZE_PX: f64 = 16.0;

/// Values at or above this are "infinitely" round (`--radius-full`)
pub const RADIUS_FULL_PX: f64 = 9999.0;

/// Round to `places` decimals and drop trailing zeros. Negative zero
/// renders as `0`.
pub fn format_decimal(value: f64, places: usize) -> String {
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.*}", places, rounded);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// `px / 16` as a rem literal; zero is unitless
pub fn px_to_rem(px: f64) -> String {
    if px.abs() < 1e-9 {
        return "0".to_string();
    }
    format!("{}rem", format_decimal(px / ROOT_FONT_SIZE_PX, 4))
}

pub fn rem_to_px(rem: f64) -> f64 {
    rem * ROOT_FONT_SIZE_PX
}

pub fn format_px(px: f64) -> String {
    format!("{}px", format_decimal(px, 2))
}

/// Read a `0`, `<n>px` or `<n>rem` literal back into px
pub fn length_to_px(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Some(rem) = text.strip_suffix("rem") {
        return rem.trim().parse::<f64>().ok().map(rem_to_px);
    }
    if let Some(px) = text.strip_suffix("px") {
        return px.trim().parse::<f64>().ok();
    }
    match text.parse::<f64>() {
        Ok(value) if value == 0.0 => Some(0.0),
        _ => None,
    }
}

/// T-shirt sizes, smallest first
const TSHIRT_SIZES: [&str; 14] = [
    "3xs", "2xs", "xxs", "xs", "s", "sm", "m", "md", "l", "lg", "xl", "2xl", "xxl", "3xl",
];

#[derive(Debug, Clone, PartialEq)]
enum Suffix<'a> {
    None,
    Numeric(f64),
    Tshirt(usize),
    Named(&'a str),
    Full,
}

impl Suffix<'_> {
    fn rank(&self) -> u8 {
        match self {
            Suffix::None => 0,
            Suffix::Numeric(_) => 1,
            Suffix::Tshirt(_) => 2,
            Suffix::Named(_) => 3,
            Suffix::Full => 4,
        }
    }
}

/// Split `--spacing-16` into (`spacing`, 16), `--color-gray-900` into
/// (`color-gray`, 900), `--spacing-0-5` into (`spacing`, 0.5)
fn split_family(name: &str) -> (&str, Suffix<'_>) {
    let bare = name.trim_start_matches("--");
    let Some(pos) = bare.rfind('-') else {
        return (bare, Suffix::Named(""));
    };
    let (family, last) = (&bare[..pos], &bare[pos + 1..]);

    if is_digits(last) {
        // `0-5` is the slug of 0.5
        if let Some(prev) = family.rfind('-') {
            let whole = &family[prev + 1..];
            if is_digits(whole) {
                if let Ok(value) = format!("{}.{}", whole, last).parse::<f64>() {
                    return (&family[..prev], Suffix::Numeric(value));
                }
            }
        }
        if let Ok(value) = last.parse::<f64>() {
            return (family, Suffix::Numeric(value));
        }
    }

    let suffix = match last {
        "none" => Suffix::None,
        "full" => Suffix::Full,
        _ => match TSHIRT_SIZES.iter().position(|size| *size == last) {
            Some(index) => Suffix::Tshirt(index),
            None => Suffix::Named(last),
        },
    };
    (family, suffix)
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Order custom properties by family, then `none` < numbers (ascending) <
/// t-shirt sizes < other names < `full`
pub fn compare_property_names(a: &str, b: &str) -> Ordering {
    let (family_a, suffix_a) = split_family(a);
    let (family_b, suffix_b) = split_family(b);

    family_a
        .cmp(family_b)
        .then_with(|| suffix_a.rank().cmp(&suffix_b.rank()))
        .then_with(|| match (&suffix_a, &suffix_b) {
            (Suffix::Numeric(x), Suffix::Numeric(y)) => x.total_cmp(y),
            (Suffix::Tshirt(x), Suffix::Tshirt(y)) => x.cmp(y),
            (Suffix::Named(x), Suffix::Named(y)) => x.cmp(y),
            _ => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}
