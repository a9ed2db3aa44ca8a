//! Custom property values: `var()`, `clamp()`, `light-dark()` or literal text

use crate::ast::CssValue;

/// Parse a declaration value into the structured model.
///
/// Only whole-value calls are structured; anything else (including
/// `var()` with a fallback) stays literal text, whose references are
/// still visible through [`CssValue::references`].
pub fn parse_value(text: &str) -> CssValue {
    let text = text.trim();

    if let Some(args) = call_arguments(text, "var") {
        if let [name] = args.as_slice() {
            if is_custom_property(name) {
                return CssValue::var(*name);
            }
        }
    }

    if let Some(args) = call_arguments(text, "clamp") {
        if let [min, preferred, max] = args.as_slice() {
            return CssValue::clamp(parse_value(min), *preferred, parse_value(max));
        }
    }

    if let Some(args) = call_arguments(text, "light-dark") {
        if let [light, dark] = args.as_slice() {
            return CssValue::light_dark(parse_value(light), parse_value(dark));
        }
    }

    CssValue::literal(text)
}

pub fn is_custom_property(name: &str) -> bool {
    name.len() > 2
        && name.starts_with("--")
        && name[2..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Arguments of `function(...)` when the call spans the whole text
fn call_arguments<'a>(text: &'a str, function: &str) -> Option<Vec<&'a str>> {
    let rest = text.strip_prefix(function)?.strip_prefix('(')?;
    let inner = rest.strip_suffix(')')?;

    // The final ')' must close the opening one
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }

    Some(split_top_level(inner))
}

/// Split on commas that are not nested inside parentheses
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts
}
