use crate::ast::{CustomColor, CustomColorValue, RawColor};
use crate::category::sanitize;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tokensmith_common::{Diagnostic, DiagnosticKind};

fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z][\w -]*?)\s*(?:[:=]\s*|\s+)(#[0-9A-Fa-f]+|oklch\([^)]*\))\s*;?$")
            .expect("valid custom color pattern")
    })
}

/// Parse the free-form custom colors text, one `name: value` per line.
///
/// Malformed lines are reported and skipped. A repeated name keeps its
/// first value.
pub fn parse_custom_colors(text: &str) -> (Vec<CustomColor>, Vec<Diagnostic>) {
    let mut colors = Vec::new();
    let mut diagnostics = Vec::new();
    let mut seen = HashSet::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
            continue;
        }

        let invalid = |message: String| {
            Diagnostic::new(DiagnosticKind::InvalidCustomColor, message)
                .with_subject(format!("line {}", number + 1))
        };

        let Some(captures) = line_regex().captures(line) else {
            diagnostics.push(
                invalid(format!("cannot read '{}'", line))
                    .with_suggestion("use `name: #rrggbb` or `name: oklch(L C H)`"),
            );
            continue;
        };

        let raw_name = sanitize(&captures[1]);
        let name = raw_name
            .strip_prefix("colors-")
            .or_else(|| raw_name.strip_prefix("color-"))
            .unwrap_or(&raw_name)
            .to_string();

        let literal = &captures[2];
        let value = if literal.starts_with('#') {
            match RawColor::from_hex(literal) {
                Some(color) => CustomColorValue::Hex(color),
                None => {
                    diagnostics.push(invalid(format!(
                        "'{}' is not a 3, 4, 6 or 8 digit hex color",
                        literal
                    )));
                    continue;
                }
            }
        } else {
            CustomColorValue::Literal(literal.to_string())
        };

        if !seen.insert(name.clone()) {
            diagnostics.push(invalid(format!("'{}' is already defined", name)));
            continue;
        }
        colors.push(CustomColor { name, value });
    }

    (colors, diagnostics)
}
