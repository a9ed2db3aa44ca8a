//! JSON mirror of the theme, grouped by category

use serde_json::{json, Map, Value};
use tokensmith_evaluator::ThemeModel;
use tokensmith_parser::{Category, CssValue};

fn group_name(category: Category) -> Option<&'static str> {
    match category {
        Category::Color => Some("color"),
        Category::Spacing => Some("spacing"),
        Category::Radius => Some("rounded"),
        Category::FontSize => Some("fontSize"),
        Category::LineHeight => Some("lineHeight"),
        _ => None,
    }
}

fn value_type(category: Category, value: &CssValue) -> &'static str {
    if category == Category::Color {
        return "color";
    }
    match value {
        CssValue::Literal { text } if text.trim().parse::<f64>().is_ok() => "number",
        _ => "dimension",
    }
}

/// Key inside a group: the property name without `--` and the category
/// prefix
fn entry_key(name: &str, category: Category) -> String {
    let bare = name.trim_start_matches("--");
    category
        .prefix()
        .and_then(|prefix| bare.strip_prefix(prefix))
        .and_then(|rest| rest.strip_prefix('-'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(bare)
        .to_string()
}

/// `{ group: { key: { "$type", "value" } } }` for primitives and tokens
pub fn emit_json(model: &ThemeModel) -> Value {
    let mut groups: Map<String, Value> = Map::new();

    let entries = model
        .primitives
        .iter()
        .map(|p| (&p.name, p.category, &p.value))
        .chain(model.tokens.iter().map(|t| (&t.name, t.category, &t.value)));

    for (name, category, value) in entries {
        let Some(group) = group_name(category) else {
            continue;
        };
        let Value::Object(group) = groups
            .entry(group.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
        else {
            continue;
        };
        group
            .entry(entry_key(name, category))
            .or_insert_with(|| {
                json!({
                    "$type": value_type(category, value),
                    "value": value.to_string(),
                })
            });
    }

    Value::Object(groups)
}
