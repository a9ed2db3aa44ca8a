//! The per-run primitive namespace.
//!
//! Names are unique and the first writer wins: callers insert in
//! precedence order (custom colors, imported documents, reference sheets,
//! built-in defaults) and later inserts of the same name are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokensmith_parser::{Category, CssValue};

/// How close (in px) a primitive must be to stand in for a numeric value
pub const PX_TOLERANCE: f64 = 0.5;

/// Where a primitive came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Built-in fallback scale
    Default,
    /// Canonical reference sheet
    Reference,
    /// A primitive document
    Imported,
    /// The custom colors text
    Custom,
    /// Created on demand for a token endpoint
    Synthesized,
    /// A token that carried no variation and collapsed to one value
    Alias,
}

impl Origin {
    /// Defaults and reference sheets make up the global layer
    pub fn is_global(&self) -> bool {
        matches!(self, Origin::Default | Origin::Reference)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub name: String,
    pub category: Category,
    pub value: CssValue,
    pub origin: Origin,
    /// Pixel size for numeric dimensions
    pub px: Option<f64>,
}

impl Primitive {
    pub fn new(name: impl Into<String>, category: Category, value: CssValue, origin: Origin) -> Self {
        Self {
            name: name.into(),
            category,
            value,
            origin,
            px: None,
        }
    }

    pub fn with_px(mut self, px: f64) -> Self {
        self.px = Some(px);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveSet {
    entries: BTreeMap<String, Primitive>,
}

impl PrimitiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the name is taken. Returns whether it was inserted.
    pub fn insert(&mut self, primitive: Primitive) -> bool {
        if self.entries.contains_key(&primitive.name) {
            return false;
        }
        self.entries.insert(primitive.name.clone(), primitive);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Primitive> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Primitives in name order
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find a primitive standing for `px` in `category`: the exact
    /// `--<prefix>-<rounded px>` name first, then the closest value within
    /// [`PX_TOLERANCE`]
    pub fn lookup_by_px(&self, category: Category, px: f64) -> Option<&Primitive> {
        if let Some(prefix) = category.prefix() {
            let exact = format!("--{}-{}", prefix, px.round() as i64);
            if let Some(primitive) = self.get(&exact) {
                if primitive.px.map_or(true, |p| (p - px).abs() <= PX_TOLERANCE) {
                    return Some(primitive);
                }
            }
        }

        self.entries
            .values()
            .filter(|p| p.category == category && p.origin != Origin::Alias)
            .filter_map(|p| {
                let distance = (p.px? - px).abs();
                (distance <= PX_TOLERANCE).then_some((distance, p))
            })
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, p)| p)
    }

    /// First primitive (in name order) of `category` holding exactly `value`
    pub fn find_by_value(&self, category: Category, value: &CssValue) -> Option<&Primitive> {
        self.entries
            .values()
            .find(|p| p.category == category && p.origin != Origin::Alias && p.value == *value)
    }

    /// Replace a value while the namespace is still being assembled
    pub(crate) fn replace_value(&mut self, name: &str, value: CssValue) {
        if let Some(primitive) = self.entries.get_mut(name) {
            primitive.value = value;
        }
    }

    /// Drop a primitive whose references cannot be satisfied
    pub(crate) fn remove(&mut self, name: &str) -> Option<Primitive> {
        self.entries.remove(name)
    }
}
