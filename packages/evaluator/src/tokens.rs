use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokensmith_parser::{Axis, Category, CssValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenOrigin {
    /// Reference sheets and built-in defaults
    Global,
    /// Semantic documents
    Project,
}

/// A semantic custom property whose value varies by mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    pub category: Category,
    pub value: CssValue,
    pub origin: TokenOrigin,
    /// The axis the value varies on, when known
    pub axis: Option<Axis>,
}

impl Token {
    pub fn new(name: impl Into<String>, category: Category, value: CssValue, origin: TokenOrigin) -> Self {
        let value_axis = match &value {
            CssValue::Clamp { .. } => Some(Axis::Viewport),
            CssValue::LightDark { .. } => Some(Axis::Appearance),
            _ => None,
        };
        Self {
            name: name.into(),
            category,
            value,
            origin,
            axis: value_axis,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    entries: BTreeMap<String, Token>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the name is taken; project tokens are inserted before
    /// global ones so they shadow them
    pub fn insert(&mut self, token: Token) -> bool {
        if self.entries.contains_key(&token.name) {
            return false;
        }
        self.entries.insert(token.name.clone(), token);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Token> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Token> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Token> {
        self.entries.remove(name)
    }
}
