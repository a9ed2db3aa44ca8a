use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The semantic axis a mode belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// light / dark
    Appearance,
    /// mobile / desktop
    Viewport,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Appearance => write!(f, "appearance"),
            Axis::Viewport => write!(f, "viewport"),
        }
    }
}

/// A mode tag on a document or on a single value.
///
/// Ordering puts the "first" side of each axis (light, mobile) before the
/// second, which is the order values are handed to `light-dark()` and
/// `clamp()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeId {
    Light,
    Dark,
    Mobile,
    Desktop,
}

impl ModeId {
    pub fn axis(&self) -> Axis {
        match self {
            ModeId::Light | ModeId::Dark => Axis::Appearance,
            ModeId::Mobile | ModeId::Desktop => Axis::Viewport,
        }
    }

    /// The other side of this mode's axis
    pub fn opposite(&self) -> ModeId {
        match self {
            ModeId::Light => ModeId::Dark,
            ModeId::Dark => ModeId::Light,
            ModeId::Mobile => ModeId::Desktop,
            ModeId::Desktop => ModeId::Mobile,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeId::Light => "light",
            ModeId::Dark => "dark",
            ModeId::Mobile => "mobile",
            ModeId::Desktop => "desktop",
        }
    }

    /// Exact (case-insensitive) mode name
    pub fn parse(name: &str) -> Option<ModeId> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ModeId::Light),
            "dark" => Some(ModeId::Dark),
            "mobile" => Some(ModeId::Mobile),
            "desktop" => Some(ModeId::Desktop),
            _ => None,
        }
    }

    /// Loose match for human labels such as `"Light Mode"` or `"Desktop (1280)"`
    pub fn from_label(label: &str) -> Option<ModeId> {
        let lower = label.to_ascii_lowercase();
        [ModeId::Light, ModeId::Dark, ModeId::Mobile, ModeId::Desktop]
            .into_iter()
            .find(|mode| lower.contains(mode.as_str()))
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModeId::parse(s).ok_or_else(|| {
            format!("Unknown mode '{}': expected light, dark, mobile or desktop", s)
        })
    }
}
