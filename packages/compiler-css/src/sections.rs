//! Section and block assignment for emitted declarations

use tokensmith_evaluator::{Origin, Primitive, Token, TokenOrigin};
use tokensmith_parser::Category;

/// Sections of a sheet, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Breakpoints,
    GlobalColors,
    ProjectColors,
    GlobalTokens,
    ProjectTokens,
    Spacing,
    Typography,
    Forms,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Breakpoints => "Breakpoints",
            Section::GlobalColors => "Global colors",
            Section::ProjectColors => "Project colors",
            Section::GlobalTokens => "Global tokens",
            Section::ProjectTokens => "Project tokens",
            Section::Spacing => "Spacing",
            Section::Typography => "Typography",
            Section::Forms => "Forms",
        }
    }
}

/// Blocks inside a section, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Block {
    Primitives,
    Synthesized,
    Collapsed,
    Tokens,
}

impl Block {
    /// Comment line opening the block, if it has one
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Block::Primitives | Block::Tokens => None,
            Block::Synthesized => Some("Synthesized"),
            Block::Collapsed => Some("Collapsed tokens"),
        }
    }
}

const FORM_PREFIXES: [&str; 4] = ["form-", "input-", "button-", "field-"];

fn section_for(name: &str, category: Category, global: bool, is_token: bool) -> Section {
    let bare = name.trim_start_matches("--");
    if FORM_PREFIXES.iter().any(|prefix| bare.starts_with(prefix)) {
        return Section::Forms;
    }
    match category {
        Category::Breakpoint => Section::Breakpoints,
        Category::Spacing | Category::Radius => Section::Spacing,
        category if category.is_typography() => Section::Typography,
        Category::Color if !is_token => {
            if global {
                Section::GlobalColors
            } else {
                Section::ProjectColors
            }
        }
        _ if global => Section::GlobalTokens,
        _ => Section::ProjectTokens,
    }
}

pub fn primitive_placement(primitive: &Primitive) -> (Section, Block) {
    let section = section_for(
        &primitive.name,
        primitive.category,
        primitive.origin.is_global(),
        false,
    );
    let block = match primitive.origin {
        Origin::Synthesized => Block::Synthesized,
        Origin::Alias => Block::Collapsed,
        _ => Block::Primitives,
    };
    (section, block)
}

pub fn token_placement(token: &Token) -> (Section, Block) {
    let section = section_for(
        &token.name,
        token.category,
        token.origin == TokenOrigin::Global,
        true,
    );
    (section, Block::Tokens)
}
