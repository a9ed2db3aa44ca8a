pub mod ast;
pub mod category;
pub mod custom_colors;
pub mod document;
pub mod error;
pub mod mode;
pub mod reference;
pub mod tokenizer;
pub mod value;

#[cfg(test)]
mod tests_documents;

pub use ast::*;
pub use category::{classify_path, Category, Classified};
pub use custom_colors::parse_custom_colors;
pub use document::{parse_document, parse_document_value};
pub use error::{ParseError, ParseResult};
pub use mode::{Axis, ModeId};
pub use reference::parse_reference_sheet;
pub use tokenizer::{tokenize, Token};
pub use value::parse_value;
