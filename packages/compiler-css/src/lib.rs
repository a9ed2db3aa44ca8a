mod compiler;
mod context;
mod emitter;
mod error;
mod json;
mod sections;

pub use compiler::{compile_theme, DocumentSource, ReferenceSource, ThemeOutput};
pub use context::{CssWriter, EmitOptions};
pub use emitter::{emit_css, verify_sheet, EmittedSheets, SheetKind, GENERATOR};
pub use error::{CssError, CssResult};
pub use json::emit_json;
pub use sections::{Block, Section};
