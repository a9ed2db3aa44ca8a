use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use tokensmith_evaluator::units::format_px;

/// Options for CSS emission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitOptions {
    /// Append `/* 16px */` after numeric primitives
    pub px_comments: bool,
}

/// Output buffer with indentation, one sheet at a time
pub struct CssWriter {
    buffer: RefCell<String>,
    indent_level: Cell<usize>,
    options: EmitOptions,
}

impl CssWriter {
    pub fn new(options: EmitOptions) -> Self {
        Self {
            buffer: RefCell::new(String::new()),
            indent_level: Cell::new(0),
            options,
        }
    }

    pub fn add(&self, text: &str) {
        self.buffer.borrow_mut().push_str(text);
    }

    pub fn add_line(&self, text: &str) {
        self.add_indented(text);
        self.add("\n");
    }

    pub fn add_indented(&self, text: &str) {
        let indent = "  ".repeat(self.indent_level.get());
        let mut buffer = self.buffer.borrow_mut();
        buffer.push_str(&indent);
        buffer.push_str(text);
    }

    pub fn blank_line(&self) {
        self.add("\n");
    }

    pub fn comment(&self, text: &str) {
        self.add_line(&format!("/* {} */", text));
    }

    pub fn declaration(&self, name: &str, value: &str) {
        self.add_line(&format!("{}: {};", name, value));
    }

    /// A declaration followed by its size in px when px comments are on
    pub fn px_declaration(&self, name: &str, value: &str, px: Option<f64>) {
        match px.filter(|_| self.options.px_comments) {
            Some(px) => self.add_line(&format!("{}: {}; /* {} */", name, value, format_px(px))),
            None => self.declaration(name, value),
        }
    }

    pub fn indent(&self) {
        self.indent_level.set(self.indent_level.get() + 1);
    }

    pub fn dedent(&self) {
        let level = self.indent_level.get();
        if level > 0 {
            self.indent_level.set(level - 1);
        }
    }

    pub fn get_output(&self) -> String {
        self.buffer.borrow().clone()
    }

    /// A writer at the same indentation with an empty buffer
    pub fn with_new_buffer(&self) -> Self {
        Self {
            buffer: RefCell::new(String::new()),
            indent_level: Cell::new(self.indent_level.get()),
            options: self.options.clone(),
        }
    }

    pub fn merge_buffer(&self, other: &CssWriter) {
        self.buffer.borrow_mut().push_str(&other.buffer.borrow());
    }
}
