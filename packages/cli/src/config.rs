use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokensmith_compiler_css::EmitOptions;
use tokensmith_evaluator::{CompileOptions, FluidWindow, ThemeMode};

pub const DEFAULT_CONFIG_NAME: &str = "tokensmith.config.json";

/// Tokensmith configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory holding the variable exports (*.json)
    pub src_dir: String,

    /// Directory the sheets are written to
    pub out_dir: String,

    /// Canonical stylesheets, files or directories of *.css
    pub references: Vec<String>,

    pub theme_mode: ThemeMode,
    pub typo_responsive: bool,
    pub spacing_responsive: bool,
    pub synthesize_project_primitives: bool,

    /// Extra colors, one `name: value` per line
    pub custom_colors: String,

    pub fluid: FluidWindow,

    /// Annotate rem values with their px size
    pub px_comments: bool,

    pub emit: EmitTargets,
}

/// Which artifacts `compile` writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitTargets {
    /// theme.css
    pub css: bool,
    /// theme-tokens.css
    pub tokens: bool,
    /// tokens.json
    pub json: bool,
    /// theme.json
    pub wordpress: bool,
}

impl Default for EmitTargets {
    fn default() -> Self {
        Self {
            css: true,
            tokens: true,
            json: true,
            wordpress: false,
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn get_references(&self, cwd: &str) -> Vec<PathBuf> {
        self.references
            .iter()
            .map(|reference| PathBuf::from(cwd).join(reference))
            .collect()
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            theme_mode: self.theme_mode,
            typo_responsive: self.typo_responsive,
            spacing_responsive: self.spacing_responsive,
            synthesize_project_primitives: self.synthesize_project_primitives,
            custom_colors_text: self.custom_colors.clone(),
            fluid: self.fluid,
        }
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            px_comments: self.px_comments,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let options = CompileOptions::default();
        Self {
            src_dir: "tokens".to_string(),
            out_dir: "dist".to_string(),
            references: vec![],
            theme_mode: options.theme_mode,
            typo_responsive: options.typo_responsive,
            spacing_responsive: options.spacing_responsive,
            synthesize_project_primitives: options.synthesize_project_primitives,
            custom_colors: options.custom_colors_text,
            fluid: options.fluid,
            px_comments: false,
            emit: EmitTargets::default(),
        }
    }
}
