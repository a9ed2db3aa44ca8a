use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tokensmith_common::{read_source, Diagnostic, DiagnosticLevel};
use tokensmith_compiler_css::{compile_theme, DocumentSource, ReferenceSource, SheetKind, ThemeOutput};
use tokensmith_compiler_wordpress::{compile_to_theme_json, CompileOptions as WordPressOptions};
use tokensmith_evaluator::ThemeMode;
use tokensmith_parser::{parse_reference_sheet, ModeId};
use tracing::debug;
use walkdir::WalkDir;

pub const JSON_FILE_NAME: &str = "tokens.json";
pub const WORDPRESS_FILE_NAME: &str = "theme.json";

#[derive(Debug, Args, Default)]
pub struct CompileArgs {
    /// Directory of variable exports (overrides config)
    pub path: Option<String>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Reference stylesheet or directory of them (repeatable)
    #[arg(short, long = "reference")]
    pub references: Vec<String>,

    /// Theme mode: light, dark or both
    #[arg(short, long)]
    pub theme_mode: Option<ThemeMode>,

    /// File with one custom color per line
    #[arg(long)]
    pub custom_colors: Option<PathBuf>,

    /// Emit fixed font sizes instead of clamp()
    #[arg(long)]
    pub fixed_typography: bool,

    /// Emit fixed spacing instead of clamp()
    #[arg(long)]
    pub fixed_spacing: bool,

    /// Do not create missing project primitives
    #[arg(long)]
    pub no_synthesize: bool,

    /// Annotate rem values with their px size
    #[arg(long)]
    pub px_comments: bool,

    /// Also write a WordPress theme.json
    #[arg(long)]
    pub wordpress: bool,

    /// Print the sheets instead of writing files
    #[arg(long)]
    pub stdout: bool,
}

impl CompileArgs {
    /// Layer command line flags over the config file
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(path) = &self.path {
            config.src_dir = path.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        config.references.extend(self.references.iter().cloned());
        if let Some(mode) = self.theme_mode {
            config.theme_mode = mode;
        }
        if let Some(path) = &self.custom_colors {
            config.custom_colors = read_source(path)?;
        }
        if self.fixed_typography {
            config.typo_responsive = false;
        }
        if self.fixed_spacing {
            config.spacing_responsive = false;
        }
        if self.no_synthesize {
            config.synthesize_project_primitives = false;
        }
        if self.px_comments {
            config.px_comments = true;
        }
        if self.wordpress {
            config.emit.wordpress = true;
        }
        Ok(())
    }
}

pub fn compile(args: CompileArgs, cwd: &str, verbose: bool) -> Result<()> {
    let mut config = Config::load(cwd)?;
    args.apply(&mut config)?;

    println!("{}", "🔨 Compiling design tokens...".bright_blue().bold());

    let output = compile_project(&config, cwd)?;
    let (errors, warnings) = report_diagnostics(&output.diagnostics, verbose);

    if args.stdout {
        println!("{}", output.sheets.primitives);
        println!("{}", output.sheets.tokens);
    } else {
        for path in write_outputs(&config, cwd, &output)? {
            println!("  {} {}", "✓".green(), path.display());
        }
    }

    println!();
    if errors == 0 && warnings == 0 {
        println!(
            "{} {} primitives, {} tokens",
            "✅".green(),
            output.model.primitives.len(),
            output.model.tokens.len()
        );
    } else {
        println!(
            "{} {} primitives, {} tokens, {} errors, {} warnings",
            "⚠️".yellow(),
            output.model.primitives.len(),
            output.model.tokens.len(),
            errors,
            warnings
        );
    }

    Ok(())
}

/// Read every source the config names and run the compiler over them
pub fn compile_project(config: &Config, cwd: &str) -> Result<ThemeOutput> {
    let src_dir = config.get_src_dir(cwd);
    if !src_dir.exists() {
        return Err(anyhow!("Source directory does not exist: {:?}", src_dir));
    }

    let documents = find_files(&src_dir, "json")?
        .into_iter()
        .map(|path| read_document(&path, &src_dir))
        .collect::<Result<Vec<_>>>()?;
    if documents.is_empty() {
        println!("{}", "⚠️  No .json files found, using built-in scales".yellow());
    } else {
        println!("Found {} documents", documents.len());
    }

    let mut references = Vec::new();
    for root in config.get_references(cwd) {
        if !root.exists() {
            return Err(anyhow!("Reference path does not exist: {:?}", root));
        }
        for path in find_files(&root, "css")? {
            references.push(read_reference(&path)?);
        }
    }

    let output = compile_theme(
        &documents,
        &references,
        &config.compile_options(),
        &config.emit_options(),
    )?;
    Ok(output)
}

/// Write the artifacts the config enables; returns the written paths
pub fn write_outputs(config: &Config, cwd: &str, output: &ThemeOutput) -> Result<Vec<PathBuf>> {
    let out_dir = config.get_out_dir(cwd);
    fs::create_dir_all(&out_dir)?;

    let mut artifacts = Vec::new();
    if config.emit.css {
        artifacts.push((SheetKind::Primitives.file_name(), output.sheets.primitives.clone()));
    }
    if config.emit.tokens {
        artifacts.push((SheetKind::Tokens.file_name(), output.sheets.tokens.clone()));
    }
    if config.emit.json {
        let mut json = serde_json::to_string_pretty(&output.json)?;
        json.push('\n');
        artifacts.push((JSON_FILE_NAME, json));
    }
    if config.emit.wordpress {
        let theme = compile_to_theme_json(&output.model, WordPressOptions::default())?;
        artifacts.push((WORDPRESS_FILE_NAME, theme));
    }

    let mut written = Vec::with_capacity(artifacts.len());
    for (file_name, content) in artifacts {
        let path = out_dir.join(file_name);
        fs::write(&path, content)?;
        debug!(path = %path.display(), "Wrote artifact");
        written.push(path);
    }
    Ok(written)
}

/// Files with `extension` under `root` (or `root` itself), sorted
fn find_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(extension) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// The mode a document covers, when its file name says so
/// (`tokens.dark.json`, `Spacing - Mobile.json`)
fn mode_from_file_name(path: &Path) -> Option<ModeId> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(ModeId::from_label)
}

fn read_document(path: &Path, src_dir: &Path) -> Result<DocumentSource> {
    let text = read_source(path)?;
    let name = path.strip_prefix(src_dir).unwrap_or(path).display().to_string();
    let mode = mode_from_file_name(path);
    debug!(document = %name, mode = ?mode, "Read document");
    Ok(DocumentSource::new(name, text, mode))
}

fn read_reference(path: &Path) -> Result<ReferenceSource> {
    let text = read_source(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    // The compiler only reports that the sheet was skipped; show where it broke
    if let Err(error) = parse_reference_sheet(&name, &text) {
        use tokensmith_parser::error::pretty;
        eprintln!("{}", pretty::format_error(&error, &name, &text));
    }

    Ok(ReferenceSource::new(name, text))
}

/// Print diagnostics; info level only when verbose. Returns (errors, warnings).
fn report_diagnostics(diagnostics: &[Diagnostic], verbose: bool) -> (usize, usize) {
    let mut errors = 0;
    let mut warnings = 0;

    for diagnostic in diagnostics {
        let level_str = match diagnostic.level {
            DiagnosticLevel::Error => {
                errors += 1;
                "error".red().bold()
            }
            DiagnosticLevel::Warning => {
                warnings += 1;
                "warning".yellow().bold()
            }
            DiagnosticLevel::Info => {
                if !verbose {
                    continue;
                }
                "info".blue().bold()
            }
        };

        match &diagnostic.subject {
            Some(subject) => println!(
                "  {} [{}] {}: {}",
                level_str,
                diagnostic.kind,
                subject.bright_white(),
                diagnostic.message
            ),
            None => println!("  {} [{}] {}", level_str, diagnostic.kind, diagnostic.message),
        }

        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "💡".dimmed(), suggestion.dimmed());
        }
    }

    (errors, warnings)
}
