use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for the variable exports
    #[arg(short, long, default_value = "tokens")]
    pub src_dir: String,

    /// Directory the sheets are written to
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Also emit a WordPress theme.json
    #[arg(long)]
    pub wordpress: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

const EXAMPLE_PRIMITIVES: &str = r##"{
  "variables": [
    { "name": "color/brand/500", "type": "COLOR", "valuesByMode": { "1:0": "#3366ff" } },
    { "name": "spacing/gutter", "type": "FLOAT", "valuesByMode": { "1:0": 20 } }
  ]
}
"##;

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing tokensmith project...".bright_blue().bold());

    // Create source directory if it doesn't exist
    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("primitives.json");
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_PRIMITIVES)?;
        println!("  {} Created primitives.json", "✓".green());
    }

    let mut config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: args.out_dir.clone(),
        ..Config::default()
    };
    config.emit.wordpress = args.wordpress;

    let mut config_json = serde_json::to_string_pretty(&config)?;
    config_json.push('\n');
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Export your variables into {}/", args.src_dir);
    println!("  2. Run: tokensmith compile");
    println!("  3. Check output in {}/", args.out_dir);

    Ok(())
}
