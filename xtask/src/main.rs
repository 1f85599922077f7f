//! Workspace tasks: `cargo xtask schema` and `cargo xtask preset`.

#![allow(clippy::print_stderr)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use trackview::Options;

#[derive(Debug, Parser)]
#[command(about = "Build tasks for the trackview workspace")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the options JSON schema.
    Schema {
        /// Output path.
        #[arg(long, default_value = "assets/options.schema.json")]
        out: PathBuf,
    },
    /// Write the default options as a TOML preset.
    Preset {
        /// Output path.
        #[arg(long, default_value = "assets/presets/default.toml")]
        out: PathBuf,
    },
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Schema { out } => {
            let schema = serde_json::to_string_pretty(&Options::json_schema())
                .context("serializing options schema")?;
            write_file(&out, &schema)?;
            eprintln!("wrote {}", out.display());
        }
        Command::Preset { out } => {
            let preset = Options::default()
                .to_toml()
                .context("serializing default options")?;
            write_file(&out, &preset)?;
            eprintln!("wrote {}", out.display());
        }
    }
    Ok(())
}
