//! `trackview` binary: opens the trackball demo window.
//!
//! ```text
//! trackview [--options file.toml | --preset NAME] [--presets-dir DIR]
//!           [--title "My View"] [--list-presets] [--print-schema]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use trackview::{Options, TrackviewError, Viewer};

/// Trackball-controlled 3D viewer.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML options file; missing sections use defaults.
    #[arg(short, long, conflicts_with = "preset")]
    options: Option<PathBuf>,

    /// Named preset loaded from the presets directory.
    #[arg(short, long)]
    preset: Option<String>,

    /// Directory holding `<name>.toml` presets.
    #[arg(long, default_value = "assets/presets")]
    presets_dir: PathBuf,

    /// Window title.
    #[arg(short, long, default_value = "Trackview")]
    title: String,

    /// List the presets in the presets directory and exit.
    #[arg(long)]
    list_presets: bool,

    /// Print the options JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
}

impl Cli {
    /// Options selected on the command line, or the defaults.
    fn resolve_options(&self) -> Result<Options, TrackviewError> {
        if let Some(path) = &self.options {
            Options::load(path)
        } else if let Some(name) = &self.preset {
            Options::load_preset(&self.presets_dir, name)
        } else {
            Ok(Options::default())
        }
    }
}

#[allow(clippy::print_stdout)]
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.print_schema {
        return match serde_json::to_string_pretty(&Options::json_schema()) {
            Ok(schema) => {
                println!("{schema}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("failed to serialize schema: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if cli.list_presets {
        for name in Options::list_presets(&cli.presets_dir) {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    let options = match cli.resolve_options() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = Viewer::builder()
        .with_title(cli.title)
        .with_options(options)
        .build()
        .run();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "trackview-cli-{name}-{}",
            std::process::id()
        ))
    }

    #[test]
    fn no_selection_uses_defaults() {
        let cli = Cli::try_parse_from(["trackview"]).unwrap();
        assert_eq!(cli.presets_dir, PathBuf::from("assets/presets"));
        assert_eq!(cli.resolve_options().unwrap(), Options::default());
    }

    #[test]
    fn preset_resolves_inside_presets_dir() {
        let dir = scratch_dir("preset");
        let mut wide = Options::default();
        wide.camera.fovy = 60.0;
        wide.save(&Options::preset_path(&dir, "wide")).unwrap();

        let cli = Cli::try_parse_from([
            "trackview",
            "--preset",
            "wide",
            "--presets-dir",
            dir.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(cli.resolve_options().unwrap(), wide);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_preset_is_an_error() {
        let dir = scratch_dir("missing");
        let cli = Cli::try_parse_from([
            "trackview",
            "-p",
            "nope",
            "--presets-dir",
            dir.to_str().unwrap(),
        ])
        .unwrap();
        assert!(cli.resolve_options().is_err());
    }

    #[test]
    fn options_file_and_preset_conflict() {
        let parsed = Cli::try_parse_from([
            "trackview",
            "--options",
            "a.toml",
            "--preset",
            "wide",
        ]);
        assert!(parsed.is_err());
    }
}
