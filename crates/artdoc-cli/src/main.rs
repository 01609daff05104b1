//! artdoc CLI - prepare image manifests and build scaled-artwork documents
//!
//! Two-step workflow: `artdoc prepare` lists an image folder into a CSV
//! manifest, the user fills in the life-size (and optional frame) columns,
//! then `artdoc build` produces the final A4 document.

use anyhow::{bail, Context, Result};
use artdoc_backend::docx::{DocumentSink, DocxSink};
use artdoc_backend::manifest::{self, Manifest};
use artdoc_backend::processor::process_manifest;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

/// Configuration file structure for .artdoc.toml
///
/// Configuration files can be placed in:
/// - User home directory: ~/.artdoc.toml (user defaults)
/// - Project directory: ./.artdoc.toml (project defaults)
///
/// Precedence order (highest to lowest):
/// 1. Command-line arguments (--scale)
/// 2. Project config (./.artdoc.toml)
/// 3. User config (~/.artdoc.toml)
/// 4. Built-in defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
struct Config {
    /// Default settings for the prepare command
    prepare: Option<PrepareConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
struct PrepareConfig {
    /// Default scale written into prepared manifests
    scale: Option<f64>,
}

impl Config {
    /// Load configuration from file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            eprintln!(
                "{} Failed to parse config file: {}",
                "Error:".red().bold(),
                path.display()
            );
            eprintln!("{} {}", "Parse error:".yellow().bold(), e);
            eprintln!();
            eprintln!("{} Configuration file syntax:", "Help:".cyan().bold());
            eprintln!("  [prepare]");
            eprintln!("  scale = 2.0");
            anyhow::anyhow!("Failed to parse config file: {e}")
        })?;

        Ok(config)
    }

    /// Find and load configuration files
    /// Returns (`user_config`, `project_config`)
    fn discover_configs() -> (Option<Self>, Option<Self>) {
        (Self::load_user_config(), Self::load_project_config())
    }

    /// Load user config from ~/.artdoc.toml
    fn load_user_config() -> Option<Self> {
        let config_path = dirs::home_dir()?.join(".artdoc.toml");
        Self::load_optional(&config_path)
    }

    /// Load project config from ./.artdoc.toml
    fn load_project_config() -> Option<Self> {
        Self::load_optional(&PathBuf::from(".artdoc.toml"))
    }

    fn load_optional(config_path: &Path) -> Option<Self> {
        if !config_path.exists() {
            return None;
        }
        match Self::load_from_file(config_path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!(
                    "{} Failed to load config from {}: {}",
                    "Warning:".yellow().bold(),
                    config_path.display(),
                    e
                );
                None
            }
        }
    }

    /// Merge configs with precedence: project config > user config
    fn merge(user_config: Option<Self>, project_config: Option<Self>) -> Self {
        let mut merged = user_config.unwrap_or_default();
        if let Some(project) = project_config {
            if let Some(prepare) = project.prepare {
                let mut merged_prepare = merged.prepare.unwrap_or_default();
                if let Some(scale) = prepare.scale {
                    merged_prepare.scale = Some(scale);
                }
                merged.prepare = Some(merged_prepare);
            }
        }
        merged
    }

    /// Resolve the scale from CLI, config, or the life-size default
    fn resolve_scale(&self, cli_value: Option<f64>) -> f64 {
        cli_value
            .or_else(|| self.prepare.as_ref().and_then(|p| p.scale))
            .unwrap_or(1.0)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "artdoc",
    about = "Produce a print-ready document of scaled artwork photographs",
    long_about = "Produce a print-ready A4 document (.docx) of artwork photographs, each \n\
                  scaled to its real-world size and optionally framed.\n\
                  \n\
                  Workflow:\n\
                    1. artdoc prepare <IMAGE_DIR> -m artworks.csv --scale 2\n\
                    2. fill in the life-size (and frame) columns of artworks.csv\n\
                    3. artdoc build artworks.csv -o artworks.docx",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List an image folder into a CSV manifest template
    #[command(long_about = "List every .jpg/.png file in a folder into a CSV manifest.\n\
                      \n\
                      The measurement columns are left blank: open the manifest in a \n\
                      spreadsheet, enter each artwork's life size (and, optionally, its \n\
                      frame size and shape), then run `artdoc build`.\n\
                      \n\
                      The default scale can be set via .artdoc.toml.")]
    Prepare {
        /// Folder containing the artwork photographs
        #[arg(value_name = "IMAGE_DIR")]
        images: PathBuf,

        /// Manifest file to write
        #[arg(short, long, value_name = "CSV")]
        manifest: PathBuf,

        /// Scale divisor: 1 document cm represents SCALE real cm (default: 1, or from config)
        #[arg(short, long, value_name = "SCALE")]
        scale: Option<f64>,
    },

    /// Build the scaled document from a filled-in manifest
    #[command(long_about = "Read a filled-in manifest CSV and produce the final document.\n\
                      \n\
                      Each valid row places its image scaled to size, followed by a \n\
                      caption with the source path. Rows with bad or missing values are \n\
                      reported and skipped; the rest of the batch still completes.")]
    Build {
        /// Manifest file to read
        #[arg(value_name = "CSV")]
        manifest: PathBuf,

        /// Output document path
        #[arg(short, long, value_name = "DOCX")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);

    let default_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let (user_config, project_config) = Config::discover_configs();
    let config = Config::merge(user_config, project_config);

    match args.command {
        Commands::Prepare {
            images,
            manifest,
            scale,
        } => run_prepare(&images, &manifest, config.resolve_scale(scale), verbosity),
        Commands::Build { manifest, output } => run_build(&manifest, &output, verbosity),
    }
}

fn run_prepare(images: &Path, manifest_path: &Path, scale: f64, verbosity: Verbosity) -> Result<()> {
    if !scale.is_finite() || scale <= 0.0 {
        bail!("Please give a positive number for the scale (got {scale})");
    }

    let count = manifest::write_template(images, manifest_path, scale)
        .with_context(|| format!("failed to prepare a manifest from {}", images.display()))?;

    if verbosity.should_show_output() {
        println!(
            "{} {} rows written to {}",
            "Prepared:".green().bold(),
            count,
            manifest_path.display()
        );
        println!(
            "Scale set to 1:{} ({:.2}% life size)",
            scale,
            100.0 / scale
        );
        println!(
            "Fill in the life-size columns, then run: artdoc build {} -o <document.docx>",
            manifest_path.display()
        );
    }

    Ok(())
}

fn run_build(manifest_path: &Path, output: &Path, verbosity: Verbosity) -> Result<()> {
    let spinner = if verbosity.should_show_output() {
        let s = ProgressBar::new_spinner();
        s.set_style(ProgressStyle::default_spinner());
        s.set_message("Scaling images...");
        s.enable_steady_tick(Duration::from_millis(100));
        s
    } else {
        ProgressBar::hidden()
    };

    let manifest = Manifest::load(manifest_path)
        .with_context(|| format!("failed to read manifest {}", manifest_path.display()))?;

    let mut sink = DocxSink::new();
    let report = process_manifest(&manifest, &mut sink).context("scaling run aborted")?;
    sink.finalize(output)
        .with_context(|| format!("could not save {}", output.display()))?;

    spinner.finish_and_clear();

    for message in report.messages() {
        eprintln!("{} {message}", "Warning:".yellow().bold());
    }

    if verbosity.should_show_output() {
        println!(
            "{} {} of {} rows placed. Your file can be found at {}",
            "Finished:".green().bold(),
            report.images_placed(),
            report.rows_total(),
            output.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn test_quiet_suppresses_output() {
        assert!(!Verbosity::Quiet.should_show_output());
        assert!(Verbosity::Normal.should_show_output());
        assert!(Verbosity::Verbose.should_show_output());
    }

    #[test]
    fn test_config_merge_project_overrides_user() {
        let user = Config {
            prepare: Some(PrepareConfig { scale: Some(2.0) }),
        };
        let project = Config {
            prepare: Some(PrepareConfig { scale: Some(5.0) }),
        };
        let merged = Config::merge(Some(user), Some(project));
        assert_eq!(merged.resolve_scale(None), 5.0);
    }

    #[test]
    fn test_config_cli_overrides_everything() {
        let config = Config {
            prepare: Some(PrepareConfig { scale: Some(5.0) }),
        };
        assert_eq!(config.resolve_scale(Some(3.0)), 3.0);
    }

    #[test]
    fn test_config_default_scale_is_life_size() {
        assert_eq!(Config::default().resolve_scale(None), 1.0);
    }

    #[test]
    fn test_config_parses_toml() {
        let config: Config = toml::from_str("[prepare]\nscale = 2.5\n").unwrap();
        assert_eq!(config.resolve_scale(None), 2.5);
    }

    #[test]
    fn test_config_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }
}
