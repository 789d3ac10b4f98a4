//! Lint a source file, print its diagnostics grouped by severity, then hand
//! it to a preprocessor.
//!
//! The library side is [`Reporter`]: it takes a [`LintEngine`] and a
//! [`Preprocessor`] and is itself a [`Preprocessor`]. The `prelint` binary
//! wires it to an external linter and bundler configured in `prelint.toml`.

use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};

use crate::args::Args;
use crate::config::{ArgsConfig, build_config};
use crate::status::ExitStatus;
use crate::toml::{TomlOptions, find_prelint_toml, parse_prelint_toml};

pub mod args;
pub mod config;
pub mod diagnostic;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod file;
pub mod fs;
pub mod logging;
pub mod preprocessor;
pub mod render;
pub mod reporter;
pub mod status;
pub mod toml;

pub use diagnostic::{Diagnostic, FileResult, LintReport, Severity};
pub use engine::{CommandEngine, LintEngine};
pub use file::FileDescriptor;
pub use preprocessor::{BundleOptions, BundlePreprocessor, Preprocessor};
pub use reporter::{Reporter, create_reporter};

pub fn run(args: Args) -> anyhow::Result<ExitStatus> {
    // Check both the --no-color flag and the NO_COLOR environment variable
    let no_color = args.no_color || env::var("NO_COLOR").is_ok();
    logging::init_logging(args.log_level.unwrap_or_default(), no_color);

    let cwd = env::current_dir()?;
    let config_path = args.config.clone().or_else(|| find_prelint_toml(&cwd));
    let options = match &config_path {
        Some(path) => {
            tracing::info!("Using configuration from {}", path.display());
            parse_prelint_toml(path)?
        }
        None => TomlOptions::default(),
    };
    let config = build_config(&ArgsConfig { no_color }, options);
    if !config.colored {
        colored::control::set_override(false);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.file));
    let file = FileDescriptor::new(&args.file, output);

    let reporter =
        Reporter::with_preprocessor(config.engine, BundlePreprocessor::new(config.bundle))
            .colored(config.colored)
            .cwd(&cwd);

    let (report, preprocessed) = reporter.run_with_report(&file)?;
    let output = preprocessed?;

    println!(
        "\n{} {}",
        "Preprocessed".green().bold(),
        fs::relativize_path(&output, &cwd)
    );

    if report.error_count > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

fn default_output_path(file: &Path) -> PathBuf {
    let name = file
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("out.js"));
    Path::new("dist").join(name)
}
