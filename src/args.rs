use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use std::path::PathBuf;

use crate::logging::LogLevel;

// Configures Clap v3-style help menu colors
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(
    author,
    name = "prelint",
    about = "prelint: lint a file, report its diagnostics, then preprocess it"
)]
#[command(version)]
#[command(styles = STYLES)]
pub struct Args {
    #[arg(help = "The source file to lint and preprocess.")]
    pub file: PathBuf,
    #[arg(
        short,
        long,
        help = "Where the preprocessed file is written. Defaults to `dist/<file name>`."
    )]
    pub output: Option<PathBuf>,
    #[arg(
        short,
        long,
        help = "Path to a `prelint.toml`. By default, it is searched in the current directory and its parents."
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        default_value = "false",
        help = "Disable colors in the output. The `NO_COLOR` environment variable has the same effect."
    )]
    pub no_color: bool,
    /// The log level. One of: `error`, `warn`, `info`, `debug`, or `trace`. Defaults
    /// to `warn`.
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}
