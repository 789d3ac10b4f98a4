use clap::ValueEnum;
use std::fmt::{self, Display};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Send log events to stderr, stdout is reserved for diagnostics.
pub fn init_logging(level: LogLevel, no_color: bool) {
    let filter = EnvFilter::try_new(format!("prelint={level}"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_ansi(!no_color)
                .with_target(false)
                .with_line_number(false),
        )
        .with(filter)
        .try_init();

    if let Err(err) = result {
        eprintln!("Failed to set up logging: {err}");
    }
}
