use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// The linting engine couldn't produce a report for the requested files.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to start linter `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Linter `{command}` failed ({status}):\n{stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Couldn't read the linter report: {0}")]
    Report(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// The preprocessor couldn't produce its output file.
#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error("Source file `{}` doesn't exist", .0.display())]
    MissingSource(PathBuf),
    #[error("Failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to start bundler `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Bundler `{command}` failed ({status}):\n{stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse `{}`:\n{source}", path.display())]
    Deserialize {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
