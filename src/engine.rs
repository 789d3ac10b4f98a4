use std::path::PathBuf;
use std::process::Command;

use crate::diagnostic::LintReport;
use crate::error::EngineError;

/// Something that can lint a set of files and summarise what it found.
///
/// Rule selection and configuration belong to the engine; the reporter only
/// ever calls [`LintEngine::execute_on_files`].
pub trait LintEngine {
    fn execute_on_files(&self, paths: &[PathBuf]) -> Result<LintReport, EngineError>;
}

impl<F> LintEngine for F
where
    F: Fn(&[PathBuf]) -> Result<LintReport, EngineError>,
{
    fn execute_on_files(&self, paths: &[PathBuf]) -> Result<LintReport, EngineError> {
        self(paths)
    }
}

pub const DEFAULT_LINT_COMMAND: &str = "eslint";

pub fn default_lint_args() -> Vec<String> {
    vec!["--format".to_string(), "json".to_string()]
}

/// Runs an external linter that prints its report as JSON on stdout.
///
/// The paths are appended after `args`. Exit codes 0 and 1 are both normal
/// outcomes (1 means "errors were found"), anything else is a failure of the
/// linter itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandEngine {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self {
            command: DEFAULT_LINT_COMMAND.to_string(),
            args: default_lint_args(),
        }
    }
}

impl CommandEngine {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self { command: command.into(), args }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl LintEngine for CommandEngine {
    fn execute_on_files(&self, paths: &[PathBuf]) -> Result<LintReport, EngineError> {
        tracing::debug!("Running `{}` on {:?}", self.command_line(), paths);

        let output = Command::new(&self.command)
            .args(&self.args)
            .args(paths)
            .output()
            .map_err(|source| EngineError::Spawn { command: self.command.clone(), source })?;

        let lint_failed = !matches!(output.status.code(), Some(0 | 1));
        if lint_failed {
            return Err(EngineError::Failed {
                command: self.command_line(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = LintReport::from_json(&stdout)?;
        tracing::debug!(
            "Linter found {} error(s) and {} warning(s)",
            report.error_count,
            report.warning_count
        );
        Ok(report)
    }
}
