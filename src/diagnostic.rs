use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::path::PathBuf;

use crate::error::EngineError;

/// Severity of a diagnostic, using the numeric codes linters put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    Warning = 1,
    Error = 2,
}

impl Severity {
    /// Groups are always rendered in this order.
    pub const ALL: [Severity; 2] = [Severity::Error, Severity::Warning];

    /// Label used in the group header, e.g. `ERROR in ...`.
    pub fn title(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }

    /// Label used on each diagnostic line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Error => Color::Red,
            Self::Warning => Color::Yellow,
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Error),
            other => Err(format!("unknown severity `{other}`, expected 1 or 2")),
        }
    }
}

impl From<Severity> for u8 {
    fn from(value: Severity) -> Self {
        value as u8
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub column: usize,
    pub severity: Severity,
    pub message: String,
    /// `None` for messages that don't come from a rule, e.g. parsing errors.
    #[serde(default)]
    pub rule_id: Option<String>,
}

impl Diagnostic {
    pub fn new(
        line: usize,
        column: usize,
        severity: Severity,
        message: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            severity,
            message: message.into(),
            rule_id: Some(rule_id.into()),
        }
    }

    /// The `line:column` token shown at the start of a rendered line.
    pub fn position(&self) -> String {
        format!("{}:{}", self.line, self.column)
    }

    pub fn rule(&self) -> &str {
        self.rule_id.as_deref().unwrap_or("")
    }
}

/// All diagnostics found in one file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    #[serde(default)]
    pub file_path: PathBuf,
    #[serde(default)]
    pub messages: Vec<Diagnostic>,
    #[serde(default)]
    pub error_count: usize,
    #[serde(default)]
    pub warning_count: usize,
}

impl FileResult {
    /// Build a result whose counts match its messages.
    pub fn new(file_path: impl Into<PathBuf>, messages: Vec<Diagnostic>) -> Self {
        let error_count = count(&messages, Severity::Error);
        let warning_count = count(&messages, Severity::Warning);
        Self {
            file_path: file_path.into(),
            messages,
            error_count,
            warning_count,
        }
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter().filter(move |d| d.severity == severity)
    }
}

fn count(messages: &[Diagnostic], severity: Severity) -> usize {
    messages.iter().filter(|d| d.severity == severity).count()
}

/// What a linting engine returns for one invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    #[serde(default)]
    pub error_count: usize,
    #[serde(default)]
    pub warning_count: usize,
    #[serde(default)]
    pub results: Vec<FileResult>,
}

impl LintReport {
    /// Sum the per-file counts into a report.
    pub fn from_results(results: Vec<FileResult>) -> Self {
        let error_count = results.iter().map(|r| r.error_count).sum();
        let warning_count = results.iter().map(|r| r.warning_count).sum();
        Self { error_count, warning_count, results }
    }

    /// Parse the JSON printed by a linter's machine-readable formatter.
    ///
    /// Both a bare array of file results (what `eslint --format json` prints)
    /// and a full report object are accepted.
    pub fn from_json(input: &str) -> Result<Self, EngineError> {
        let input = input.trim();
        if input.starts_with('[') {
            let results: Vec<FileResult> = serde_json::from_str(input)?;
            Ok(Self::from_results(results))
        } else {
            Ok(serde_json::from_str(input)?)
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error_count,
            Severity::Warning => self.warning_count,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }
}
