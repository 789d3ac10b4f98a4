use std::io::Write;
use std::path::Path;

use crate::diagnostic::{LintReport, Severity};
use crate::fs::{absolutize, relativize_path};
use crate::render::{RenderGroup, Style};

/// Prints a lint report grouped by severity:
///
/// ```text
///
/// ERROR in /home/me/project/cypress/spec.js
///
/// cypress/spec.js
/// 24:17  error  Expected indentation of 2 spaces but found 4  indent
/// ```
///
/// Errors come first, then warnings. Nothing is printed for a clean report.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleEmitter {
    pub style: Style,
}

impl ConsoleEmitter {
    pub fn new(colored: bool) -> Self {
        Self { style: Style { colored } }
    }

    pub fn emit<W: Write>(
        &self,
        writer: &mut W,
        file_path: &Path,
        report: &LintReport,
        cwd: &Path,
    ) -> std::io::Result<()> {
        for severity in Severity::ALL {
            if report.count(severity) == 0 {
                continue;
            }
            self.emit_severity(writer, severity, file_path, report, cwd)?;
        }
        Ok(())
    }

    fn emit_severity<W: Write>(
        &self,
        writer: &mut W,
        severity: Severity,
        file_path: &Path,
        report: &LintReport,
        cwd: &Path,
    ) -> std::io::Result<()> {
        let title = format!(
            "{} in {}",
            severity.title(),
            absolutize(file_path, cwd).display()
        );
        writeln!(writer, "\n{}", self.style.paint_bold(&title, severity.color()))?;

        for result in &report.results {
            let group = RenderGroup::new(severity, &result.messages);
            if group.is_empty() {
                continue;
            }

            // Engines don't always say which file a result belongs to.
            let result_path = if result.file_path.as_os_str().is_empty() {
                file_path
            } else {
                result.file_path.as_path()
            };
            writeln!(writer, "\n{}", relativize_path(result_path, cwd))?;

            for line in group.lines(self.style) {
                writeln!(writer, "{line}")?;
            }
        }
        Ok(())
    }
}
