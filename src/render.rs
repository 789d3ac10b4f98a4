use colored::{Color, Colorize};

use crate::diagnostic::{Diagnostic, Severity};

/// Color used for the position and the rule name.
const METADATA_COLOR: Color = Color::BrightBlack;
/// Color used for the message text.
const MESSAGE_COLOR: Color = Color::White;
/// Spacing between two columns of a diagnostic line.
const GAP: &str = "  ";

/// Whether rendered text carries ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub colored: bool,
}

impl Style {
    pub const PLAIN: Style = Style { colored: false };
    pub const COLORED: Style = Style { colored: true };

    pub fn paint(self, text: &str, color: Color) -> String {
        if self.colored {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn paint_bold(self, text: &str, color: Color) -> String {
        if self.colored {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// All the diagnostics of one severity found in one file, along with the
/// column widths needed to print them aligned.
#[derive(Debug, Clone)]
pub struct RenderGroup<'a> {
    pub severity: Severity,
    pub diagnostics: Vec<&'a Diagnostic>,
    /// Width of the widest `line:column` token.
    pub position_width: usize,
    /// Width of the widest message.
    pub message_width: usize,
}

impl<'a> RenderGroup<'a> {
    /// Keep the diagnostics of `severity` and measure them. Everything else is
    /// left out.
    pub fn new(severity: Severity, diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Self {
        let diagnostics: Vec<&Diagnostic> = diagnostics
            .into_iter()
            .filter(|d| d.severity == severity)
            .collect();

        let position_width = diagnostics
            .iter()
            .map(|d| d.position().chars().count())
            .max()
            .unwrap_or(0);
        let message_width = diagnostics
            .iter()
            .map(|d| d.message.chars().count())
            .max()
            .unwrap_or(0);

        Self { severity, diagnostics, position_width, message_width }
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// One line per diagnostic:
    ///
    /// ```text
    ///  24:17  error  Expected indentation of 2 spaces but found 4  indent
    /// 551:12  error  Strings must use singlequote                  quotes
    /// ```
    pub fn lines(&self, style: Style) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|diagnostic| self.line(diagnostic, style))
            .collect()
    }

    fn line(&self, diagnostic: &Diagnostic, style: Style) -> String {
        let label = self.severity.label();
        let painted_label = style.paint(label, self.severity.color());

        let position = format!("{:>width$}", diagnostic.position(), width = self.position_width);
        let position = style.paint(&position, METADATA_COLOR);

        let rule = diagnostic.rule();
        if rule.is_empty() {
            let message = style.paint(&diagnostic.message, MESSAGE_COLOR);
            return format!("{position}{GAP}{painted_label}{GAP}{message}");
        }

        let message = format!("{:<width$}", diagnostic.message, width = self.message_width);
        let message = style.paint(&message, MESSAGE_COLOR);
        let rule = style.paint(rule, METADATA_COLOR);

        format!("{position}{GAP}{painted_label}{GAP}{message}{GAP}{rule}")
    }
}
