//! Provides the functions related to rendering diagnostics to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::{Color, Style};

use crate::source_file::Span;

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = Style::Bold.with(match self.severity {
            Severity::Error => Color::Red.with("[error]:"),
            Severity::Info => Color::Green.with("[info]:"),
            Severity::Warning => Color::Yellow.with("[warning]:"),
        });

        let message_part = Style::Bold.with(&self.display);

        write!(f, "{log_header} {message_part}")
    }
}

/// Structure implementing [`Display`] that prints the source line a span
/// starts on, verbatim, with a caret marking the starting column.
///
/// This is a pure rendering over the span's data; it holds no parser state
/// and can be constructed from an error value directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message to be displayed under the caret.
    pub help_display: Option<T>,
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let location = self.span.start_location();
        let line_number = location.line as usize;

        writeln!(
            f,
            " {} {}",
            Style::Bold.with(Color::Cyan.with("-->")),
            format_args!(
                "{}:{}:{}",
                self.span.source_file().full_path().display(),
                location.line,
                location.column
            )
        )?;

        let Some(line) = self.span.source_file().get_line(line_number) else {
            return Ok(());
        };

        // the line itself, tabs expanded so the caret math stays aligned
        write!(f, " {} ", Style::Bold.with(Color::Cyan.with("┃")))?;
        for char in line.chars() {
            if char == '\t' {
                write!(f, "    ")?;
            } else if char != '\n' && char != '\r' {
                write!(f, "{char}")?;
            }
        }
        writeln!(f)?;

        // caret aligned under the starting column
        write!(f, " {} ", Style::Bold.with(Color::Cyan.with("┃")))?;
        for (index, char) in line.chars().enumerate() {
            if index + 1 >= location.column as usize {
                break;
            }
            write!(f, "{}", if char == '\t' { "    " } else { " " })?;
        }
        writeln!(f, "{}", Style::Bold.with(Color::Red.with("^")))?;

        if let Some(help_display) = &self.help_display {
            writeln!(f, " {} {}: {help_display}", Style::Bold.with(Color::Cyan.with("=")), Style::Bold.with("help"))?;
        }

        Ok(())
    }
}
