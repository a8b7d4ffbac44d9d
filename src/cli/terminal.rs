//! Coloured status text for command output.

use owo_colors::{OwoColorize, colors::css};
use supports_color::Stream;

/// Whether stdout accepts ANSI colours. The answer is cached per process.
fn colors_enabled() -> bool {
    supports_color::on_cached(Stream::Stdout).is_some()
}

/// The role a piece of text plays in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Warning,
    Info,
    Dim,
}

impl Tone {
    fn paint(self, text: &str) -> String {
        if !colors_enabled() {
            return text.to_owned();
        }
        match self {
            Self::Success => text.fg::<css::Green>().to_string(),
            Self::Warning => text.fg::<css::Orange>().to_string(),
            Self::Info => text.fg::<css::LightBlue>().to_string(),
            Self::Dim => text.dimmed().to_string(),
        }
    }
}

/// Paints text by the role it plays: valid records, invalid records,
/// headings and summaries.
pub trait Colorize {
    /// Green, for records that passed.
    fn success(&self) -> String;
    /// Amber, for records that failed.
    fn warning(&self) -> String;
    /// Blue, for table headings.
    fn info(&self) -> String;
    /// Dimmed, for summaries.
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        Tone::Success.paint(self.as_ref())
    }

    fn warning(&self) -> String {
        Tone::Warning.paint(self.as_ref())
    }

    fn info(&self) -> String {
        Tone::Info.paint(self.as_ref())
    }

    fn dim(&self) -> String {
        Tone::Dim.paint(self.as_ref())
    }
}
