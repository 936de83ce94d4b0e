//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};
use textwrap::{Options, termwidth};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn narrative_style(&self) -> ColoredString;
    fn notice_style(&self) -> ColoredString;
    fn scene_style(&self) -> ColoredString;
    fn victory_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn narrative_style(&self) -> ColoredString {
        self.truecolor(102, 208, 250)
    }
    fn notice_style(&self) -> ColoredString {
        self.italic().truecolor(220, 180, 40)
    }
    fn scene_style(&self) -> ColoredString {
        self.bold().truecolor(223, 77, 10)
    }
    fn victory_style(&self) -> ColoredString {
        self.bold().truecolor(230, 230, 30)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(75, 80, 75)
    }
}

impl GameStyle for String {
    fn narrative_style(&self) -> ColoredString {
        self.as_str().narrative_style()
    }
    fn notice_style(&self) -> ColoredString {
        self.as_str().notice_style()
    }
    fn scene_style(&self) -> ColoredString {
        self.as_str().scene_style()
    }
    fn victory_style(&self) -> ColoredString {
        self.as_str().victory_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
}

/// Wrapping options for ordinary output: terminal width, capped for readability.
pub fn normal_block() -> Options<'static> {
    Options::new(termwidth().min(100))
}
