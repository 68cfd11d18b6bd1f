//! Styling helpers for terminal output.
//!
//! The [`GiftStyle`] trait applies ANSI styling via the `colored` crate.
//! Implementations for `&str` and `String` are provided so string literals
//! can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GiftStyle {
    fn item_style(&self) -> ColoredString;
    fn npc_style(&self) -> ColoredString;
    fn quest_style(&self) -> ColoredString;
    fn quest_complete_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn denied_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn section_style(&self) -> ColoredString;
    fn points_style(&self) -> ColoredString;
}

impl GiftStyle for &str {
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn npc_style(&self) -> ColoredString {
        self.truecolor(13, 130, 60).underline()
    }
    fn quest_style(&self) -> ColoredString {
        self.truecolor(220, 40, 220)
    }
    fn quest_complete_style(&self) -> ColoredString {
        self.truecolor(220, 40, 220).strikethrough()
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn denied_style(&self) -> ColoredString {
        self.italic().truecolor(200, 50, 50)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn section_style(&self) -> ColoredString {
        format!("[{self}]").truecolor(75, 80, 75)
    }
    fn points_style(&self) -> ColoredString {
        if self.starts_with('-') {
            self.truecolor(200, 50, 50)
        } else {
            self.truecolor(110, 220, 110)
        }
    }
}

impl GiftStyle for String {
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn npc_style(&self) -> ColoredString {
        self.as_str().npc_style()
    }
    fn quest_style(&self) -> ColoredString {
        self.as_str().quest_style()
    }
    fn quest_complete_style(&self) -> ColoredString {
        self.as_str().quest_complete_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn denied_style(&self) -> ColoredString {
        self.as_str().denied_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn section_style(&self) -> ColoredString {
        self.as_str().section_style()
    }
    fn points_style(&self) -> ColoredString {
        self.as_str().points_style()
    }
}
