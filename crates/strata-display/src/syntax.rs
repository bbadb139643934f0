//! Syntax tables — ordered `(pattern, color)` rules for regex coloring.
//!
//! A language highlighter is nothing more than a list of rules fed one by
//! one to [`colorize_regex`](crate::filters::colorize::colorize_regex). Later
//! rules repaint earlier ones, so broad rules (preprocessor lines) come first
//! and narrow ones (keyword classes) last.
//!
//! Tables are compiled explicitly with their constructor and then shared
//! read-only; nothing is compiled lazily on first use.

use regex::Regex;

use crate::display_buffer::DisplayBuffer;
use crate::error::Result;
use crate::filters::colorize::colorize_regex;
use crate::style::Color;

/// One coloring rule.
#[derive(Debug, Clone)]
pub struct SyntaxRule {
    pub name: &'static str,
    pub regex: Regex,
    pub color: Color,
}

/// An ordered rule list for one language.
#[derive(Debug, Clone)]
pub struct SyntaxTable {
    name: &'static str,
    rules: Vec<SyntaxRule>,
}

impl SyntaxTable {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Compile `pattern` and append it as the last rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Regex`](crate::Error::Regex) if the pattern is invalid.
    pub fn push(&mut self, name: &'static str, pattern: &str, color: Color) -> Result<()> {
        self.rules.push(SyntaxRule {
            name,
            regex: Regex::new(pattern)?,
            color,
        });
        Ok(())
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn rules(&self) -> &[SyntaxRule] {
        &self.rules
    }

    /// Run every rule over `display`, in order.
    pub fn apply(&self, display: &mut DisplayBuffer<'_>) {
        for rule in &self.rules {
            colorize_regex(display, &rule.regex, rule.color);
        }
    }

    /// The C/C++ table.
    ///
    /// Char literals are folded into the string rule so that `'"'` never
    /// opens a string; the value rule then repaints them.
    ///
    /// # Errors
    ///
    /// Only if one of the built-in patterns fails to compile.
    pub fn cplusplus() -> Result<Self> {
        let mut table = Self::new("cplusplus");
        table.push("preprocessor", r"(?m)^[ \t]*#[^\n]*$", Color::Magenta)?;
        table.push("comment", r"//[^\n]*\n", Color::Cyan)?;
        table.push(
            "string",
            r#"'(?:\\.|[^'\\])'|"(?:\\.|[^"\\])*""#,
            Color::Magenta,
        )?;
        table.push(
            "value",
            r"\b(?:true|false|NULL|nullptr)\b|\b-?\d+[fdiu]?|'\\?[^']?'",
            Color::Red,
        )?;
        table.push(
            "builtin_type",
            r"\b(?:void|int|char|unsigned|float|bool|size_t)\b",
            Color::Yellow,
        )?;
        table.push(
            "control_keyword",
            r"\b(?:while|for|if|else|do|switch|case|default|goto|break|continue|return|using|try|catch|throw)\b",
            Color::Blue,
        )?;
        table.push(
            "type_keyword",
            r"\b(?:const|auto|namespace|static|volatile|class|struct|enum|union|public|protected|private|template|typedef|virtual)\b",
            Color::Green,
        )?;
        Ok(table)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
