//! Regex colorizer.
//!
//! Paints the foreground of every match of a pattern over the whole covered
//! range. A match is colored only when it lies inside a single existing
//! atom; a match straddling an atom boundary is dropped. Running a
//! fragmenting filter before a colorizer can therefore hide matches.
//!
//! ```text
//!   atoms   [int x = 42;                 ]      one atom
//!   match            ^^
//!   after   [int x = ][42][;             ]      42 painted red
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, trace};

use crate::display_buffer::DisplayBuffer;
use crate::error::Result;
use crate::filter::Filter;
use crate::params::FilterParameters;
use crate::style::Color;
use crate::syntax::SyntaxTable;

use super::REGEX;

/// Paint `color` as the foreground of every match of `regex`.
///
/// Returns the number of matches painted. Empty matches and matches that
/// span more than one atom are skipped.
pub fn colorize_regex(display: &mut DisplayBuffer<'_>, regex: &Regex, color: Color) -> usize {
    let buffer = display.buffer();
    let Some(slice) = buffer.slice(display.range()) else {
        return 0;
    };
    let text: Cow<'_, str> = slice.into();
    let base_byte = buffer.char_to_byte(display.begin());

    let mut hint = 0;
    let mut painted = 0;
    let mut dropped = 0;
    for m in regex.find_iter(&text) {
        if m.is_empty() {
            continue;
        }
        let begin = buffer.byte_to_char(base_byte + m.start());
        let end = buffer.byte_to_char(base_byte + m.end());

        let first = display.atom_containing(begin, hint);
        let last = first.and_then(|idx| display.atom_containing(end - 1, idx));
        match (first, last) {
            (Some(a), Some(b)) if a == b && fits(display, a, begin, end) => {
                let idx = display.split(a, begin);
                display.split(idx, end);
                display.atom_mut(idx).fg = color;
                hint = idx;
                painted += 1;
            }
            _ => {
                trace!(begin, end, "match straddles atoms or cuts a fixed atom, dropped");
                if let Some(idx) = first {
                    hint = idx;
                }
                dropped += 1;
            }
        }
    }
    debug!(pattern = regex.as_str(), %color, painted, dropped, "colorized");
    painted
}

/// A match can be cut out of atom `idx` unless the atom is not splitable
/// and the match does not cover it exactly.
fn fits(display: &DisplayBuffer<'_>, idx: usize, begin: usize, end: usize) -> bool {
    let atom = display.atom(idx);
    atom.splitable() || (atom.begin() == begin && atom.end() == end)
}

/// Applies a whole [`SyntaxTable`].
pub struct SyntaxHighlighter {
    id: String,
    table: Arc<SyntaxTable>,
}

impl SyntaxHighlighter {
    #[must_use]
    pub fn new(id: impl Into<String>, table: Arc<SyntaxTable>) -> Self {
        Self {
            id: id.into(),
            table,
        }
    }
}

impl Filter for SyntaxHighlighter {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, display: &mut DisplayBuffer<'_>) {
        self.table.apply(display);
    }
}

/// Paints one user-supplied pattern.
pub struct RegexHighlighter {
    id: String,
    regex: Regex,
    color: Color,
}

impl RegexHighlighter {
    #[must_use]
    pub fn new(id: impl Into<String>, regex: Regex, color: Color) -> Self {
        Self {
            id: id.into(),
            regex,
            color,
        }
    }

    /// Build from `pattern=`, `color=` and an optional `id=`.
    ///
    /// # Errors
    ///
    /// Missing or unknown keys, an unknown color, or a pattern that does not
    /// compile.
    pub fn from_params(params: &FilterParameters) -> Result<Self> {
        params.expect_only(REGEX, &["pattern", "color", "id"])?;
        let pattern = params.require(REGEX, "pattern")?;
        let color = params.color(REGEX, "color")?;
        let regex = Regex::new(pattern)?;
        let id = params
            .get("id")
            .map_or_else(|| format!("hlregex_{pattern}"), str::to_string);
        Ok(Self::new(id, regex, color))
    }
}

impl Filter for RegexHighlighter {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, display: &mut DisplayBuffer<'_>) {
        colorize_regex(display, &self.regex, self.color);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
