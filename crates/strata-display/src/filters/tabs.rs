//! Tab expansion.
//!
//! Each tab becomes its own atom whose content is enough spaces to reach the
//! next tab stop. The visual column of a tab is found by replaying the raw
//! characters of its line from column 0, so earlier tabs on the same line
//! compound:
//!
//! ```text
//!   a → b → c          tabstop 8
//!   0 1     8 9     16
//!     └─7─┘   └─7─┘
//! ```

use strata_text::Buffer;
use tracing::debug;

use crate::display_buffer::DisplayBuffer;
use crate::error::Result;
use crate::filter::Filter;
use crate::params::FilterParameters;

use super::EXPAND_TABS;

/// Tab stop width when none is configured.
pub const DEFAULT_TABSTOP: usize = 8;

/// Visual column of char offset `pos`, replaying its line from column 0.
///
/// A plain char advances one column; a tab advances to the next multiple of
/// `tabstop`.
#[must_use]
pub fn visual_column(buffer: &Buffer, pos: usize, tabstop: usize) -> usize {
    let line = buffer.char_to_line(pos);
    let line_start = buffer.line_to_char(line).unwrap_or(pos);
    buffer
        .chars_at(line_start)
        .take(pos - line_start)
        .fold(0, |column, ch| {
            debug_assert_ne!(ch, '\n', "line replay crossed a newline");
            if ch == '\t' {
                column + tabstop - column % tabstop
            } else {
                column + 1
            }
        })
}

/// Replace every tab in `display` with spaces up to the next tab stop.
///
/// Atoms that already carry a content override are left alone, since their
/// buffer text is not what gets rendered. Returns the number of tabs
/// expanded.
///
/// # Panics
///
/// Panics if `tabstop` is zero.
pub fn expand_tabs(display: &mut DisplayBuffer<'_>, tabstop: usize) -> usize {
    assert!(tabstop > 0, "tabstop must be positive");
    let buffer = display.buffer();
    let mut expanded = 0;
    let mut idx = 0;
    while idx < display.len() {
        let atom = display.atom(idx);
        if atom.content().is_some() {
            idx += 1;
            continue;
        }
        let begin = atom.begin();
        let tab = buffer
            .chars_at(begin)
            .take(atom.end() - begin)
            .position(|ch| ch == '\t')
            .map(|offset| begin + offset);

        if let Some(pos) = tab {
            idx = display.split(idx, pos);
            display.split(idx, pos + 1);
            let column = visual_column(buffer, pos, tabstop);
            display.replace_atom_content(idx, " ".repeat(tabstop - column % tabstop));
            expanded += 1;
        }
        // Either the tab atom just replaced, or an atom with no tab in it.
        idx += 1;
    }
    debug!(tabstop, expanded, "tabs expanded");
    expanded
}

/// The `expand_tabs` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabExpander {
    tabstop: usize,
}

impl TabExpander {
    /// # Panics
    ///
    /// Panics if `tabstop` is zero.
    #[must_use]
    pub const fn new(tabstop: usize) -> Self {
        assert!(tabstop > 0, "tabstop must be positive");
        Self { tabstop }
    }

    /// Build from an optional `tabstop=` (default 8, at least 1).
    ///
    /// # Errors
    ///
    /// Unknown keys or a tabstop that is not a positive integer.
    pub fn from_params(params: &FilterParameters) -> Result<Self> {
        params.expect_only(EXPAND_TABS, &["tabstop"])?;
        let tabstop = params.usize_or(EXPAND_TABS, "tabstop", DEFAULT_TABSTOP, 1)?;
        Ok(Self { tabstop })
    }

    #[must_use]
    pub const fn tabstop(&self) -> usize {
        self.tabstop
    }
}

impl Default for TabExpander {
    fn default() -> Self {
        Self::new(DEFAULT_TABSTOP)
    }
}

impl Filter for TabExpander {
    fn id(&self) -> &str {
        EXPAND_TABS
    }

    fn apply(&self, display: &mut DisplayBuffer<'_>) {
        expand_tabs(display, self.tabstop);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
