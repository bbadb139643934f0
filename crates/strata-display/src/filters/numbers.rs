//! Line-number gutter.
//!
//! Inserts a synthetic atom rendering `"%3d "` (1-based, right-aligned in
//! three columns, trailing space) before the first atom of every covered
//! line. Numbers of four or more digits widen the field rather than being
//! truncated: line 1000 renders as `"1000 "`.

use tracing::{debug, trace};

use crate::atom::DisplayAtom;
use crate::display_buffer::DisplayBuffer;
use crate::filter::Filter;
use crate::style::Color;

use super::NUMBER_LINES;

/// Gutter foreground.
pub const GUTTER_FG: Color = Color::Black;
/// Gutter background.
pub const GUTTER_BG: Color = Color::White;

/// Gutter text for 0-indexed `line`.
#[must_use]
pub fn format_line_number(line: usize) -> String {
    format!("{:>3} ", line + 1)
}

/// Insert a gutter atom at the start of every covered line.
///
/// On the first line the gutter goes at the start of the covered range,
/// even if that is mid-line. A line is skipped when its start falls strictly
/// inside a non-splitable atom, or when a synthetic atom already sits there
/// (so a second run adds no duplicates). Returns the number of gutters
/// inserted.
pub fn number_lines(display: &mut DisplayBuffer<'_>) -> usize {
    if display.is_empty() {
        return 0;
    }
    let buffer = display.buffer();
    let first_line = buffer.char_to_line(display.begin());
    let last_line = buffer.char_to_line(display.end() - 1);

    let mut hint = 0;
    let mut inserted = 0;
    for line in first_line..=last_line {
        let Some(line_start) = buffer.line_to_char(line) else {
            break;
        };
        let start = line_start.max(display.begin());
        let Some(mut idx) = display.atom_containing(start, hint) else {
            continue;
        };

        let atom = display.atom(idx);
        if atom.begin() != start {
            if !atom.splitable() {
                trace!(line, "line start inside non-splitable atom, skipped");
                continue;
            }
            idx = display.split(idx, start);
        } else if idx > 0 && display.atom(idx - 1).is_synthetic() {
            trace!(line, "gutter already present, skipped");
            hint = idx;
            continue;
        }

        let gutter = display.insert(idx, DisplayAtom::synthetic(start, GUTTER_FG, GUTTER_BG));
        display.replace_atom_content(gutter, format_line_number(line));
        hint = gutter + 1;
        inserted += 1;
    }
    debug!(first_line, last_line, inserted, "lines numbered");
    inserted
}

/// The `number_lines` filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineNumbers;

impl Filter for LineNumbers {
    fn id(&self) -> &str {
        NUMBER_LINES
    }

    fn apply(&self, display: &mut DisplayBuffer<'_>) {
        number_lines(display);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
