//! Selection highlighter.
//!
//! Underlines exactly the selected chars, splitting atoms where a selection
//! boundary falls inside one. Colors set by other filters are untouched; only
//! the [`Attr::UNDERLINE`] bit is added.
//!
//! The sweep walks the atoms and the sorted selections together. For the
//! current atom `[ab, ae)` and selection `[sb, se)` exactly one case holds:
//!
//! ```text
//!   selection        ├─────────┤
//!   1 starts in        [###----]       split at se
//!   2 straddles   [---#########---]    split at sb and se
//!   3 ends in     [------###]          split at sb
//!   4 inside           [###]           underline whole atom
//!   5 after                      [--]  next selection
//!   6 before    [--]                   next atom
//! ```

use strata_text::selection::sort_by_begin;
use strata_text::Selection;
use tracing::debug;

use crate::display_buffer::DisplayBuffer;
use crate::filter::{Filter, SharedSelections};
use crate::style::Attr;

use super::HIGHLIGHT_SELECTIONS;

fn underline(display: &mut DisplayBuffer<'_>, idx: usize) {
    display.atom_mut(idx).attrs |= Attr::UNDERLINE;
}

/// Underline every part of `display` covered by a selection.
///
/// Selections may arrive in any order and may overlap. Empty selections
/// cover nothing and are ignored; synthetic atoms are never underlined.
/// Returns the number of atoms underlined.
///
/// # Panics
///
/// Panics if the atom sequence is not a valid partition (no case applies).
pub fn highlight_selections(display: &mut DisplayBuffer<'_>, selections: &[Selection]) -> usize {
    let mut sorted: Vec<Selection> = selections.iter().copied().filter(|s| !s.is_empty()).collect();
    sort_by_begin(&mut sorted);

    let mut underlined = 0;
    let mut atom_idx = 0;
    let mut sel_idx = 0;
    while atom_idx < display.len() && sel_idx < sorted.len() {
        let atom = display.atom(atom_idx);
        if atom.is_synthetic() {
            atom_idx += 1;
            continue;
        }
        let (ab, ae) = (atom.begin(), atom.end());
        let (sb, se) = (sorted[sel_idx].begin(), sorted[sel_idx].end());

        if ab >= sb && ab < se && ae > se {
            // [###------]
            display.split(atom_idx, se);
            underline(display, atom_idx);
            underlined += 1;
            atom_idx += 1;
            sel_idx += 1;
        } else if ab < sb && ae > se {
            // [---###---]
            let middle = display.split(atom_idx, sb);
            display.split(middle, se);
            underline(display, middle);
            underlined += 1;
            atom_idx = middle + 1;
            sel_idx += 1;
        } else if ab < sb && ae > sb {
            // [------###]
            let right = display.split(atom_idx, sb);
            underline(display, right);
            underlined += 1;
            atom_idx = right + 1;
        } else if ab >= sb && ae <= se {
            // [#########]
            underline(display, atom_idx);
            underlined += 1;
            atom_idx += 1;
        } else if ab >= se {
            sel_idx += 1;
        } else if ae <= sb {
            atom_idx += 1;
        } else {
            unreachable!("atom {ab}..{ae} matches no case for selection {sb}..{se}");
        }
    }
    debug!(selections = sorted.len(), underlined, "selections highlighted");
    underlined
}

/// The `highlight_selections` filter. Reads the window's selections at every
/// application.
pub struct SelectionHighlighter {
    selections: SharedSelections,
}

impl SelectionHighlighter {
    #[must_use]
    pub const fn new(selections: SharedSelections) -> Self {
        Self { selections }
    }
}

impl Filter for SelectionHighlighter {
    fn id(&self) -> &str {
        HIGHLIGHT_SELECTIONS
    }

    fn apply(&self, display: &mut DisplayBuffer<'_>) {
        let selections = self.selections.borrow();
        highlight_selections(display, &selections);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::DisplayAtom;
    use crate::style::Color;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::ops::Range;
    use std::rc::Rc;
    use strata_text::Buffer;

    fn sel(begin: usize, end: usize) -> Selection {
        Selection::new(begin, end)
    }

    /// Ranges of underlined atoms.
    fn underlined(display: &DisplayBuffer<'_>) -> Vec<Range<usize>> {
        display
            .atoms()
            .iter()
            .filter(|a| a.attrs.contains(Attr::UNDERLINE))
            .map(|a| a.begin()..a.end())
            .collect()
    }

    fn ten() -> Buffer {
        Buffer::from_text("0123456789")
    }

    #[test]
    fn selection_inside_one_atom() {
        let buf = ten();
        let mut display = DisplayBuffer::new(&buf, 0..10);
        highlight_selections(&mut display, &[sel(3, 7)]);
        assert_eq!(display.ranges(), vec![0..3, 3..7, 7..10]);
        assert_eq!(underlined(&display), vec![3..7]);
    }

    #[test]
    fn atom_starting_inside_selection() {
        let buf = ten();
        let mut display = DisplayBuffer::new(&buf, 0..10);
        display.split(0, 4);
        highlight_selections(&mut display, &[sel(2, 6)]);
        assert_eq!(display.ranges(), vec![0..2, 2..4, 4..6, 6..10]);
        assert_eq!(underlined(&display), vec![2..4, 4..6]);
    }

    #[test]
    fn selection_covering_whole_atoms() {
        let buf = ten();
        let mut display = DisplayBuffer::new(&buf, 0..10);
        display.split(0, 5);
        highlight_selections(&mut display, &[sel(0, 10)]);
        assert_eq!(display.ranges(), vec![0..5, 5..10]);
        assert_eq!(underlined(&display), vec![0..5, 5..10]);
    }

    #[test]
    fn several_selections_any_order() {
        let buf = ten();
        let mut display = DisplayBuffer::new(&buf, 0..10);
        highlight_selections(&mut display, &[sel(7, 9), sel(1, 2)]);
        assert_eq!(display.ranges(), vec![0..1, 1..2, 2..7, 7..9, 9..10]);
        assert_eq!(underlined(&display), vec![1..2, 7..9]);
    }

    #[test]
    fn overlapping_selections() {
        let buf = ten();
        let mut display = DisplayBuffer::new(&buf, 0..10);
        highlight_selections(&mut display, &[sel(2, 6), sel(4, 8)]);
        assert_eq!(underlined(&display), vec![2..6, 6..8]);
        assert!(display.is_well_formed());
    }

    #[test]
    fn selection_outside_window() {
        let buf = ten();
        let mut display = DisplayBuffer::new(&buf, 2..6);
        highlight_selections(&mut display, &[sel(0, 1), sel(8, 10)]);
        assert_eq!(display.ranges(), vec![2..6]);
        assert!(underlined(&display).is_empty());
    }

    #[test]
    fn selection_clipped_by_window() {
        let buf = ten();
        let mut display = DisplayBuffer::new(&buf, 2..6);
        highlight_selections(&mut display, &[sel(0, 4)]);
        assert_eq!(display.ranges(), vec![2..4, 4..6]);
        assert_eq!(underlined(&display), vec![2..4]);
    }

    #[test]
    fn empty_selection_ignored() {
        let buf = ten();
        let mut display = DisplayBuffer::new(&buf, 0..10);
        assert_eq!(highlight_selections(&mut display, &[sel(4, 4)]), 0);
        assert_eq!(display.ranges(), vec![0..10]);
    }

    #[test]
    fn colors_survive() {
        let buf = ten();
        let mut display = DisplayBuffer::new(&buf, 0..10);
        display.atom_mut(0).fg = Color::Red;
        display.atom_mut(0).attrs |= Attr::BOLD;
        highlight_selections(&mut display, &[sel(3, 7)]);
        assert!(display.atoms().iter().all(|a| a.fg == Color::Red));
        assert_eq!(display.atom(1).attrs, Attr::BOLD | Attr::UNDERLINE);
        assert_eq!(display.atom(0).attrs, Attr::BOLD);
    }

    #[test]
    fn gutter_atoms_are_not_underlined() {
        let buf = Buffer::from_text("ab\ncd");
        let mut display = DisplayBuffer::new(&buf, 0..5);
        let right = display.split(0, 3);
        let gutter = display.insert(right, DisplayAtom::synthetic(3, Color::Black, Color::White));
        highlight_selections(&mut display, &[sel(0, 5)]);
        assert!(!display.atom(gutter).attrs.contains(Attr::UNDERLINE));
        assert_eq!(underlined(&display), vec![0..3, 3..5]);
    }

    #[test]
    fn filter_reads_shared_selections() {
        let shared = Rc::new(RefCell::new(vec![sel(0, 2)]));
        let filter = SelectionHighlighter::new(Rc::clone(&shared));
        assert_eq!(filter.id(), "highlight_selections");

        shared.borrow_mut()[0] = sel(5, 6);
        let buf = ten();
        let mut display = DisplayBuffer::new(&buf, 0..10);
        filter.apply(&mut display);
        assert_eq!(underlined(&display), vec![5..6]);
    }
}
