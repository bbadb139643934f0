//! Display buffer — an ordered partition of a buffer range into atoms.
//!
//! A `DisplayBuffer` is built fresh for every render pass as a single atom
//! covering one contiguous char range of a [`Buffer`]. Filters then refine it
//! in place with three structural primitives:
//!
//! - [`split`](DisplayBuffer::split) divides one atom at an interior position
//! - [`insert`](DisplayBuffer::insert) adds a zero-width synthetic atom
//! - [`replace_atom_content`](DisplayBuffer::replace_atom_content) overrides
//!   the rendered text of an atom
//!
//! # Invariants
//!
//! ```text
//!   range.start                                         range.end
//!   │                                                           │
//!   ├──────────┬─┬────────────┬──────┬─┬──────────────────────────┤
//!   │  atom 0  │s│   atom 2   │atom 3│s│          atom 5          │
//!   └──────────┴─┴────────────┴──────┴─┴──────────────────────────┘
//!                ▲                      ▲
//!                synthetic, zero width, anchored at the next atom's begin
//! ```
//!
//! - **Coverage**: real atoms tile `range` with no gaps.
//! - **Order**: atoms are sorted by `begin`; synthetic atoms sit before the
//!   real atom they are anchored to, in insertion order.
//! - **Non-overlap**: no two real atoms intersect.
//!
//! # Handles
//!
//! Atoms are addressed by index. A split or insert shifts every later index
//! by one, so a filter must re-derive indices after each mutation it makes.
//! The primitives return the index a caller needs next, and
//! [`atom_containing`](DisplayBuffer::atom_containing) takes a hint so that a
//! filter walking forward through the buffer pays linear total cost.

use std::ops::Range;

use strata_text::Buffer;

use crate::atom::DisplayAtom;

/// The ordered atom sequence for one render pass.
pub struct DisplayBuffer<'a> {
    buffer: &'a Buffer,
    range: Range<usize>,
    atoms: Vec<DisplayAtom>,
}

impl<'a> DisplayBuffer<'a> {
    // -- Construction -------------------------------------------------------

    /// A display buffer covering `range` as one unstyled atom.
    ///
    /// # Panics
    ///
    /// Panics if `range` is reversed or extends past the end of `buffer`.
    #[must_use]
    pub fn new(buffer: &'a Buffer, range: Range<usize>) -> Self {
        assert!(
            range.start <= range.end && range.end <= buffer.len_chars(),
            "display range {range:?} outside buffer of {} chars",
            buffer.len_chars()
        );
        Self {
            buffer,
            atoms: vec![DisplayAtom::new(range.start, range.end)],
            range,
        }
    }

    /// A display buffer covering `count` lines starting at `first_line`.
    ///
    /// Lines past the end of the buffer are clamped away; a window entirely
    /// past the end yields an empty range at the buffer end.
    #[must_use]
    pub fn for_lines(buffer: &'a Buffer, first_line: usize, count: usize) -> Self {
        let len = buffer.len_chars();
        let begin = buffer.line_to_char(first_line).unwrap_or(len);
        let end = first_line
            .checked_add(count)
            .and_then(|line| buffer.line_to_char(line))
            .unwrap_or(len);
        Self::new(buffer, begin..end.max(begin))
    }

    // -- Access -------------------------------------------------------------

    /// The text buffer the atoms refer to.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &'a Buffer {
        self.buffer
    }

    /// The covered char range.
    #[inline]
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// First covered position.
    #[inline]
    #[must_use]
    pub const fn begin(&self) -> usize {
        self.range.start
    }

    /// One past the last covered position.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.range.end
    }

    #[inline]
    #[must_use]
    pub fn atoms(&self) -> &[DisplayAtom] {
        &self.atoms
    }

    #[inline]
    #[must_use]
    pub fn atom(&self, idx: usize) -> &DisplayAtom {
        &self.atoms[idx]
    }

    /// Mutable access for restyling. Ranges and content stay under the
    /// control of the structural primitives.
    #[inline]
    pub fn atom_mut(&mut self, idx: usize) -> &mut DisplayAtom {
        &mut self.atoms[idx]
    }

    /// Number of atoms, synthetic ones included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// True when the covered range is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.range.start == self.range.end
    }

    // -- Structural primitives ----------------------------------------------

    /// Split atom `idx` at `pos`, returning the index of the atom that begins
    /// at `pos`.
    ///
    /// Both halves inherit the original's colors, attributes and content
    /// override; the override is not recomputed for the new sub-ranges.
    /// Splitting at the atom's own begin or end is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the atom, or strictly inside an atom that
    /// is not splitable.
    pub fn split(&mut self, idx: usize, pos: usize) -> usize {
        let atom = &self.atoms[idx];
        if pos == atom.begin() {
            return idx;
        }
        if pos == atom.end() {
            return idx + 1;
        }
        assert!(
            atom.contains(pos),
            "split at {pos} outside atom {}..{}",
            atom.begin(),
            atom.end()
        );
        assert!(
            atom.splitable(),
            "split at {pos} inside non-splitable atom {}..{}",
            atom.begin(),
            atom.end()
        );

        let mut right = atom.clone();
        right.set_range(pos, atom.end());
        let begin = atom.begin();
        self.atoms[idx].set_range(begin, pos);
        self.atoms.insert(idx + 1, right);
        idx + 1
    }

    /// Insert a synthetic atom immediately before atom `before` (or at the
    /// tail when `before == len()`). Returns the new atom's index.
    ///
    /// # Panics
    ///
    /// Panics if `atom` is not zero-width, or is not anchored at the begin of
    /// the atom it precedes.
    pub fn insert(&mut self, before: usize, atom: DisplayAtom) -> usize {
        assert!(
            atom.is_synthetic(),
            "inserted atom {}..{} is not zero-width",
            atom.begin(),
            atom.end()
        );
        let anchor = self
            .atoms
            .get(before)
            .map_or(self.range.end, DisplayAtom::begin);
        assert_eq!(
            atom.begin(),
            anchor,
            "inserted atom must be anchored at {anchor}"
        );
        self.atoms.insert(before, atom);
        before
    }

    /// Override the rendered text of atom `idx`.
    ///
    /// The atom's width becomes the width of `text` no matter how many buffer
    /// chars it spans, and it can no longer be split.
    pub fn replace_atom_content(&mut self, idx: usize, text: impl Into<String>) {
        self.atoms[idx].set_content(text.into());
    }

    // -- Lookup -------------------------------------------------------------

    /// The index of the real atom containing `pos`, scanning forward from
    /// `hint`.
    ///
    /// `hint` must be at or before the target atom. Returns `None` when `pos`
    /// is at or past the end of the covered range, or before atom `hint`.
    #[must_use]
    pub fn atom_containing(&self, pos: usize, hint: usize) -> Option<usize> {
        if pos >= self.range.end {
            return None;
        }
        let start = hint.min(self.atoms.len());
        self.atoms[start..]
            .iter()
            .position(|atom| pos < atom.end())
            .map(|offset| start + offset)
            .filter(|&idx| self.atoms[idx].begin() <= pos)
    }

    // -- Output -------------------------------------------------------------

    /// Concatenated rendered text of every atom.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.atoms
            .iter()
            .map(|atom| atom.text(self.buffer))
            .collect()
    }

    /// Ranges of all atoms in order, synthetic ones included.
    #[must_use]
    pub fn ranges(&self) -> Vec<Range<usize>> {
        self.atoms.iter().map(|a| a.begin()..a.end()).collect()
    }

    /// Check coverage, order and non-overlap.
    ///
    /// Real atoms must tile the covered range exactly; synthetic atoms must
    /// sit at the current coverage boundary.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let mut cursor = self.range.start;
        for atom in &self.atoms {
            if atom.begin() != cursor {
                return false;
            }
            cursor = atom.end();
        }
        cursor == self.range.end
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Attr, Color};
    use pretty_assertions::assert_eq;

    fn whole(buf: &Buffer) -> DisplayBuffer<'_> {
        DisplayBuffer::new(buf, 0..buf.len_chars())
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn new_is_one_atom() {
        let buf = Buffer::from_text("hello");
        let db = whole(&buf);
        assert_eq!(db.ranges(), vec![0..5]);
        assert!(db.is_well_formed());
        assert_eq!(db.render_text(), "hello");
    }

    #[test]
    fn for_lines_covers_window() {
        let buf = Buffer::from_text("a\nbb\nccc\ndddd\n");
        let db = DisplayBuffer::for_lines(&buf, 1, 2);
        assert_eq!(db.range(), 2..9);
        assert_eq!(db.render_text(), "bb\nccc\n");
    }

    #[test]
    fn for_lines_clamps_past_end() {
        let buf = Buffer::from_text("a\nb");
        let db = DisplayBuffer::for_lines(&buf, 1, 50);
        assert_eq!(db.range(), 2..3);
        let db = DisplayBuffer::for_lines(&buf, 9, 3);
        assert!(db.is_empty());
        assert_eq!(db.range(), 3..3);
    }

    #[test]
    #[should_panic(expected = "outside buffer")]
    fn new_rejects_range_past_end() {
        let buf = Buffer::from_text("abc");
        let _ = DisplayBuffer::new(&buf, 0..4);
    }

    // ── split ─────────────────────────────────────────────────────────────

    #[test]
    fn split_returns_right_atom() {
        let buf = Buffer::from_text("0123456789");
        let mut db = whole(&buf);
        let right = db.split(0, 4);
        assert_eq!(right, 1);
        assert_eq!(db.ranges(), vec![0..4, 4..10]);
        assert!(db.is_well_formed());
    }

    #[test]
    fn split_inherits_style() {
        let buf = Buffer::from_text("0123456789");
        let mut db = whole(&buf);
        db.atom_mut(0).fg = Color::Red;
        db.atom_mut(0).attrs |= Attr::BOLD;
        db.split(0, 3);
        for atom in db.atoms() {
            assert_eq!(atom.fg, Color::Red);
            assert_eq!(atom.attrs, Attr::BOLD);
        }
    }

    #[test]
    fn split_at_boundary_is_noop() {
        let buf = Buffer::from_text("0123456789");
        let mut db = whole(&buf);
        db.split(0, 5);
        assert_eq!(db.split(1, 5), 1);
        assert_eq!(db.split(0, 5), 1);
        assert_eq!(db.split(0, 0), 0);
        assert_eq!(db.ranges(), vec![0..5, 5..10]);
    }

    #[test]
    #[should_panic(expected = "outside atom")]
    fn split_outside_atom_panics() {
        let buf = Buffer::from_text("0123456789");
        let mut db = whole(&buf);
        db.split(0, 5);
        db.split(0, 7);
    }

    #[test]
    #[should_panic(expected = "non-splitable")]
    fn split_replaced_atom_panics() {
        let buf = Buffer::from_text("0123456789");
        let mut db = whole(&buf);
        db.replace_atom_content(0, "x");
        db.split(0, 3);
    }

    // ── insert ────────────────────────────────────────────────────────────

    #[test]
    fn insert_synthetic_before_atom() {
        let buf = Buffer::from_text("abcdef");
        let mut db = whole(&buf);
        let right = db.split(0, 3);
        let idx = db.insert(right, DisplayAtom::synthetic(3, Color::Black, Color::White));
        db.replace_atom_content(idx, "|");
        assert_eq!(idx, 1);
        assert_eq!(db.ranges(), vec![0..3, 3..3, 3..6]);
        assert!(db.is_well_formed());
        assert_eq!(db.render_text(), "abc|def");
    }

    #[test]
    fn insert_at_tail() {
        let buf = Buffer::from_text("ab");
        let mut db = whole(&buf);
        let idx = db.insert(1, DisplayAtom::synthetic(2, Color::Default, Color::Default));
        assert_eq!(idx, 1);
        assert!(db.is_well_formed());
    }

    #[test]
    #[should_panic(expected = "not zero-width")]
    fn insert_real_atom_panics() {
        let buf = Buffer::from_text("abc");
        let mut db = whole(&buf);
        db.insert(0, DisplayAtom::new(0, 1));
    }

    #[test]
    #[should_panic(expected = "anchored")]
    fn insert_misanchored_panics() {
        let buf = Buffer::from_text("abc");
        let mut db = whole(&buf);
        db.insert(0, DisplayAtom::synthetic(2, Color::Default, Color::Default));
    }

    // ── replace_atom_content ──────────────────────────────────────────────

    #[test]
    fn replaced_content_changes_render_not_range() {
        let buf = Buffer::from_text("a\tb");
        let mut db = whole(&buf);
        let tab = db.split(0, 1);
        db.split(tab, 2);
        db.replace_atom_content(tab, "  ");
        assert_eq!(db.ranges(), vec![0..1, 1..2, 2..3]);
        assert_eq!(db.render_text(), "a  b");
        assert_eq!(db.atom(tab).width(&buf), 2);
    }

    // ── atom_containing ───────────────────────────────────────────────────

    #[test]
    fn atom_containing_scans_from_hint() {
        let buf = Buffer::from_text("0123456789");
        let mut db = whole(&buf);
        db.split(0, 3);
        db.split(1, 6);
        assert_eq!(db.atom_containing(0, 0), Some(0));
        assert_eq!(db.atom_containing(3, 0), Some(1));
        assert_eq!(db.atom_containing(7, 1), Some(2));
        assert_eq!(db.atom_containing(9, 2), Some(2));
    }

    #[test]
    fn atom_containing_end_is_none() {
        let buf = Buffer::from_text("0123456789");
        let db = whole(&buf);
        assert_eq!(db.atom_containing(10, 0), None);
        assert_eq!(db.atom_containing(42, 0), None);
    }

    #[test]
    fn atom_containing_before_hint_is_none() {
        let buf = Buffer::from_text("0123456789");
        let mut db = whole(&buf);
        db.split(0, 5);
        assert_eq!(db.atom_containing(2, 1), None);
    }

    #[test]
    fn atom_containing_skips_synthetic() {
        let buf = Buffer::from_text("abcdef");
        let mut db = whole(&buf);
        let right = db.split(0, 3);
        db.insert(right, DisplayAtom::synthetic(3, Color::Black, Color::White));
        assert_eq!(db.atom_containing(3, 0), Some(2));
    }

    #[test]
    fn atom_containing_respects_window_offset() {
        let buf = Buffer::from_text("xxabcxx");
        let db = DisplayBuffer::new(&buf, 2..5);
        assert_eq!(db.atom_containing(1, 0), None);
        assert_eq!(db.atom_containing(2, 0), Some(0));
        assert_eq!(db.atom_containing(5, 0), None);
    }

    // ── well-formedness ───────────────────────────────────────────────────

    #[test]
    fn gap_is_not_well_formed() {
        let buf = Buffer::from_text("0123456789");
        let mut db = whole(&buf);
        db.split(0, 5);
        db.atoms[1].set_range(6, 10);
        assert!(!db.is_well_formed());
    }
}
