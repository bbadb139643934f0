//! Selections — half-open char ranges marking the editing focus.
//!
//! A `Selection` is `[begin, end)` in absolute char offsets with
//! `begin <= end`. Input collections are unordered; consumers that sweep
//! selections against ordered data sort them first with
//! [`sort_by_begin`].

use std::fmt;

/// One cursor/selection span: `[begin, end)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    begin: usize,
    end: usize,
}

impl Selection {
    /// Create a selection. Panics in debug if `begin > end`.
    #[inline]
    #[must_use]
    pub const fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end, "Selection::new requires begin <= end");
        Self { begin, end }
    }

    /// Build a selection from an anchor and a head in either order.
    ///
    /// The user may have dragged backwards, so the endpoints are swapped when
    /// needed.
    #[inline]
    #[must_use]
    pub const fn ordered(anchor: usize, head: usize) -> Self {
        if anchor <= head {
            Self { begin: anchor, end: head }
        } else {
            Self { begin: head, end: anchor }
        }
    }

    #[inline]
    #[must_use]
    pub const fn begin(self) -> usize {
        self.begin
    }

    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// True when the selection spans zero characters.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.begin == self.end
    }

    /// True when `pos` falls within `[begin, end)`.
    #[inline]
    #[must_use]
    pub const fn contains(self, pos: usize) -> bool {
        pos >= self.begin && pos < self.end
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sel({}..{})", self.begin, self.end)
    }
}

/// Sort selections by `begin`, ties by `end`.
pub fn sort_by_begin(selections: &mut [Selection]) {
    selections.sort_unstable_by_key(|sel| (sel.begin, sel.end));
}
