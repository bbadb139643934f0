//! Display atoms — the styled ranges a display buffer is made of.
//!
//! An atom is either **buffer-backed** (`begin < end`, renders the buffer
//! slice or its content override) or **synthetic** (`begin == end`, renders
//! only its content override). Synthetic atoms carry text that is not in the
//! buffer at all, like gutter line numbers.

use std::borrow::Cow;

use strata_text::Buffer;
use unicode_width::UnicodeWidthStr;

use crate::style::{Attr, Color};

/// A single styled range of the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayAtom {
    begin: usize,
    end: usize,
    /// Foreground (text) color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Accumulated attributes.
    pub attrs: Attr,
    content: Option<String>,
    splitable: bool,
}

impl DisplayAtom {
    /// A buffer-backed atom over `[begin, end)` with default styling.
    #[must_use]
    pub fn new(begin: usize, end: usize) -> Self {
        assert!(begin <= end, "atom range reversed: {begin}..{end}");
        Self {
            begin,
            end,
            fg: Color::Default,
            bg: Color::Default,
            attrs: Attr::empty(),
            content: None,
            splitable: true,
        }
    }

    /// A zero-width synthetic atom anchored at `at`.
    #[must_use]
    pub fn synthetic(at: usize, fg: Color, bg: Color) -> Self {
        Self {
            begin: at,
            end: at,
            fg,
            bg,
            attrs: Attr::empty(),
            content: None,
            splitable: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn begin(&self) -> usize {
        self.begin
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Zero-width, not backed by buffer text.
    #[inline]
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.begin == self.end
    }

    #[inline]
    #[must_use]
    pub const fn splitable(&self) -> bool {
        self.splitable
    }

    /// True when `pos` lies in `[begin, end)`. Never true for synthetic atoms.
    #[inline]
    #[must_use]
    pub const fn contains(&self, pos: usize) -> bool {
        pos >= self.begin && pos < self.end
    }

    /// The content override, if any.
    #[inline]
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// The text this atom renders: its content override, or the buffer slice.
    ///
    /// # Panics
    ///
    /// Panics if the atom's range is outside `buffer`.
    #[must_use]
    pub fn text<'b>(&'b self, buffer: &'b Buffer) -> Cow<'b, str> {
        if let Some(content) = &self.content {
            return Cow::Borrowed(content);
        }
        let slice = buffer
            .slice(self.begin..self.end)
            .unwrap_or_else(|| panic!("atom {}..{} outside buffer", self.begin, self.end));
        match slice.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(slice.to_string()),
        }
    }

    /// Rendered width in terminal columns.
    ///
    /// For overridden content this is the width of the override, independent
    /// of how many buffer chars the atom spans.
    #[must_use]
    pub fn width(&self, buffer: &Buffer) -> usize {
        self.text(buffer).width()
    }

    /// Narrow this atom to `[begin, end)`. Only `split` calls this.
    pub(crate) fn set_range(&mut self, begin: usize, end: usize) {
        debug_assert!(begin <= end);
        self.begin = begin;
        self.end = end;
    }

    pub(crate) fn set_content(&mut self, text: String) {
        self.content = Some(text);
        self.splitable = false;
    }
}
