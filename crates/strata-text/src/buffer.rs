//! Text buffer — the text a display buffer is cut from.
//!
//! A `Buffer` wraps a [`ropey::Rope`] and exposes the coordinate model the
//! display engine works in: **absolute char offsets** as buffer positions,
//! plus the line lookups filters need for gutters and tab columns.
//!
//! - **Offsets are chars**, not bytes. Byte offsets only surface at the regex
//!   boundary (`char_to_byte` / `byte_to_char`), since the regex engine
//!   reports matches in bytes.
//!
//! - **No editing here.** Display buffers are rebuilt from scratch for every
//!   render pass; nothing in this crate mutates text.

use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;

use ropey::iter::Chars;
use ropey::{Rope, RopeSlice};

/// A read-only text buffer backed by a rope.
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// Create a buffer from a string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Load a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid UTF-8.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    /// Total character count (Unicode scalar values, not bytes).
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Iterate chars starting at a char offset.
    ///
    /// # Panics
    ///
    /// Panics if `idx > len_chars()`.
    #[inline]
    #[must_use]
    pub fn chars_at(&self, idx: usize) -> Chars<'_> {
        self.rope.chars_at(idx)
    }

    /// The text in a char range. Returns `None` if the range is reversed or
    /// runs past the end of the buffer.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Option<RopeSlice<'_>> {
        self.rope.get_slice(range)
    }

    // -- Lines and offsets --------------------------------------------------

    /// The char offset of column 0 of `line`, or `None` past the last line.
    ///
    /// A buffer ending in a newline has an empty last line starting at
    /// `len_chars()`.
    #[must_use]
    pub fn line_to_char(&self, line: usize) -> Option<usize> {
        (line < self.rope.len_lines()).then(|| self.rope.line_to_char(line))
    }

    /// The line containing a char offset. Offsets past the end clamp to the
    /// last line.
    #[must_use]
    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.rope.len_chars()))
    }

    /// Convert a char offset to a byte offset.
    ///
    /// # Panics
    ///
    /// Panics if `char_idx > len_chars()`.
    #[inline]
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> usize {
        self.rope.char_to_byte(char_idx)
    }

    /// Convert a byte offset to a char offset. A byte in the middle of a
    /// multi-byte char maps to that char.
    ///
    /// # Panics
    ///
    /// Panics if `byte_idx > len_bytes()`.
    #[inline]
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        self.rope.byte_to_char(byte_idx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_text_has_one_line() {
        let buf = Buffer::from_text("");
        assert_eq!(buf.len_chars(), 0);
        assert_eq!(buf.line_to_char(0), Some(0));
        assert_eq!(buf.line_to_char(1), None);
    }

    #[test]
    fn trailing_newline_starts_empty_last_line() {
        let buf = Buffer::from_text("a\nb\n");
        assert_eq!(buf.line_to_char(2), Some(4));
        assert_eq!(buf.line_to_char(3), None);
        assert_eq!(buf.char_to_line(4), 2);
    }

    #[test]
    fn line_to_char_and_back() {
        let buf = Buffer::from_text("one\ntwo\nthree");
        assert_eq!(buf.line_to_char(0), Some(0));
        assert_eq!(buf.line_to_char(2), Some(8));
        assert_eq!(buf.line_to_char(3), None);
        assert_eq!(buf.char_to_line(9), 2);
        assert_eq!(buf.char_to_line(100), 2);
    }

    #[test]
    fn line_offsets_count_chars_not_bytes() {
        let buf = Buffer::from_text("ééé\nx");
        assert_eq!(buf.line_to_char(1), Some(4));
        assert_eq!(buf.char_to_byte(4), 7);
    }

    #[test]
    fn byte_and_char_offsets_differ_for_multibyte() {
        let buf = Buffer::from_text("aé b");
        assert_eq!(buf.char_to_byte(2), 3);
        assert_eq!(buf.byte_to_char(3), 2);
    }

    #[test]
    fn slice_bounds() {
        let buf = Buffer::from_text("hello world");
        assert_eq!(buf.slice(6..11).map(String::from), Some("world".to_string()));
        assert!(buf.slice(6..12).is_none());
    }

    #[test]
    fn chars_at_iterates_forward() {
        let buf = Buffer::from_text("abc");
        let rest: String = buf.chars_at(1).collect();
        assert_eq!(rest, "bc");
    }

    #[test]
    fn from_file_reads_text() {
        let path = std::env::temp_dir().join(format!("strata-text-{}.txt", std::process::id()));
        fs::write(&path, "x\ty\n").unwrap();
        let buf = Buffer::from_file(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(buf.unwrap().len_chars(), 4);
    }

    #[test]
    fn from_file_missing_is_error() {
        assert!(Buffer::from_file(Path::new("/definitely/not/here.txt")).is_err());
    }
}
