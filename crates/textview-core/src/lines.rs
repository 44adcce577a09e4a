//! Line splitting.
//!
//! ## Learning: Splitting Without Allocating
//!
//! Each line is a `TextView` sliced out of the input, so enumerating lines
//! costs a few integer operations per line and never copies text. The
//! enumerator keeps the unscanned rest of the input in `remaining` and
//! carves the next line off its front.

use std::iter::FusedIterator;

use crate::enumerator::TextEnumerator;
use crate::search::find_newline;
use crate::view::TextView;
use crate::{ViewError, ViewResult};

/// Enumerates the lines of a view.
///
/// Terminators are CR, LF, FF, NEL, LINE SEPARATOR and PARAGRAPH SEPARATOR.
/// A CR immediately followed by LF is a single terminator. Terminators are
/// not part of the produced lines.
///
/// The last line is always produced, even when empty: an empty input gives
/// one empty line, and input ending in a terminator gives a trailing empty
/// line.
///
/// # Example
/// ```
/// use textview_core::Utf16Buffer;
///
/// let buffer = Utf16Buffer::from("one\r\ntwo\n\nfour\n");
/// let lines: Vec<String> = buffer.view().lines().map(|l| l.to_string()).collect();
/// assert_eq!(lines, ["one", "two", "", "four", ""]);
/// ```
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    /// Input not yet split
    remaining: TextView<'a>,

    /// The most recently produced line
    current: Option<TextView<'a>>,

    /// False once the final line has been produced
    active: bool,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(view: TextView<'a>) -> Self {
        Self {
            remaining: view,
            current: None,
            active: true,
        }
    }

    /// The part of the input not yet split into lines.
    pub fn remaining(&self) -> TextView<'a> {
        self.remaining
    }
}

impl<'a> TextEnumerator for Lines<'a> {
    type Element = TextView<'a>;

    fn advance(&mut self) -> bool {
        if !self.active {
            self.current = None;
            return false;
        }

        match find_newline(self.remaining.as_units()) {
            Some((index, stride)) => {
                let rest = index + stride;
                self.current = Some(self.remaining.window(0, index));
                self.remaining = self.remaining.window(rest, self.remaining.len() - rest);
            }
            None => {
                self.current = Some(self.remaining);
                self.remaining = TextView::EMPTY;
                self.active = false;
            }
        }
        true
    }

    fn current(&self) -> Option<TextView<'a>> {
        self.current
    }

    fn reset(&mut self) -> ViewResult<()> {
        Err(ViewError::ResetUnsupported { enumerator: "lines" })
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = TextView<'a>;

    fn next(&mut self) -> Option<TextView<'a>> {
        if self.advance() { self.current } else { None }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.active {
            (1, Some(self.remaining.len() + 1))
        } else {
            (0, Some(0))
        }
    }
}

impl FusedIterator for Lines<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utf16Buffer;

    fn split(text: &str) -> Vec<String> {
        let buffer = Utf16Buffer::from(text);
        buffer.view().lines().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_empty_input_yields_one_empty_line() {
        assert_eq!(split(""), vec![""]);
        assert_eq!(TextView::default().lines().count(), 1);
    }

    #[test]
    fn test_literal_cases() {
        assert_eq!(split("a\nb"), vec!["a", "b"]);
        assert_eq!(split("a\r\nb"), vec!["a", "b"]);
        assert_eq!(split("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split("a\n"), vec!["a", ""]);
        assert_eq!(split("abc"), vec!["abc"]);
    }

    #[test]
    fn test_cr_lf_pairing() {
        assert_eq!(split("a\r"), vec!["a", ""]);
        assert_eq!(split("a\rb"), vec!["a", "b"]);
        // LF then CR is two terminators
        assert_eq!(split("a\n\rb"), vec!["a", "", "b"]);
        assert_eq!(split("a\r\r\nb"), vec!["a", "", "b"]);
        assert_eq!(split("\r\n"), vec!["", ""]);
    }

    #[test]
    fn test_unicode_terminators() {
        assert_eq!(
            split("a\u{000C}b\u{0085}c\u{2028}d\u{2029}e"),
            vec!["a", "b", "c", "d", "e"]
        );
        // VERTICAL TAB does not split
        assert_eq!(split("a\u{000B}b"), vec!["a\u{000B}b"]);
    }

    #[test]
    fn test_lines_keep_buffer_offsets() {
        let buffer = Utf16Buffer::from("ab\r\ncd\nef");
        let offsets: Vec<(usize, usize)> = buffer
            .view()
            .lines()
            .map(|line| (line.offset(), line.len()))
            .collect();
        assert_eq!(offsets, vec![(0, 2), (4, 2), (7, 2)]);
    }

    #[test]
    fn test_lines_of_a_slice() {
        let buffer = Utf16Buffer::from("skip\nkeep\nthis");
        let tail = buffer.view().slice_from(5).unwrap();
        let lines: Vec<TextView<'_>> = tail.lines().collect();
        assert_eq!(lines, vec!["keep", "this"]);
        assert_eq!(lines[1].offset(), 10);
    }

    #[test]
    fn test_enumerator_protocol() {
        let buffer = Utf16Buffer::from("x\ny");
        let mut lines = buffer.view().lines();

        assert_eq!(lines.current(), None);
        assert!(lines.advance());
        assert_eq!(lines.current().unwrap(), "x");
        assert_eq!(lines.remaining(), "y");
        assert!(lines.advance());
        assert_eq!(lines.current().unwrap(), "y");
        assert!(!lines.advance());
        assert_eq!(lines.current(), None);
        assert!(!lines.advance());
    }

    #[test]
    fn test_reset_is_unsupported() {
        let buffer = Utf16Buffer::from("x");
        let mut lines = buffer.view().lines();
        assert_eq!(
            lines.reset(),
            Err(ViewError::ResetUnsupported { enumerator: "lines" })
        );
    }
}
