//! Code-point decoding.
//!
//! ## Learning: Surrogate Pairs
//!
//! UTF-16 stores code points above U+FFFF as two code units: a high
//! surrogate (`0xD800..=0xDBFF`) then a low surrogate (`0xDC00..=0xDFFF`).
//! Decoding is delegated to `char::decode_utf16`; anything it rejects (a
//! surrogate without its partner) becomes U+FFFD and consumes one unit, so
//! the enumerator always makes progress.

use std::iter::FusedIterator;

use crate::enumerator::TextEnumerator;
use crate::view::TextView;
use crate::{ViewError, ViewResult};

/// Decodes the first code point of `units` and its width in code units.
fn decode_first(units: &[u16]) -> Option<(char, usize)> {
    let decoded = char::decode_utf16(units.iter().copied()).next()?;
    Some(match decoded {
        Ok(c) => (c, c.len_utf16()),
        Err(_) => (char::REPLACEMENT_CHARACTER, 1),
    })
}

/// Enumerates the code points of a view.
///
/// # Example
/// ```
/// use textview_core::Utf16Buffer;
///
/// let buffer = Utf16Buffer::from("a\u{1F600}b");
/// assert_eq!(buffer.len(), 4);
/// let runes: Vec<char> = buffer.view().runes().collect();
/// assert_eq!(runes, ['a', '\u{1F600}', 'b']);
/// ```
#[derive(Debug, Clone)]
pub struct Runes<'a> {
    remaining: TextView<'a>,
    current: Option<char>,
}

impl<'a> Runes<'a> {
    pub(crate) fn new(view: TextView<'a>) -> Self {
        Self {
            remaining: view,
            current: None,
        }
    }

    /// The part of the input not yet decoded.
    pub fn remaining(&self) -> TextView<'a> {
        self.remaining
    }
}

impl TextEnumerator for Runes<'_> {
    type Element = char;

    fn advance(&mut self) -> bool {
        let Some((rune, width)) = decode_first(self.remaining.as_units()) else {
            self.current = None;
            return false;
        };
        self.current = Some(rune);
        self.remaining = self.remaining.window(width, self.remaining.len() - width);
        true
    }

    fn current(&self) -> Option<char> {
        self.current
    }

    fn reset(&mut self) -> ViewResult<()> {
        Err(ViewError::ResetUnsupported { enumerator: "runes" })
    }
}

impl Iterator for Runes<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.advance() { self.current } else { None }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.len();
        (len.div_ceil(2), Some(len))
    }
}

impl FusedIterator for Runes<'_> {}

/// Enumerates code points together with their offset in the view.
///
/// # Example
/// ```
/// use textview_core::Utf16Buffer;
///
/// let buffer = Utf16Buffer::from("\u{1F600}!");
/// let indexed: Vec<(usize, char)> = buffer.view().rune_indices().collect();
/// assert_eq!(indexed, [(0, '\u{1F600}'), (2, '!')]);
/// ```
#[derive(Debug, Clone)]
pub struct RuneIndices<'a> {
    runes: Runes<'a>,
    total: usize,
}

impl<'a> RuneIndices<'a> {
    pub(crate) fn new(view: TextView<'a>) -> Self {
        Self {
            runes: Runes::new(view),
            total: view.len(),
        }
    }
}

impl Iterator for RuneIndices<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<(usize, char)> {
        let offset = self.total - self.runes.remaining.len();
        self.runes.next().map(|rune| (offset, rune))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.runes.size_hint()
    }
}

impl FusedIterator for RuneIndices<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utf16Buffer;

    #[test]
    fn test_decodes_surrogate_pairs() {
        let buffer = Utf16Buffer::from("x\u{10437}y");
        let runes: Vec<char> = buffer.view().runes().collect();
        assert_eq!(runes, vec!['x', '\u{10437}', 'y']);
    }

    #[test]
    fn test_lone_surrogates_degrade() {
        // high without low, then a stray low
        let buffer = Utf16Buffer::from(vec![0xD801, 0x41, 0xDC37, 0xD801]);
        let runes: Vec<char> = buffer.view().runes().collect();
        assert_eq!(
            runes,
            vec![
                char::REPLACEMENT_CHARACTER,
                'A',
                char::REPLACEMENT_CHARACTER,
                char::REPLACEMENT_CHARACTER
            ]
        );
    }

    #[test]
    fn test_slice_through_a_pair() {
        let buffer = Utf16Buffer::from("\u{1F600}");
        // Only the low surrogate is visible
        let tail = buffer.view().slice_from(1).unwrap();
        let runes: Vec<char> = tail.runes().collect();
        assert_eq!(runes, vec![char::REPLACEMENT_CHARACTER]);
    }

    #[test]
    fn test_enumerator_protocol() {
        let buffer = Utf16Buffer::from("é");
        let mut runes = buffer.view().runes();

        assert_eq!(runes.current(), None);
        assert!(runes.advance());
        assert_eq!(runes.current(), Some('é'));
        assert!(runes.remaining().is_empty());
        assert!(!runes.advance());
        assert_eq!(runes.current(), None);
        assert_eq!(
            runes.reset(),
            Err(ViewError::ResetUnsupported { enumerator: "runes" })
        );
    }

    #[test]
    fn test_empty_view_has_no_runes() {
        assert_eq!(TextView::default().runes().next(), None);
    }

    #[test]
    fn test_rune_indices_skip_pairs() {
        let buffer = Utf16Buffer::from("a\u{1F600}b\u{1F600}");
        let offsets: Vec<usize> = buffer.view().rune_indices().map(|(i, _)| i).collect();
        assert_eq!(offsets, vec![0, 1, 3, 4]);
    }
}
