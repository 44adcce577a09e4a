//! The `TextView` window type.
//!
//! ## Learning: Borrowed Windows
//!
//! A `TextView<'a>` is three words: an optional borrowed buffer, an offset
//! and a length. Because it only *borrows* the buffer it can be `Copy`:
//!
//! ```rust
//! use textview_core::Utf16Buffer;
//!
//! let buffer = Utf16Buffer::from("hello world");
//! let view = buffer.view();
//! let hello = view.slice(0, 5).unwrap();  // new window, same buffer
//! let copy = hello;                       // O(1), no code units touched
//! assert_eq!(copy.offset(), 0);
//! assert_eq!(hello, "hello");
//! ```
//!
//! Offsets of a sliced view stay relative to the *original* buffer, so a
//! slice of a slice still knows exactly where it sits.

use std::borrow::Borrow;
use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::ops::{Bound, Index, RangeBounds};

use serde::{Serialize, Serializer};

use crate::buffer::Utf16Buffer;
use crate::lines::Lines;
use crate::runes::{RuneIndices, Runes};
use crate::units::CodeUnits;
use crate::{ViewError, ViewResult};

/// An immutable window into a buffer of UTF-16 code units.
///
/// # Invariant
///
/// `offset + len <= buffer.len()`. Every constructor checks it, and every
/// slicing operation preserves it.
///
/// The default view has no buffer at all. It behaves exactly like a view
/// over an empty buffer for equality, hashing, ordering and iteration.
#[derive(Clone, Copy, Default)]
pub struct TextView<'a> {
    /// The whole buffer this view points into (`None` for the default view)
    buffer: Option<&'a [u16]>,

    /// Start of the window, in code units from the start of `buffer`
    offset: usize,

    /// Number of code units in the window
    len: usize,
}

impl<'a> TextView<'a> {
    /// The canonical empty view.
    pub const EMPTY: Self = Self {
        buffer: None,
        offset: 0,
        len: 0,
    };

    /// Creates a view over an entire buffer.
    ///
    /// # Example
    /// ```
    /// use textview_core::TextView;
    ///
    /// let units = [0x68, 0x69];
    /// let view = TextView::new(&units);
    /// assert_eq!(view.len(), 2);
    /// assert_eq!(view, "hi");
    /// ```
    #[inline]
    pub const fn new(units: &'a [u16]) -> Self {
        Self {
            buffer: Some(units),
            offset: 0,
            len: units.len(),
        }
    }

    /// Creates a view over an entire buffer, or the empty view for `None`.
    pub fn from_optional(units: Option<&'a [u16]>) -> Self {
        units.map_or(Self::EMPTY, Self::new)
    }

    /// Creates a view from `offset` to the end of the buffer.
    ///
    /// The offset is validated immediately, the same way
    /// [`TextView::with_range`] validates it.
    pub fn with_offset(units: impl Into<Option<&'a [u16]>>, offset: usize) -> ViewResult<Self> {
        match units.into() {
            Some(units) => {
                let len = units.len().checked_sub(offset).ok_or_else(|| {
                    ViewError::out_of_range("offset", offset, units.len())
                })?;
                Ok(Self {
                    buffer: Some(units),
                    offset,
                    len,
                })
            }
            None if offset == 0 => Ok(Self::EMPTY),
            None => Err(ViewError::missing_buffer(offset, 0)),
        }
    }

    /// Creates a view of `len` code units starting at `offset`.
    ///
    /// # Errors
    ///
    /// - [`ViewError::MissingBuffer`] if there is no buffer but a non-empty
    ///   window was requested
    /// - [`ViewError::OutOfRange`] if the window doesn't fit in the buffer
    pub fn with_range(
        units: impl Into<Option<&'a [u16]>>,
        offset: usize,
        len: usize,
    ) -> ViewResult<Self> {
        let Some(units) = units.into() else {
            if offset == 0 && len == 0 {
                return Ok(Self::EMPTY);
            }
            return Err(ViewError::missing_buffer(offset, len));
        };

        if offset > units.len() {
            return Err(ViewError::out_of_range("offset", offset, units.len()));
        }
        if len > units.len() - offset {
            return Err(ViewError::out_of_range("len", len, units.len() - offset));
        }

        Ok(Self {
            buffer: Some(units),
            offset,
            len,
        })
    }

    // ==================== Measurements ====================

    /// Number of code units in the view.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the view holds no code units.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start of the view within its buffer.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The whole buffer the view points into (empty for the default view).
    #[inline]
    pub fn buffer(&self) -> &'a [u16] {
        self.buffer.unwrap_or_default()
    }

    /// Returns true if the view carries a buffer reference.
    ///
    /// Only useful for diagnostics: the empty view and a view over an empty
    /// buffer compare, hash and iterate the same.
    #[inline]
    pub fn has_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    // ==================== Text Access ====================

    /// The windowed code units as a contiguous slice.
    ///
    /// # Learning: Returning the Longer Lifetime
    ///
    /// The slice borrows from the *buffer* (`'a`), not from `self`, so it
    /// stays usable after the view itself goes out of scope.
    #[inline]
    pub fn as_units(&self) -> &'a [u16] {
        match self.buffer {
            Some(buffer) => &buffer[self.offset..self.offset + self.len],
            None => &[],
        }
    }

    /// Returns the code unit at `index`, if there is one.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u16> {
        self.as_units().get(index).copied()
    }

    /// Returns the code unit at `index`.
    pub fn unit_at(&self, index: usize) -> ViewResult<u16> {
        self.get(index)
            .ok_or_else(|| ViewError::out_of_range("index", index, self.len))
    }

    // ==================== Slicing ====================

    /// Returns the view from `index` to the end.
    pub fn slice_from(&self, index: usize) -> ViewResult<Self> {
        if index > self.len {
            return Err(ViewError::out_of_range("index", index, self.len));
        }
        Ok(self.window(index, self.len - index))
    }

    /// Returns `count` code units starting at `index`.
    pub fn slice(&self, index: usize, count: usize) -> ViewResult<Self> {
        if index > self.len {
            return Err(ViewError::out_of_range("index", index, self.len));
        }
        if count > self.len - index {
            return Err(ViewError::out_of_range("count", count, self.len - index));
        }
        Ok(self.window(index, count))
    }

    /// Range form of [`TextView::slice`].
    ///
    /// # Example
    /// ```
    /// use textview_core::Utf16Buffer;
    ///
    /// let buffer = Utf16Buffer::from("abcdef");
    /// let view = buffer.view();
    /// assert_eq!(view.slice_range(1..3).unwrap(), "bc");
    /// assert_eq!(view.slice_range(4..).unwrap(), "ef");
    /// assert!(view.slice_range(..9).is_err());
    /// ```
    pub fn slice_range(&self, range: impl RangeBounds<usize>) -> ViewResult<Self> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };

        if end > self.len {
            return Err(ViewError::out_of_range("end", end, self.len));
        }
        if start > end {
            return Err(ViewError::out_of_range("start", start, end));
        }
        Ok(self.window(start, end - start))
    }

    /// Unchecked sub-window; callers guarantee `start + len <= self.len`.
    #[inline]
    pub(crate) fn window(&self, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= self.len);
        Self {
            buffer: self.buffer,
            offset: self.offset + start,
            len,
        }
    }

    /// Returns true if `other` is exactly this view's window: same memory,
    /// same length.
    ///
    /// Ordinal equality uses this to skip scanning.
    #[inline]
    pub fn same_window(&self, other: &[u16]) -> bool {
        std::ptr::eq(self.as_units(), other)
    }

    // ==================== Enumeration ====================

    /// Enumerates the code units of the view.
    pub fn units(&self) -> CodeUnits<'a> {
        CodeUnits::new(*self)
    }

    /// Enumerates the lines of the view.
    ///
    /// See [`Lines`] for the newline rules.
    pub fn lines(&self) -> Lines<'a> {
        Lines::new(*self)
    }

    /// Enumerates the code points of the view.
    pub fn runes(&self) -> Runes<'a> {
        Runes::new(*self)
    }

    /// Enumerates code points together with their offsets in the view.
    pub fn rune_indices(&self) -> RuneIndices<'a> {
        RuneIndices::new(*self)
    }

    // ==================== Materialization ====================

    /// Copies the windowed code units into a new vector.
    pub fn to_vec(&self) -> Vec<u16> {
        self.as_units().to_vec()
    }

    /// Copies the windowed code units into a new owned buffer.
    pub fn to_buffer(&self) -> Utf16Buffer {
        Utf16Buffer::from(self.as_units())
    }
}

impl fmt::Display for TextView<'_> {
    /// Decodes the window, replacing unpaired surrogates with U+FFFD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for decoded in char::decode_utf16(self.as_units().iter().copied()) {
            f.write_char(decoded.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl fmt::Debug for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextView")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("text", &self.to_string())
            .finish()
    }
}

impl Hash for TextView<'_> {
    /// Hashes the same way as the underlying `[u16]`, so views, buffers and
    /// slices that are ordinally equal hash equal.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_units().hash(state);
    }
}

impl Borrow<[u16]> for TextView<'_> {
    fn borrow(&self) -> &[u16] {
        self.as_units()
    }
}

impl AsRef<[u16]> for TextView<'_> {
    fn as_ref(&self) -> &[u16] {
        self.as_units()
    }
}

impl Index<usize> for TextView<'_> {
    type Output = u16;

    /// Panics when `index >= len`, like slice indexing. Use
    /// [`TextView::unit_at`] for the fallible form.
    fn index(&self, index: usize) -> &u16 {
        &self.as_units()[index]
    }
}

impl Serialize for TextView<'_> {
    /// Serializes the windowed code units as a sequence.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_units())
    }
}

impl<'a> From<&'a [u16]> for TextView<'a> {
    fn from(units: &'a [u16]) -> Self {
        Self::new(units)
    }
}

impl<'a> From<Option<&'a [u16]>> for TextView<'a> {
    fn from(units: Option<&'a [u16]>) -> Self {
        Self::from_optional(units)
    }
}

impl<'a> From<&'a Utf16Buffer> for TextView<'a> {
    fn from(buffer: &'a Utf16Buffer) -> Self {
        buffer.view()
    }
}

impl<'a> From<TextView<'a>> for &'a [u16] {
    fn from(view: TextView<'a>) -> Self {
        view.as_units()
    }
}

impl<'a> IntoIterator for TextView<'a> {
    type Item = u16;
    type IntoIter = CodeUnits<'a>;

    fn into_iter(self) -> CodeUnits<'a> {
        self.units()
    }
}

impl<'a> IntoIterator for &TextView<'a> {
    type Item = u16;
    type IntoIter = CodeUnits<'a>;

    fn into_iter(self) -> CodeUnits<'a> {
        self.units()
    }
}
