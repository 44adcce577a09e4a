//! Owned, immutable UTF-16 text.
//!
//! ## Learning: `Box<[T]>` vs `Vec<T>`
//!
//! A `Vec<u16>` carries a capacity so it can grow. A buffer that never
//! changes doesn't need one, so `Utf16Buffer` stores a `Box<[u16]>`: one
//! pointer and one length, and no spare capacity kept alive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::view::TextView;
use crate::ViewResult;

/// An owned sequence of UTF-16 code units that views borrow from.
///
/// The contents are not required to be valid UTF-16: unpaired surrogates
/// are stored as-is and only replaced when text is decoded.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Utf16Buffer {
    units: Box<[u16]>,
}

impl Utf16Buffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored code units.
    #[inline]
    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    /// Number of code units.
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the buffer holds no code units.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// A view over the whole buffer.
    ///
    /// # Example
    /// ```
    /// use textview_core::Utf16Buffer;
    ///
    /// let buffer = Utf16Buffer::from("hello");
    /// let view = buffer.view();
    /// assert_eq!(view.len(), 5);
    /// assert_eq!(view.offset(), 0);
    /// ```
    #[inline]
    pub fn view(&self) -> TextView<'_> {
        TextView::new(&self.units)
    }

    /// A view from `offset` to the end of the buffer.
    pub fn view_from(&self, offset: usize) -> ViewResult<TextView<'_>> {
        TextView::with_offset(self.as_units(), offset)
    }

    /// A view of `len` code units starting at `offset`.
    pub fn view_range(&self, offset: usize, len: usize) -> ViewResult<TextView<'_>> {
        TextView::with_range(self.as_units(), offset, len)
    }

    /// Consumes the buffer, returning its code units.
    pub fn into_vec(self) -> Vec<u16> {
        self.units.into_vec()
    }
}

impl fmt::Display for Utf16Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

impl fmt::Debug for Utf16Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Utf16Buffer")
            .field(&self.to_string())
            .finish()
    }
}

impl AsRef<[u16]> for Utf16Buffer {
    fn as_ref(&self) -> &[u16] {
        &self.units
    }
}

impl From<&str> for Utf16Buffer {
    fn from(text: &str) -> Self {
        text.encode_utf16().collect()
    }
}

impl From<String> for Utf16Buffer {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<&[u16]> for Utf16Buffer {
    fn from(units: &[u16]) -> Self {
        Self {
            units: units.into(),
        }
    }
}

impl From<Vec<u16>> for Utf16Buffer {
    fn from(units: Vec<u16>) -> Self {
        Self {
            units: units.into_boxed_slice(),
        }
    }
}

impl FromIterator<u16> for Utf16Buffer {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}
