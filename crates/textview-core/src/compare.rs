//! Equality, ordering and hashing of views.
//!
//! ## Learning: One Generic Entry Point
//!
//! A view can be compared against many shapes of text: another view, an
//! owned buffer, a plain `[u16]`, a `Vec<u16>` or a fixed-size array. Rather
//! than one method per shape, every shape implements [`AsUnits`], and
//! [`TextView::equals`] takes `&impl AsUnits`.
//!
//! `str` is the exception: it stores UTF-8, so it is compared by encoding it
//! to UTF-16 on the fly (an iterator, no allocation).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::buffer::Utf16Buffer;
use crate::case::{eq_ignore_case, folded, simple_lower, simple_upper};
use crate::view::TextView;

/// Anything that can expose its text as a contiguous window of UTF-16 code
/// units without copying.
pub trait AsUnits {
    fn as_units(&self) -> &[u16];
}

impl AsUnits for [u16] {
    fn as_units(&self) -> &[u16] {
        self
    }
}

impl<const N: usize> AsUnits for [u16; N] {
    fn as_units(&self) -> &[u16] {
        self
    }
}

impl AsUnits for Vec<u16> {
    fn as_units(&self) -> &[u16] {
        self
    }
}

impl AsUnits for TextView<'_> {
    fn as_units(&self) -> &[u16] {
        TextView::as_units(self)
    }
}

impl AsUnits for Utf16Buffer {
    fn as_units(&self) -> &[u16] {
        Utf16Buffer::as_units(self)
    }
}

impl<T: AsUnits + ?Sized> AsUnits for &T {
    fn as_units(&self) -> &[u16] {
        (**self).as_units()
    }
}

/// Culture-aware comparison and casing tables.
///
/// This is the seam for platform collation data; the crate only ships
/// [`InvariantCollation`]. Implementations must keep `equals` and
/// `hash_units` consistent: equal inputs hash equal.
pub trait Collation: fmt::Debug + Send + Sync {
    /// Three-way comparison of two code-unit sequences.
    fn compare(&self, left: &[u16], right: &[u16]) -> Ordering;

    /// Equality under this collation.
    fn equals(&self, left: &[u16], right: &[u16]) -> bool {
        self.compare(left, right) == Ordering::Equal
    }

    /// Feeds a hash of `units` consistent with [`Collation::equals`].
    fn hash_units(&self, units: &[u16], state: &mut dyn Hasher);

    /// Uppercase mapping of one code point.
    fn to_upper(&self, c: char) -> char {
        simple_upper(c)
    }

    /// Lowercase mapping of one code point.
    fn to_lower(&self, c: char) -> char {
        simple_lower(c)
    }
}

/// Culture-neutral collation: orders by Unicode scalar value (not by code
/// unit, so supplementary characters sort after U+FFFF) and optionally
/// ignores case using simple case mappings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvariantCollation {
    pub ignore_case: bool,
}

impl InvariantCollation {
    pub const CASE_SENSITIVE: Self = Self { ignore_case: false };
    pub const IGNORE_CASE: Self = Self { ignore_case: true };

    /// Scalar values in comparison order; unpaired surrogates keep their
    /// code-unit value.
    fn keys<'u>(&self, units: &'u [u16]) -> impl Iterator<Item = u32> + 'u {
        let ignore_case = self.ignore_case;
        char::decode_utf16(units.iter().copied()).map(move |decoded| match decoded {
            Ok(c) if ignore_case => simple_upper(c) as u32,
            Ok(c) => c as u32,
            Err(err) => u32::from(err.unpaired_surrogate()),
        })
    }
}

impl Collation for InvariantCollation {
    fn compare(&self, left: &[u16], right: &[u16]) -> Ordering {
        self.keys(left).cmp(self.keys(right))
    }

    fn hash_units(&self, units: &[u16], state: &mut dyn Hasher) {
        let mut count = 0usize;
        for key in self.keys(units) {
            state.write_u32(key);
            count += 1;
        }
        state.write_usize(count);
    }
}

/// How two views are compared.
#[derive(Debug, Clone, Copy, Default)]
pub enum Comparison<'c> {
    /// Code unit by code unit.
    #[default]
    Ordinal,
    /// Code unit by code unit after simple uppercase folding.
    OrdinalIgnoreCase,
    /// Delegated to a collation.
    Culture(&'c dyn Collation),
}

/// Equality of two windows under `mode`.
pub(crate) fn units_equal(left: &[u16], right: &[u16], mode: Comparison<'_>) -> bool {
    match mode {
        Comparison::Ordinal => {
            record_ordinal_scan();
            left == right
        }
        Comparison::OrdinalIgnoreCase => eq_ignore_case(left, right),
        Comparison::Culture(collation) => {
            (left.is_empty() && right.is_empty()) || collation.equals(left, right)
        }
    }
}

#[cfg(test)]
thread_local! {
    /// Ordinal equality checks that read code units, per test thread
    static ORDINAL_SCANS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

#[cfg(test)]
fn record_ordinal_scan() {
    ORDINAL_SCANS.with(|scans| scans.set(scans.get() + 1));
}

#[cfg(not(test))]
#[inline(always)]
fn record_ordinal_scan() {}

/// Cuts `units` to at most `length` code units without splitting a
/// surrogate pair; a pair straddling the cut is left out whole.
fn code_point_prefix(units: &[u16], length: usize) -> &[u16] {
    let mut end = length.min(units.len());
    if end > 0
        && end < units.len()
        && (0xD800..=0xDBFF).contains(&units[end - 1])
        && (0xDC00..=0xDFFF).contains(&units[end])
    {
        end -= 1;
    }
    &units[..end]
}

/// Three-way comparison of two windows under `mode`, shorter first on a
/// common prefix.
pub(crate) fn units_cmp(left: &[u16], right: &[u16], mode: Comparison<'_>) -> Ordering {
    match mode {
        Comparison::Ordinal => left.cmp(right),
        Comparison::OrdinalIgnoreCase => folded(left.iter().copied()).cmp(folded(right.iter().copied())),
        Comparison::Culture(collation) => collation.compare(left, right),
    }
}

impl<'a> TextView<'a> {
    /// Equality against any code-unit window under `mode`.
    ///
    /// For [`Comparison::Ordinal`], two windows over the same memory with the
    /// same length are equal without reading a single code unit.
    ///
    /// # Example
    /// ```
    /// use textview_core::{Comparison, Utf16Buffer};
    ///
    /// let buffer = Utf16Buffer::from("Hello");
    /// let other = Utf16Buffer::from("hELLO");
    /// assert!(!buffer.view().equals(&other, Comparison::Ordinal));
    /// assert!(buffer.view().equals(&other, Comparison::OrdinalIgnoreCase));
    /// ```
    pub fn equals<R: AsUnits + ?Sized>(&self, other: &R, mode: Comparison<'_>) -> bool {
        let right = other.as_units();
        if matches!(mode, Comparison::Ordinal) && self.same_window(right) {
            return true;
        }
        units_equal(self.as_units(), right, mode)
    }

    /// Equality against UTF-8 text under `mode`.
    ///
    /// Ordinal and ignore-case modes encode `other` lazily; culture mode
    /// needs a contiguous window and encodes it into a temporary buffer.
    pub fn equals_str(&self, other: &str, mode: Comparison<'_>) -> bool {
        let left = self.as_units().iter().copied();
        match mode {
            Comparison::Ordinal => left.eq(other.encode_utf16()),
            Comparison::OrdinalIgnoreCase => folded(left).eq(folded(other.encode_utf16())),
            Comparison::Culture(_) => self.equals(&Utf16Buffer::from(other), mode),
        }
    }

    /// Three-way comparison under `mode`.
    ///
    /// Ordinal modes compare code unit by code unit. Culture mode hands both
    /// whole windows to the collation, so surrogate pairs are never split.
    /// When everything compared ties, the shorter view sorts first.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    /// use textview_core::{Comparison, Utf16Buffer};
    ///
    /// let ab = Utf16Buffer::from("ab");
    /// let abc = Utf16Buffer::from("abc");
    /// assert_eq!(ab.view().compare(&abc, Comparison::Ordinal), Ordering::Less);
    /// assert_eq!(abc.view().compare(&ab, Comparison::Ordinal), Ordering::Greater);
    /// ```
    pub fn compare<R: AsUnits + ?Sized>(&self, other: &R, mode: Comparison<'_>) -> Ordering {
        let right = other.as_units();
        units_cmp(self.as_units(), right, mode).then_with(|| self.len().cmp(&right.len()))
    }

    /// Compares at most `length` code units of each side under `mode`.
    ///
    /// A side shorter than `length` takes part with all its units, and then
    /// sorts before a longer side it is a prefix of. In culture mode a
    /// surrogate pair that straddles `length` is left out whole.
    pub fn compare_prefix<R: AsUnits + ?Sized>(
        &self,
        other: &R,
        length: usize,
        mode: Comparison<'_>,
    ) -> Ordering {
        let (left, right) = (self.as_units(), other.as_units());
        match mode {
            Comparison::Culture(_) => units_cmp(
                code_point_prefix(left, length),
                code_point_prefix(right, length),
                mode,
            ),
            _ => units_cmp(
                &left[..length.min(left.len())],
                &right[..length.min(right.len())],
                mode,
            ),
        }
    }

    /// Hashes the view consistently with [`TextView::equals`] under `mode`.
    pub fn hash_with<H: Hasher>(&self, mode: Comparison<'_>, state: &mut H) {
        match mode {
            Comparison::Ordinal => self.hash(state),
            Comparison::OrdinalIgnoreCase => {
                state.write_usize(self.len());
                for unit in folded(self.as_units().iter().copied()) {
                    state.write_u16(unit);
                }
            }
            Comparison::Culture(collation) => collation.hash_units(self.as_units(), state),
        }
    }
}

// ==================== PartialEq ====================

impl<'b> PartialEq<TextView<'b>> for TextView<'_> {
    fn eq(&self, other: &TextView<'b>) -> bool {
        self.equals(other, Comparison::Ordinal)
    }
}

impl Eq for TextView<'_> {}

macro_rules! impl_unit_eq {
    ($($ty:ty),* $(,)?) => {$(
        impl PartialEq<$ty> for TextView<'_> {
            fn eq(&self, other: &$ty) -> bool {
                self.equals(other, Comparison::Ordinal)
            }
        }

        impl PartialEq<TextView<'_>> for $ty {
            fn eq(&self, other: &TextView<'_>) -> bool {
                other.equals(self, Comparison::Ordinal)
            }
        }
    )*};
}

impl_unit_eq!([u16], &[u16], Vec<u16>, Utf16Buffer);

impl<const N: usize> PartialEq<[u16; N]> for TextView<'_> {
    fn eq(&self, other: &[u16; N]) -> bool {
        self.equals(other, Comparison::Ordinal)
    }
}

impl<const N: usize> PartialEq<TextView<'_>> for [u16; N] {
    fn eq(&self, other: &TextView<'_>) -> bool {
        other.equals(self, Comparison::Ordinal)
    }
}

macro_rules! impl_str_eq {
    ($($ty:ty),* $(,)?) => {$(
        impl PartialEq<$ty> for TextView<'_> {
            fn eq(&self, other: &$ty) -> bool {
                self.equals_str(other, Comparison::Ordinal)
            }
        }

        impl PartialEq<TextView<'_>> for $ty {
            fn eq(&self, other: &TextView<'_>) -> bool {
                other.equals_str(self, Comparison::Ordinal)
            }
        }
    )*};
}

impl_str_eq!(str, &str, String);

// ==================== Ordering ====================

impl<'b> PartialOrd<TextView<'b>> for TextView<'_> {
    fn partial_cmp(&self, other: &TextView<'b>) -> Option<Ordering> {
        Some(self.compare(other, Comparison::Ordinal))
    }
}

impl Ord for TextView<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other, Comparison::Ordinal)
    }
}

impl PartialOrd<str> for TextView<'_> {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        Some(self.as_units().iter().copied().cmp(other.encode_utf16()))
    }
}

impl PartialOrd<&str> for TextView<'_> {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        self.partial_cmp(*other)
    }
}
