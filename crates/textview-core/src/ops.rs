//! Search, trim and case operations on views.
//!
//! Every operation here takes the view's code-unit window (`as_units`, O(1),
//! no copy) and runs a plain slice algorithm over it. Operations that
//! compare text take a [`Comparison`] and use the same equality rules as
//! [`TextView::equals`]. Trims return sub-views of the original, never
//! copies.

use std::cmp::Ordering;

use crate::buffer::Utf16Buffer;
use crate::case::{map_units, simple_lower, simple_upper};
use crate::compare::{units_equal, AsUnits, Collation, Comparison};
use crate::search::{is_whitespace_unit, UnitSet};
use crate::view::TextView;
use crate::{ViewError, ViewResult};

impl<'a> TextView<'a> {
    // ==================== Substring Search ====================

    /// Index of the first occurrence of `value`.
    ///
    /// An empty `value` matches at 0. Matches are windows of exactly
    /// `value.len()` code units, including under culture comparison.
    ///
    /// # Example
    /// ```
    /// use textview_core::{Comparison, Utf16Buffer};
    ///
    /// let text = Utf16Buffer::from("Hello, World");
    /// let needle = Utf16Buffer::from("world");
    /// assert_eq!(text.view().find(&needle, Comparison::Ordinal), None);
    /// assert_eq!(text.view().find(&needle, Comparison::OrdinalIgnoreCase), Some(7));
    /// ```
    pub fn find<V: AsUnits + ?Sized>(&self, value: &V, mode: Comparison<'_>) -> Option<usize> {
        let (haystack, needle) = (self.as_units(), value.as_units());
        if needle.is_empty() {
            return Some(0);
        }
        haystack
            .windows(needle.len())
            .position(|window| units_equal(window, needle, mode))
    }

    /// Index of the last occurrence of `value`.
    ///
    /// An empty `value` matches at `len()`.
    pub fn rfind<V: AsUnits + ?Sized>(&self, value: &V, mode: Comparison<'_>) -> Option<usize> {
        let (haystack, needle) = (self.as_units(), value.as_units());
        if needle.is_empty() {
            return Some(haystack.len());
        }
        haystack
            .windows(needle.len())
            .rposition(|window| units_equal(window, needle, mode))
    }

    /// Returns true if `value` occurs in the view.
    pub fn contains<V: AsUnits + ?Sized>(&self, value: &V, mode: Comparison<'_>) -> bool {
        self.find(value, mode).is_some()
    }

    /// Returns true if the view begins with `value`.
    pub fn starts_with<V: AsUnits + ?Sized>(&self, value: &V, mode: Comparison<'_>) -> bool {
        let (units, prefix) = (self.as_units(), value.as_units());
        prefix.len() <= units.len() && units_equal(&units[..prefix.len()], prefix, mode)
    }

    /// Returns true if the view ends with `value`.
    pub fn ends_with<V: AsUnits + ?Sized>(&self, value: &V, mode: Comparison<'_>) -> bool {
        let (units, suffix) = (self.as_units(), value.as_units());
        suffix.len() <= units.len()
            && units_equal(&units[units.len() - suffix.len()..], suffix, mode)
    }

    // ==================== Single Unit Search ====================

    /// Index of the first occurrence of `unit`.
    pub fn find_unit(&self, unit: u16) -> Option<usize> {
        self.as_units().iter().position(|&u| u == unit)
    }

    /// Index of the last occurrence of `unit`.
    pub fn rfind_unit(&self, unit: u16) -> Option<usize> {
        self.as_units().iter().rposition(|&u| u == unit)
    }

    /// Returns true if `unit` occurs in the view.
    pub fn contains_unit(&self, unit: u16) -> bool {
        self.as_units().contains(&unit)
    }

    // ==================== Any-of Search ====================

    /// Index of the first unit that is in `values`.
    pub fn find_any(&self, values: &UnitSet) -> Option<usize> {
        values.find_in(self.as_units())
    }

    /// Index of the last unit that is in `values`.
    pub fn rfind_any(&self, values: &UnitSet) -> Option<usize> {
        values.rfind_in(self.as_units())
    }

    /// Index of the first unit that is not in `values`.
    pub fn find_any_except(&self, values: &UnitSet) -> Option<usize> {
        values.find_except_in(self.as_units())
    }

    /// Index of the last unit that is not in `values`.
    pub fn rfind_any_except(&self, values: &UnitSet) -> Option<usize> {
        values.rfind_except_in(self.as_units())
    }

    /// Index of the first unit in `low..=high`.
    pub fn find_any_in_range(&self, low: u16, high: u16) -> Option<usize> {
        self.as_units().iter().position(|u| (low..=high).contains(u))
    }

    /// Index of the last unit in `low..=high`.
    pub fn rfind_any_in_range(&self, low: u16, high: u16) -> Option<usize> {
        self.as_units().iter().rposition(|u| (low..=high).contains(u))
    }

    /// Index of the first unit outside `low..=high`.
    pub fn find_any_except_in_range(&self, low: u16, high: u16) -> Option<usize> {
        self.as_units().iter().position(|u| !(low..=high).contains(u))
    }

    /// Index of the last unit outside `low..=high`.
    pub fn rfind_any_except_in_range(&self, low: u16, high: u16) -> Option<usize> {
        self.as_units().iter().rposition(|u| !(low..=high).contains(u))
    }

    /// Returns true if every unit is white space (true for an empty view).
    pub fn is_whitespace(&self) -> bool {
        self.as_units().iter().all(|&unit| is_whitespace_unit(unit))
    }

    // ==================== Trimming ====================

    fn trim_start_by(&self, mut trim: impl FnMut(u16) -> bool) -> Self {
        let start = self
            .as_units()
            .iter()
            .position(|&unit| !trim(unit))
            .unwrap_or(self.len());
        self.window(start, self.len() - start)
    }

    fn trim_end_by(&self, mut trim: impl FnMut(u16) -> bool) -> Self {
        let end = self
            .as_units()
            .iter()
            .rposition(|&unit| !trim(unit))
            .map_or(0, |last| last + 1);
        self.window(0, end)
    }

    /// Removes leading and trailing white space.
    ///
    /// # Example
    /// ```
    /// use textview_core::Utf16Buffer;
    ///
    /// let buffer = Utf16Buffer::from("  padded\t\n");
    /// let trimmed = buffer.view().trim();
    /// assert_eq!(trimmed, "padded");
    /// assert_eq!(trimmed.offset(), 2);
    /// ```
    pub fn trim(&self) -> Self {
        self.trim_start().trim_end()
    }

    /// Removes leading white space.
    pub fn trim_start(&self) -> Self {
        self.trim_start_by(is_whitespace_unit)
    }

    /// Removes trailing white space.
    pub fn trim_end(&self) -> Self {
        self.trim_end_by(is_whitespace_unit)
    }

    /// Removes leading and trailing occurrences of `unit`.
    pub fn trim_matches(&self, unit: u16) -> Self {
        self.trim_start_matches(unit).trim_end_matches(unit)
    }

    /// Removes leading occurrences of `unit`.
    pub fn trim_start_matches(&self, unit: u16) -> Self {
        self.trim_start_by(|u| u == unit)
    }

    /// Removes trailing occurrences of `unit`.
    pub fn trim_end_matches(&self, unit: u16) -> Self {
        self.trim_end_by(|u| u == unit)
    }

    /// Removes leading and trailing units that are in `values`.
    pub fn trim_any(&self, values: &UnitSet) -> Self {
        self.trim_start_any(values).trim_end_any(values)
    }

    /// Removes leading units that are in `values`.
    pub fn trim_start_any(&self, values: &UnitSet) -> Self {
        self.trim_start_by(|u| values.contains(u))
    }

    /// Removes trailing units that are in `values`.
    pub fn trim_end_any(&self, values: &UnitSet) -> Self {
        self.trim_end_by(|u| values.contains(u))
    }

    // ==================== Sorted Data ====================

    /// Binary search for `unit` in a view sorted by code unit.
    ///
    /// Follows the slice convention: `Ok(index)` of a match, or
    /// `Err(insertion_point)` when absent.
    pub fn binary_search(&self, unit: u16) -> Result<usize, usize> {
        self.as_units().binary_search(&unit)
    }

    /// Binary search with a comparator; see [`slice::binary_search_by`].
    pub fn binary_search_by(&self, f: impl FnMut(&u16) -> Ordering) -> Result<usize, usize> {
        self.as_units().binary_search_by(f)
    }

    /// Number of leading code units shared with `other`.
    pub fn common_prefix_len<V: AsUnits + ?Sized>(&self, other: &V) -> usize {
        self.common_prefix_len_by(other, |a, b| a == b)
    }

    /// Number of leading code units for which `eq` holds.
    pub fn common_prefix_len_by<V: AsUnits + ?Sized>(
        &self,
        other: &V,
        mut eq: impl FnMut(u16, u16) -> bool,
    ) -> usize {
        self.as_units()
            .iter()
            .zip(other.as_units())
            .take_while(|&(&a, &b)| eq(a, b))
            .count()
    }

    // ==================== Memory Overlap ====================

    /// Returns true if both windows share at least one code unit of memory.
    pub fn overlaps<V: AsUnits + ?Sized>(&self, other: &V) -> bool {
        self.overlap_offset(other).is_some()
    }

    /// When the windows share memory, the position of `other`'s first unit
    /// relative to this view's first unit (negative if it starts earlier).
    ///
    /// # Example
    /// ```
    /// use textview_core::Utf16Buffer;
    ///
    /// let buffer = Utf16Buffer::from("0123456789");
    /// let left = buffer.view().slice(0, 6).unwrap();
    /// let right = buffer.view().slice(4, 6).unwrap();
    /// assert_eq!(left.overlap_offset(&right), Some(4));
    /// assert_eq!(right.overlap_offset(&left), Some(-4));
    /// ```
    pub fn overlap_offset<V: AsUnits + ?Sized>(&self, other: &V) -> Option<isize> {
        let (left, right) = (self.as_units(), other.as_units());
        if left.is_empty() || right.is_empty() {
            return None;
        }

        let left_start = left.as_ptr() as usize;
        let right_start = right.as_ptr() as usize;
        let unit = size_of::<u16>();
        let left_end = left_start + left.len() * unit;
        let right_end = right_start + right.len() * unit;
        if left_start >= right_end || right_start >= left_end {
            return None;
        }

        let bytes = right_start.wrapping_sub(left_start) as isize;
        Some(bytes / unit as isize)
    }

    // ==================== Case Conversion ====================

    /// Uppercase copy using simple, length-preserving case mappings.
    pub fn to_upper(&self) -> Utf16Buffer {
        map_units(self.as_units().iter().copied(), simple_upper).collect()
    }

    /// Lowercase copy using simple, length-preserving case mappings.
    pub fn to_lower(&self) -> Utf16Buffer {
        map_units(self.as_units().iter().copied(), simple_lower).collect()
    }

    /// Uppercase copy using a collation's mappings.
    pub fn to_upper_with(&self, collation: &dyn Collation) -> Utf16Buffer {
        map_units(self.as_units().iter().copied(), |c| collation.to_upper(c)).collect()
    }

    /// Lowercase copy using a collation's mappings.
    pub fn to_lower_with(&self, collation: &dyn Collation) -> Utf16Buffer {
        map_units(self.as_units().iter().copied(), |c| collation.to_lower(c)).collect()
    }

    /// Writes the uppercase form into `destination`, returning the number of
    /// code units written (always `len()`).
    ///
    /// # Errors
    ///
    /// [`ViewError::DestinationTooSmall`] if `destination` is shorter than
    /// the view; nothing is written in that case.
    pub fn to_upper_into(&self, destination: &mut [u16]) -> ViewResult<usize> {
        self.map_into(destination, simple_upper)
    }

    /// Writes the lowercase form into `destination`; see
    /// [`TextView::to_upper_into`].
    pub fn to_lower_into(&self, destination: &mut [u16]) -> ViewResult<usize> {
        self.map_into(destination, simple_lower)
    }

    fn map_into(&self, destination: &mut [u16], map: impl Fn(char) -> char) -> ViewResult<usize> {
        if destination.len() < self.len() {
            return Err(ViewError::DestinationTooSmall {
                required: self.len(),
                available: destination.len(),
            });
        }
        let mapped = map_units(self.as_units().iter().copied(), map);
        for (slot, unit) in destination.iter_mut().zip(mapped) {
            *slot = unit;
        }
        Ok(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InvariantCollation;

    fn buf(text: &str) -> Utf16Buffer {
        Utf16Buffer::from(text)
    }

    #[test]
    fn test_find_and_rfind() {
        let text = buf("abcabc");
        let view = text.view();

        assert_eq!(view.find(&buf("bc"), Comparison::Ordinal), Some(1));
        assert_eq!(view.rfind(&buf("bc"), Comparison::Ordinal), Some(4));
        assert_eq!(view.find(&buf("cd"), Comparison::Ordinal), None);
        assert_eq!(view.find(&buf(""), Comparison::Ordinal), Some(0));
        assert_eq!(view.rfind(&buf(""), Comparison::Ordinal), Some(6));
        assert_eq!(view.find(&buf("abcabcd"), Comparison::Ordinal), None);
        assert_eq!(view.rfind(&buf("ABC"), Comparison::OrdinalIgnoreCase), Some(3));
    }

    #[test]
    fn test_find_positions_are_view_relative() {
        let text = buf("xx needle");
        let view = text.view().slice_from(2).unwrap();
        assert_eq!(view.find(&buf("needle"), Comparison::Ordinal), Some(1));
    }

    #[test]
    fn test_find_with_collation() {
        let invariant = InvariantCollation::IGNORE_CASE;
        let text = buf("Straße");
        assert!(!text.view().contains(&buf("SSE"), Comparison::Culture(&invariant)));
        assert!(text.view().contains(&buf("AßE"), Comparison::Culture(&invariant)));
    }

    #[test]
    fn test_starts_and_ends_with() {
        let text = buf("Prefix-body-Suffix");
        let view = text.view();

        assert!(view.starts_with(&buf("Prefix"), Comparison::Ordinal));
        assert!(!view.starts_with(&buf("prefix"), Comparison::Ordinal));
        assert!(view.starts_with(&buf("prefix"), Comparison::OrdinalIgnoreCase));
        assert!(view.ends_with(&buf("suffix"), Comparison::OrdinalIgnoreCase));
        assert!(view.ends_with(&buf(""), Comparison::Ordinal));
        assert!(!buf("ab").view().ends_with(&buf("cab"), Comparison::Ordinal));
    }

    #[test]
    fn test_unit_search() {
        let text = buf("a.b.c");
        let view = text.view();
        let dot = u16::from(b'.');

        assert_eq!(view.find_unit(dot), Some(1));
        assert_eq!(view.rfind_unit(dot), Some(3));
        assert!(view.contains_unit(dot));
        assert!(!view.contains_unit(u16::from(b'z')));
    }

    #[test]
    fn test_any_of_search() {
        let text = buf("  key=value;");
        let view = text.view();
        let separators = UnitSet::from("=;");
        let blanks = UnitSet::from(" ");

        assert_eq!(view.find_any(&separators), Some(5));
        assert_eq!(view.rfind_any(&separators), Some(11));
        assert_eq!(view.find_any_except(&blanks), Some(2));
        assert_eq!(view.rfind_any_except(&separators), Some(10));
    }

    #[test]
    fn test_range_search() {
        let text = buf("abc123def");
        let view = text.view();
        let (zero, nine) = (u16::from(b'0'), u16::from(b'9'));

        assert_eq!(view.find_any_in_range(zero, nine), Some(3));
        assert_eq!(view.rfind_any_in_range(zero, nine), Some(5));
        assert_eq!(view.find_any_except_in_range(u16::from(b'a'), u16::from(b'z')), Some(3));
        assert_eq!(view.rfind_any_except_in_range(zero, nine), Some(8));
    }

    #[test]
    fn test_is_whitespace() {
        assert!(buf(" \t\u{3000}\n").view().is_whitespace());
        assert!(TextView::default().is_whitespace());
        assert!(!buf(" x ").view().is_whitespace());
    }

    #[test]
    fn test_trim_returns_sub_views() {
        let text = buf("\t  hello  \n");
        let view = text.view();

        let trimmed = view.trim();
        assert_eq!(trimmed, "hello");
        assert_eq!(trimmed.offset(), 3);
        assert!(std::ptr::eq(trimmed.buffer(), view.buffer()));

        assert_eq!(view.trim_start(), "hello  \n");
        assert_eq!(view.trim_end(), "\t  hello");
        assert_eq!(buf("   ").view().trim(), "");
    }

    #[test]
    fn test_trim_units_and_sets() {
        let text = buf("--==value==--");
        let view = text.view();
        let dash = u16::from(b'-');

        assert_eq!(view.trim_matches(dash), "==value==");
        assert_eq!(view.trim_start_matches(dash), "==value==--");
        assert_eq!(view.trim_end_matches(dash), "--==value==");

        let decoration = UnitSet::from("-=");
        assert_eq!(view.trim_any(&decoration), "value");
        assert_eq!(view.trim_start_any(&decoration), "value==--");
        assert_eq!(view.trim_end_any(&decoration), "--==value");
    }

    #[test]
    fn test_binary_search() {
        let text = buf("acegik");
        let view = text.view();

        assert_eq!(view.binary_search(u16::from(b'e')), Ok(2));
        assert_eq!(view.binary_search(u16::from(b'd')), Err(2));
        assert_eq!(view.binary_search(u16::from(b'z')), Err(6));
        assert_eq!(
            view.binary_search_by(|probe| probe.cmp(&u16::from(b'k'))),
            Ok(5)
        );
    }

    fn ascii_eq_ignore_case(a: u16, b: u16) -> bool {
        let upper = |unit: u16| char::from_u32(u32::from(unit)).map(|c| c.to_ascii_uppercase());
        upper(a) == upper(b)
    }

    #[test]
    fn test_common_prefix() {
        let text = buf("interstellar");
        let view = text.view();

        assert_eq!(view.common_prefix_len(&buf("internet")), 5);
        assert_eq!(view.common_prefix_len(&buf("")), 0);
        assert_eq!(view.common_prefix_len_by(&buf("INTERNAL"), ascii_eq_ignore_case), 5);
        assert_eq!(view.common_prefix_len_by(&buf("INTERSTATE"), ascii_eq_ignore_case), 7);
    }

    #[test]
    fn test_overlaps() {
        let text = buf("0123456789");
        let view = text.view();
        let left = view.slice(0, 5).unwrap();
        let right = view.slice(5, 5).unwrap();
        let middle = view.slice(3, 4).unwrap();

        assert!(!left.overlaps(&right));
        assert!(left.overlaps(&middle));
        assert_eq!(middle.overlap_offset(&left), Some(-3));
        assert!(!left.overlaps(&view.slice(2, 0).unwrap()));

        let copy = buf("0123456789");
        assert!(!view.overlaps(&copy));
    }

    #[test]
    fn test_case_conversion() {
        let text = buf("Hello, Wörld \u{10428}");
        let view = text.view();

        assert_eq!(view.to_upper().to_string(), "HELLO, WÖRLD \u{10400}");
        assert_eq!(view.to_lower().to_string(), "hello, wörld \u{10428}");
        assert_eq!(view.to_upper().len(), view.len());

        let invariant = InvariantCollation::default();
        assert_eq!(view.to_upper_with(&invariant), view.to_upper());
        assert_eq!(view.to_lower_with(&invariant), view.to_lower());
    }

    #[test]
    fn test_case_conversion_into() {
        let text = buf("MiXeD");
        let view = text.view();

        let mut destination = [0u16; 8];
        assert_eq!(view.to_lower_into(&mut destination), Ok(5));
        assert_eq!(&destination[..5], buf("mixed").as_units());
        assert_eq!(destination[5], 0);

        let mut small = [0u16; 3];
        assert_eq!(
            view.to_upper_into(&mut small),
            Err(ViewError::DestinationTooSmall {
                required: 5,
                available: 3
            })
        );
        assert_eq!(small, [0; 3]);
    }
}
