//! Multi-value code-unit search.
//!
//! ## Learning: Precomputed Search Sets
//!
//! Checking each code unit against a list of N candidates costs N
//! comparisons per unit. `UnitSet` does the work once up front: ASCII
//! members go into a 128-bit bitmap (one shift and mask per test) and the
//! rest into a sorted slice (a binary search). Line splitting uses a shared
//! set of the newline units.

use std::sync::LazyLock;

/// CARRIAGE RETURN
pub const CR: u16 = 0x000D;
/// LINE FEED
pub const LF: u16 = 0x000A;
/// FORM FEED
pub const FF: u16 = 0x000C;
/// NEXT LINE
pub const NEL: u16 = 0x0085;
/// LINE SEPARATOR
pub const LINE_SEPARATOR: u16 = 0x2028;
/// PARAGRAPH SEPARATOR
pub const PARAGRAPH_SEPARATOR: u16 = 0x2029;

static NEWLINES: LazyLock<UnitSet> =
    LazyLock::new(|| UnitSet::new(&[CR, LF, FF, NEL, LINE_SEPARATOR, PARAGRAPH_SEPARATOR]));

/// A precomputed set of code units to search for.
///
/// # Example
/// ```
/// use textview_core::{UnitSet, Utf16Buffer};
///
/// let vowels = UnitSet::from("aeiou");
/// let buffer = Utf16Buffer::from("rhythm and blues");
/// assert_eq!(buffer.view().find_any(&vowels), Some(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitSet {
    /// Bit `n` is set when ASCII unit `n` is a member
    ascii: u128,

    /// Sorted, deduplicated non-ASCII members
    others: Box<[u16]>,
}

impl UnitSet {
    /// Builds a set from a list of code units. Duplicates are ignored.
    pub fn new(units: &[u16]) -> Self {
        let mut ascii = 0u128;
        let mut others = Vec::new();
        for &unit in units {
            if unit < 128 {
                ascii |= 1u128 << unit;
            } else {
                others.push(unit);
            }
        }
        others.sort_unstable();
        others.dedup();

        Self {
            ascii,
            others: others.into_boxed_slice(),
        }
    }

    /// The newline units recognized by line splitting: CR, LF, FF, NEL,
    /// LINE SEPARATOR and PARAGRAPH SEPARATOR.
    pub fn newlines() -> &'static UnitSet {
        &NEWLINES
    }

    /// Returns true if `unit` is in the set.
    #[inline]
    pub fn contains(&self, unit: u16) -> bool {
        if unit < 128 {
            self.ascii & (1u128 << unit) != 0
        } else {
            self.others.binary_search(&unit).is_ok()
        }
    }

    /// Number of distinct members.
    pub fn len(&self) -> usize {
        self.ascii.count_ones() as usize + self.others.len()
    }

    /// Returns true if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.ascii == 0 && self.others.is_empty()
    }

    /// Index of the first unit in `haystack` that is a member.
    #[inline]
    pub fn find_in(&self, haystack: &[u16]) -> Option<usize> {
        haystack.iter().position(|&unit| self.contains(unit))
    }

    /// Index of the last unit in `haystack` that is a member.
    #[inline]
    pub fn rfind_in(&self, haystack: &[u16]) -> Option<usize> {
        haystack.iter().rposition(|&unit| self.contains(unit))
    }

    /// Index of the first unit in `haystack` that is not a member.
    #[inline]
    pub fn find_except_in(&self, haystack: &[u16]) -> Option<usize> {
        haystack.iter().position(|&unit| !self.contains(unit))
    }

    /// Index of the last unit in `haystack` that is not a member.
    #[inline]
    pub fn rfind_except_in(&self, haystack: &[u16]) -> Option<usize> {
        haystack.iter().rposition(|&unit| !self.contains(unit))
    }
}

impl From<&[u16]> for UnitSet {
    fn from(units: &[u16]) -> Self {
        Self::new(units)
    }
}

impl From<&str> for UnitSet {
    fn from(text: &str) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        Self::new(&units)
    }
}

impl FromIterator<u16> for UnitSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let units: Vec<u16> = iter.into_iter().collect();
        Self::new(&units)
    }
}

/// Locates the first line terminator in `units`.
///
/// Returns its index and stride: 2 for a CR immediately followed by LF,
/// 1 for every other terminator.
pub(crate) fn find_newline(units: &[u16]) -> Option<(usize, usize)> {
    let index = NEWLINES.find_in(units)?;
    let stride = if units[index] == CR && units.get(index + 1) == Some(&LF) {
        2
    } else {
        1
    };
    Some((index, stride))
}

/// Unicode White_Space check for one code unit. Surrogates are never white
/// space.
#[inline]
pub(crate) fn is_whitespace_unit(unit: u16) -> bool {
    char::from_u32(u32::from(unit)).is_some_and(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let set = UnitSet::new(&[0x41, 0x2028, 0x41, 0xFFFF]);
        assert!(set.contains(0x41));
        assert!(set.contains(0x2028));
        assert!(set.contains(0xFFFF));
        assert!(!set.contains(0x42));
        assert!(!set.contains(0x2029));
        assert_eq!(set.len(), 3);
        assert!(UnitSet::default().is_empty());
    }

    #[test]
    fn test_newline_set() {
        let set = UnitSet::newlines();
        for unit in [CR, LF, FF, NEL, LINE_SEPARATOR, PARAGRAPH_SEPARATOR] {
            assert!(set.contains(unit), "missing {unit:#06x}");
        }
        // VERTICAL TAB is not a line terminator here
        assert!(!set.contains(0x000B));
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_find_variants() {
        let set = UnitSet::from("ab");
        let haystack: Vec<u16> = "xxaybx".encode_utf16().collect();

        assert_eq!(set.find_in(&haystack), Some(2));
        assert_eq!(set.rfind_in(&haystack), Some(4));
        assert_eq!(set.find_except_in(&haystack), Some(0));
        assert_eq!(set.rfind_except_in(&haystack), Some(5));
        assert_eq!(set.find_in(&[]), None);
    }

    #[test]
    fn test_find_newline_stride() {
        let crlf: Vec<u16> = "ab\r\ncd".encode_utf16().collect();
        assert_eq!(find_newline(&crlf), Some((2, 2)));

        let lfcr: Vec<u16> = "ab\n\rcd".encode_utf16().collect();
        assert_eq!(find_newline(&lfcr), Some((2, 1)));

        let trailing_cr: Vec<u16> = "ab\r".encode_utf16().collect();
        assert_eq!(find_newline(&trailing_cr), Some((2, 1)));

        let none: Vec<u16> = "abc".encode_utf16().collect();
        assert_eq!(find_newline(&none), None);
    }

    #[test]
    fn test_whitespace_units() {
        assert!(is_whitespace_unit(0x20));
        assert!(is_whitespace_unit(0x3000));
        assert!(is_whitespace_unit(NEL));
        assert!(!is_whitespace_unit(0x41));
        assert!(!is_whitespace_unit(0xD800));
    }
}
