//! Simple case mapping over UTF-16 code units.
//!
//! Every mapping here keeps the code-unit count: a code point is only
//! replaced when its mapping is a single code point of the same UTF-16
//! width. That is what lets ignore-case comparison line windows up unit for
//! unit, and what lets case conversion write into a destination the same
//! size as its source.

/// Simple uppercase mapping of `c`, or `c` itself when the full mapping
/// expands or changes width.
pub(crate) fn simple_upper(c: char) -> char {
    keep_width(c, c.to_uppercase())
}

/// Simple lowercase mapping of `c`; see [`simple_upper`].
pub(crate) fn simple_lower(c: char) -> char {
    keep_width(c, c.to_lowercase())
}

fn keep_width(c: char, mut mapped: impl Iterator<Item = char>) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(single), None) if single.len_utf16() == c.len_utf16() => single,
        _ => c,
    }
}

/// Decodes `units`, applies `map` to each code point and re-encodes.
///
/// Unpaired surrogates pass through untouched, and mappings that would
/// change a code point's width are ignored, so the output always has
/// exactly as many code units as the input.
pub(crate) fn map_units(
    units: impl IntoIterator<Item = u16>,
    map: impl Fn(char) -> char,
) -> impl Iterator<Item = u16> {
    char::decode_utf16(units).flat_map(move |decoded| {
        let mut buf = [0u16; 2];
        let width = match decoded {
            Ok(c) => {
                let mapped = map(c);
                let mapped = if mapped.len_utf16() == c.len_utf16() {
                    mapped
                } else {
                    c
                };
                mapped.encode_utf16(&mut buf).len()
            }
            Err(err) => {
                buf[0] = err.unpaired_surrogate();
                1
            }
        };
        buf.into_iter().take(width)
    })
}

/// Code units folded for ordinal ignore-case comparison.
pub(crate) fn folded(units: impl IntoIterator<Item = u16>) -> impl Iterator<Item = u16> {
    map_units(units, simple_upper)
}

/// Ordinal ignore-case equality of two code-unit slices.
pub(crate) fn eq_ignore_case(left: &[u16], right: &[u16]) -> bool {
    // Folding keeps widths, so differing lengths can never match.
    left.len() == right.len() && folded(left.iter().copied()).eq(folded(right.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn test_simple_mappings() {
        assert_eq!(simple_upper('a'), 'A');
        assert_eq!(simple_lower('Ä'), 'ä');
        // 'ß' uppercases to "SS": not a simple mapping
        assert_eq!(simple_upper('ß'), 'ß');
        assert_eq!(simple_upper('1'), '1');
    }

    #[test]
    fn test_map_units_keeps_length() {
        let source = units("straße \u{10428}");
        let upper: Vec<u16> = map_units(source.iter().copied(), simple_upper).collect();
        assert_eq!(upper.len(), source.len());
        assert_eq!(String::from_utf16(&upper).unwrap(), "STRAßE \u{10400}");
    }

    #[test]
    fn test_map_units_passes_lone_surrogates() {
        let source = vec![0x61, 0xDC00, 0x62];
        let upper: Vec<u16> = folded(source.iter().copied()).collect();
        assert_eq!(upper, vec![0x41, 0xDC00, 0x42]);
    }

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case(&units("Hello"), &units("hELLO")));
        assert!(!eq_ignore_case(&units("Hello"), &units("Hell")));
        assert!(!eq_ignore_case(&units("abc"), &units("abd")));
        assert!(eq_ignore_case(&[], &[]));
    }
}
