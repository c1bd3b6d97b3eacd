//! Byte-slice text helpers shared by the scanners: whitespace trimming,
//! escaped punctuation, link-reference normalization, and character
//! decoding at arbitrary offsets.

use crate::buffer::CopyOnWriteBuffer;
use crate::tables::{is_punct, is_space, utf8_len};
use std::borrow::Cow;
use std::ops::Range;

const SPACES: &[u8] = b" \t\n\x0b\x0c\r";

/// Whether `bytes[i]` is a backslash escaping an ASCII punctuation byte.
pub fn is_escaped_punctuation(bytes: &[u8], i: usize) -> bool {
    bytes.get(i) == Some(&b'\\') && bytes.get(i + 1).is_some_and(|&c| is_punct(c))
}

/// Advance through `range` while `pred` holds.
///
/// Returns the first offset where `pred` failed (or `range.end`) and
/// whether at least one byte matched.
pub fn read_while(bytes: &[u8], range: Range<usize>, pred: impl Fn(u8) -> bool) -> (usize, bool) {
    let end = range.end.min(bytes.len());
    let mut i = range.start;
    while i < end && pred(bytes[i]) {
        i += 1;
    }
    (i, i > range.start)
}

/// Whether every byte is whitespace (an empty slice is blank).
pub fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|&c| is_space(c))
}

/// Strip leading bytes contained in `set`.
pub fn trim_left<'a>(source: &'a [u8], set: &[u8]) -> &'a [u8] {
    let start = source
        .iter()
        .position(|c| !set.contains(c))
        .unwrap_or(source.len());
    &source[start..]
}

/// Strip trailing bytes contained in `set`.
pub fn trim_right<'a>(source: &'a [u8], set: &[u8]) -> &'a [u8] {
    let end = source
        .iter()
        .rposition(|c| !set.contains(c))
        .map_or(0, |i| i + 1);
    &source[..end]
}

pub fn trim_left_length(source: &[u8], set: &[u8]) -> usize {
    source.len() - trim_left(source, set).len()
}

pub fn trim_right_length(source: &[u8], set: &[u8]) -> usize {
    source.len() - trim_right(source, set).len()
}

pub fn trim_left_space(source: &[u8]) -> &[u8] {
    trim_left(source, SPACES)
}

pub fn trim_right_space(source: &[u8]) -> &[u8] {
    trim_right(source, SPACES)
}

/// Number of leading whitespace bytes.
pub fn trim_left_space_length(source: &[u8]) -> usize {
    source.iter().take_while(|&&c| is_space(c)).count()
}

/// Number of trailing whitespace bytes.
pub fn trim_right_space_length(source: &[u8]) -> usize {
    source.iter().rev().take_while(|&&c| is_space(c)).count()
}

/// Collapse every run of whitespace into a single `repl` byte.
///
/// ```
/// use markscan_scan::text::replace_spaces;
///
/// assert_eq!(&*replace_spaces(b"a \t b\n", b' '), b"a b ");
/// assert_eq!(&*replace_spaces(b"ab", b' '), b"ab");
/// ```
pub fn replace_spaces(source: &[u8], repl: u8) -> Cow<'_, [u8]> {
    let mut cob = CopyOnWriteBuffer::new(source);
    let mut n = 0;
    let mut i = 0;
    while i < source.len() {
        if !is_space(source[i]) {
            i += 1;
            continue;
        }
        let run = trim_left_space_length(&source[i..]);
        // A lone space already equal to the replacement needs no rewrite.
        if run == 1 && source[i] == repl {
            i += 1;
            continue;
        }
        cob.write(&source[n..i]);
        cob.write_byte(repl);
        i += run;
        n = i;
    }
    if cob.is_copied() {
        cob.write(&source[n..]);
    }
    cob.into_cow()
}

/// Normalize a link label for reference lookup: trim, collapse whitespace
/// runs to one space, and lowercase.
///
/// ```
/// use markscan_scan::text::to_link_reference;
///
/// assert_eq!(to_link_reference(b"  Foo\t\tBAR \n"), "foo bar");
/// ```
pub fn to_link_reference(label: &[u8]) -> String {
    let trimmed = trim_right_space(trim_left_space(label));
    String::from_utf8_lossy(&replace_spaces(trimmed, b' ')).to_lowercase()
}

/// Offset of the first byte that is neither a space nor a tab.
///
/// Returns `None` for a blank line or when a newline comes first.
pub fn first_non_space_position(line: &[u8]) -> Option<usize> {
    let pos = line.iter().position(|&c| c != b' ' && c != b'\t')?;
    if line[pos] == b'\n' {
        return None;
    }
    Some(pos)
}

/// Make whitespace visible, for debugging output.
pub fn visualize_spaces(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &c in bytes {
        match c {
            b' ' => out.extend_from_slice(b"[SPACE]"),
            b'\t' => out.extend_from_slice(b"[TAB]"),
            b'\n' => out.extend_from_slice(b"[NEWLINE]\n"),
            b'\r' => out.extend_from_slice(b"[CR]\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode the character that contains the byte at `pos`.
///
/// Walks back to the lead byte first, so `pos` may point into the middle of
/// a multi-byte sequence. Invalid sequences decode to U+FFFD.
///
/// ```
/// use markscan_scan::text::to_rune;
///
/// let s = "aé!".as_bytes();
/// assert_eq!(to_rune(s, 2), 'é');
/// assert_eq!(to_rune(s, 3), '!');
/// ```
pub fn to_rune(bytes: &[u8], pos: usize) -> char {
    if pos >= bytes.len() {
        return char::REPLACEMENT_CHARACTER;
    }
    let start = (0..=pos)
        .rev()
        .find(|&i| bytes[i] & 0xc0 != 0x80)
        .unwrap_or(0);
    let end = (start + utf8_len(bytes[start]).unwrap_or(1)).min(bytes.len());
    std::str::from_utf8(&bytes[start..end])
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// The character for code point `v`, or U+FFFD when `v` is zero or not a
/// Unicode scalar value.
pub fn to_valid_rune(v: u32) -> char {
    match v {
        0 => char::REPLACEMENT_CHARACTER,
        _ => char::from_u32(v).unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_punctuation() {
        assert!(is_escaped_punctuation(br"\*", 0));
        assert!(!is_escaped_punctuation(br"\a", 0));
        assert!(!is_escaped_punctuation(br"\", 0));
        assert!(!is_escaped_punctuation(br"a\*", 0));
        assert!(!is_escaped_punctuation(b"", 3));
    }

    #[test]
    fn test_read_while() {
        assert_eq!(read_while(b"123abc", 0..6, |c| c.is_ascii_digit()), (3, true));
        assert_eq!(read_while(b"abc", 0..3, |c| c.is_ascii_digit()), (0, false));
        assert_eq!(read_while(b"1234", 1..3, |c| c.is_ascii_digit()), (3, true));
        assert_eq!(read_while(b"12", 0..10, |c| c.is_ascii_digit()), (2, true));
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(b""));
        assert!(is_blank(b" \t\r\n"));
        assert!(!is_blank(b" x "));
    }

    #[test]
    fn test_trim_by_set() {
        assert_eq!(trim_left(b"--a-", b"-"), b"a-");
        assert_eq!(trim_right(b"--a-", b"-"), b"--a");
        assert_eq!(trim_left(b"---", b"-"), b"");
        assert_eq!(trim_right(b"---", b"-"), b"");
        assert_eq!(trim_left_length(b"xxy", b"x"), 2);
        assert_eq!(trim_right_length(b"yxx", b"x"), 2);
    }

    #[test]
    fn test_trim_spaces() {
        assert_eq!(trim_left_space(b" \t a "), b"a ");
        assert_eq!(trim_right_space(b" a \n"), b" a");
        assert_eq!(trim_left_space_length(b"  a"), 2);
        assert_eq!(trim_right_space_length(b"a \t"), 2);
        assert_eq!(trim_right_space_length(b"   "), 3);
        assert_eq!(trim_right_space_length(b""), 0);
    }

    #[test]
    fn test_replace_spaces_borrows_when_unchanged() {
        assert!(matches!(replace_spaces(b"a b c", b' '), Cow::Borrowed(_)));
        assert_eq!(&*replace_spaces(b"a  b", b' '), b"a b");
        assert_eq!(&*replace_spaces(b"a\tb", b' '), b"a b");
        assert_eq!(&*replace_spaces(b" a", b'_'), b"_a");
    }

    #[test]
    fn test_link_reference() {
        assert_eq!(to_link_reference(b"Foo  Bar"), "foo bar");
        assert_eq!(to_link_reference("ÄÖ".as_bytes()), "äö");
        assert_eq!(to_link_reference(b" \n "), "");
    }

    #[test]
    fn test_first_non_space_position() {
        assert_eq!(first_non_space_position(b"  \tx"), Some(3));
        assert_eq!(first_non_space_position(b"   "), None);
        assert_eq!(first_non_space_position(b"  \n"), None);
    }

    #[test]
    fn test_visualize_spaces() {
        assert_eq!(visualize_spaces(b"a b\t\r\n"), b"a[SPACE]b[TAB][CR]\n[NEWLINE]\n".to_vec());
    }

    #[test]
    fn test_to_rune() {
        let s = "x😀".as_bytes();
        for pos in 1..5 {
            assert_eq!(to_rune(s, pos), '😀');
        }
        assert_eq!(to_rune(s, 0), 'x');
        assert_eq!(to_rune(b"\xff", 0), char::REPLACEMENT_CHARACTER);
        assert_eq!(to_rune(b"a", 5), char::REPLACEMENT_CHARACTER);
    }

    #[test]
    fn test_to_valid_rune() {
        assert_eq!(to_valid_rune(0x41), 'A');
        assert_eq!(to_valid_rune(0), char::REPLACEMENT_CHARACTER);
        assert_eq!(to_valid_rune(0xd800), char::REPLACEMENT_CHARACTER);
        assert_eq!(to_valid_rune(0x110000), char::REPLACEMENT_CHARACTER);
    }
}
