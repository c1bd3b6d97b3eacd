//! Attribute syntax: `#id`, `.class` and `name=value` tokens, and the
//! trailing `{...}` blocks that carry them.
//!
//! # Example
//!
//! ```
//! use markscan_scan::attributes::find_attribute_indices_reverse;
//!
//! let line = br#"Heading {#intro .wide data-x="a b"}"#;
//! let records = find_attribute_indices_reverse(line, false).unwrap();
//! let names: Vec<&[u8]> = records.iter().map(|r| r.name(line)).collect();
//! assert_eq!(names, vec![&b"#intro"[..], &b".wide"[..], &b"data-x"[..]]);
//! assert_eq!(records[2].value(line), b"a b");
//! ```

use crate::closure::find_closure;
use crate::tables::{is_punct, is_space};
use crate::text::{is_blank, is_escaped_punctuation, trim_left_space_length};
use log::trace;
use markscan_core::AttributeRecord;

/// Parse one attribute token at the start of `bytes`, after optional
/// whitespace.
///
/// `#` and `.` tokens run until whitespace or punctuation other than `_` and
/// `-`; the record's name and value both cover the whole token. Anything
/// else is parsed as an HTML-style `name=value` attribute with
/// [`find_html_attribute_index`].
///
/// Returns the record together with the number of bytes to skip after the
/// value end (1 for a closing quote).
pub fn find_attribute_index(bytes: &[u8], can_escape_quotes: bool) -> Option<(AttributeRecord, usize)> {
    let start = trim_left_space_length(bytes);
    let marker = *bytes.get(start)?;
    if marker != b'#' && marker != b'.' {
        return find_html_attribute_index(bytes, can_escape_quotes);
    }
    let end = start
        + 1
        + bytes[start + 1..]
            .iter()
            .take_while(|&&c| !is_space(c) && (!is_punct(c) || c == b'_' || c == b'-'))
            .count();
    Some((AttributeRecord::boolean(start, end), 0))
}

/// Parse a `name=value` attribute at the start of `bytes`, after optional
/// whitespace.
///
/// The name matches `[A-Za-z_:][A-Za-z0-9_:.-]*`; whitespace may surround
/// `=`. Quoted values exclude their quotes. With `can_escape_quotes` the
/// closing quote is found with [`find_closure`], so `\"` does not end the
/// value; otherwise the first matching quote does and an empty quoted value
/// is rejected. Bare values stop at a backslash, a quote, `=`, `<`, `>`, a
/// backtick, a brace or any byte `<= 0x20`, and must not be empty.
pub fn find_html_attribute_index(
    bytes: &[u8],
    can_escape_quotes: bool,
) -> Option<(AttributeRecord, usize)> {
    let len = bytes.len();
    let mut i = trim_left_space_length(bytes);
    let first = *bytes.get(i)?;
    if !(first.is_ascii_alphabetic() || first == b'_' || first == b':') {
        return None;
    }
    let name_start = i;
    while i < len && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name_end = i;

    i += trim_left_space_length(&bytes[i..]);
    if bytes.get(i) != Some(&b'=') {
        return None;
    }
    i += 1;
    i += trim_left_space_length(&bytes[i..]);
    let quote = *bytes.get(i)?;

    if quote == b'"' || quote == b'\'' {
        let value_start = i + 1;
        let value_end = if can_escape_quotes {
            value_start + find_closure(&bytes[value_start..], quote, quote, false, false)?
        } else {
            let pos = bytes[value_start..].iter().position(|&c| c == quote)?;
            if pos == 0 {
                return None;
            }
            value_start + pos
        };
        return Some((
            AttributeRecord::new(name_start, name_end, value_start, value_end),
            1,
        ));
    }

    let value_start = i;
    while i < len && !is_bare_value_stop(bytes[i]) {
        i += 1;
    }
    if i == value_start {
        return None;
    }
    Some((AttributeRecord::new(name_start, name_end, value_start, i), 0))
}

/// Find the attribute block that ends `bytes` and parse its tokens.
///
/// Candidate blocks start at each unescaped `{`. From a candidate, tokens are
/// parsed one after another; the candidate is accepted when the scan stops
/// exactly on a `}` followed only by whitespace up to the end of `bytes`. A rejected candidate drops its tokens and the
/// search resumes after the last token it parsed.
///
/// Returns `None` when no candidate is accepted, and an empty list for `{}`.
pub fn find_attribute_indices_reverse(
    bytes: &[u8],
    can_escape_quotes: bool,
) -> Option<Vec<AttributeRecord>> {
    let len = bytes.len();
    let mut i = 0;
    loop {
        let open = next_unescaped_brace(bytes, i)?;
        let mut pos = open + 1;
        i = pos;
        let mut records = Vec::new();

        while pos < len {
            let Some((record, skip)) = find_attribute_index(&bytes[pos..], can_escape_quotes) else {
                break;
            };
            i = pos + record.value_end;
            records.push(record.shifted(pos));
            pos += record.value_end + skip;
        }

        if bytes.get(pos) == Some(&b'}') && is_blank(&bytes[pos + 1..]) {
            return Some(records);
        }
        trace!(
            "attribute block at {} rejected after {} token(s), retrying from {}",
            open,
            records.len(),
            i
        );
    }
}

/// Offset of the first `{` at or after `from` that is not backslash-escaped.
fn next_unescaped_brace(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        if is_escaped_punctuation(bytes, i) {
            i += 2;
            continue;
        }
        if bytes[i] == b'{' {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn is_name_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'_' | b':' | b'.' | b'-')
}

fn is_bare_value_stop(c: u8) -> bool {
    c <= 0x20 || matches!(c, b'\\' | b'"' | b'\'' | b'=' | b'<' | b'>' | b'`' | b'{' | b'}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(bytes: &[u8], records: &[AttributeRecord]) -> Vec<(String, String)> {
        records
            .iter()
            .map(|r| {
                (
                    String::from_utf8_lossy(r.name(bytes)).into_owned(),
                    String::from_utf8_lossy(r.value(bytes)).into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn test_id_and_class_tokens() {
        let (record, skip) = find_attribute_index(b"  #main-title rest", false).unwrap();
        assert_eq!(record, AttributeRecord::boolean(2, 13));
        assert_eq!(skip, 0);

        let (record, _) = find_attribute_index(b".a_b}", false).unwrap();
        assert_eq!(record, AttributeRecord::boolean(0, 4));
    }

    #[test]
    fn test_bare_marker() {
        let (record, _) = find_attribute_index(b"#", false).unwrap();
        assert_eq!(record, AttributeRecord::boolean(0, 1));
    }

    #[test]
    fn test_named_attribute_forms() {
        let input = b"key=value";
        let (record, skip) = find_attribute_index(input, false).unwrap();
        assert_eq!(record, AttributeRecord::new(0, 3, 4, 9));
        assert_eq!(skip, 0);

        let input = b" data-x = 'one two' ";
        let (record, skip) = find_attribute_index(input, false).unwrap();
        assert_eq!(record.name(input), b"data-x");
        assert_eq!(record.value(input), b"one two");
        assert_eq!(skip, 1);

        let input = br#"_:a.b-c="x""#;
        let (record, _) = find_html_attribute_index(input, false).unwrap();
        assert_eq!(record.name(input), b"_:a.b-c");
        assert_eq!(record.value(input), b"x");
    }

    #[test]
    fn test_named_attribute_failures() {
        assert!(find_html_attribute_index(b"", false).is_none());
        assert!(find_html_attribute_index(b"   ", false).is_none());
        assert!(find_html_attribute_index(b"9key=v", false).is_none());
        assert!(find_html_attribute_index(b"key", false).is_none());
        assert!(find_html_attribute_index(b"key value", false).is_none());
        assert!(find_html_attribute_index(b"key=", false).is_none());
        assert!(find_html_attribute_index(b"key= ", false).is_none());
        assert!(find_html_attribute_index(b"key=}", false).is_none());
        assert!(find_html_attribute_index(br#"key="""#, false).is_none());
        assert!(find_html_attribute_index(br#"key="open"#, false).is_none());
        assert!(find_html_attribute_index(b"key='open", true).is_none());
    }

    #[test]
    fn test_bare_value_stops() {
        for stop in [b'\\', b'"', b'\'', b'=', b'<', b'>', b'`', b'{', b'}', b' ', b'\t', 0x01] {
            let mut input = b"k=ab".to_vec();
            input.push(stop);
            input.extend_from_slice(b"cd");
            let (record, _) = find_html_attribute_index(&input, false).unwrap();
            assert_eq!(record.value(&input), b"ab", "stop byte {stop:#x}");
        }
    }

    #[test]
    fn test_escaped_quotes() {
        let input = br#"title="say \"hi\"" x"#;
        let (record, skip) = find_html_attribute_index(input, true).unwrap();
        assert_eq!(record.value(input), br#"say \"hi\""#);
        assert_eq!(skip, 1);

        let (record, _) = find_html_attribute_index(input, false).unwrap();
        assert_eq!(record.value(input), br"say \");

        // an empty quoted value is accepted only in escape-aware mode
        let (record, _) = find_html_attribute_index(br#"k="""#, true).unwrap();
        assert_eq!(record.value_start, record.value_end);
    }

    #[test]
    fn test_block_with_all_token_kinds() {
        let input = br#"{#id .cls key="v a"}"#;
        let records = find_attribute_indices_reverse(input, false).unwrap();
        assert_eq!(
            pairs(input, &records),
            vec![
                ("#id".to_string(), "#id".to_string()),
                (".cls".to_string(), ".cls".to_string()),
                ("key".to_string(), "v a".to_string()),
            ]
        );
        assert!(records[0].is_boolean(input));
        assert!(records[1].is_boolean(input));
        assert!(!records[2].is_boolean(input));
    }

    #[test]
    fn test_block_after_text() {
        let input = b"Title {.a}  \n";
        let records = find_attribute_indices_reverse(input, false).unwrap();
        assert_eq!(pairs(input, &records), vec![(".a".to_string(), ".a".to_string())]);
    }

    #[test]
    fn test_block_rejects_space_before_close() {
        assert_eq!(find_attribute_indices_reverse(b"{#id }", false), None);
        assert_eq!(find_attribute_indices_reverse(b"T {.a key=v  }", false), None);
        assert_eq!(find_attribute_indices_reverse(br#"{k="v" }"#, false), None);

        // leading whitespace inside the block is still skipped
        let records = find_attribute_indices_reverse(b"{ #id}", false).unwrap();
        assert_eq!(records, vec![AttributeRecord::boolean(2, 5)]);
    }

    #[test]
    fn test_space_before_close_retries_next_block() {
        let input = b"{#no } {#yes}";
        let records = find_attribute_indices_reverse(input, false).unwrap();
        assert_eq!(pairs(input, &records), vec![("#yes".to_string(), "#yes".to_string())]);
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(find_attribute_indices_reverse(b"x {}", false), Some(vec![]));
    }

    #[test]
    fn test_retries_from_next_brace() {
        let input = b"a {not valid} b {#ok}";
        let records = find_attribute_indices_reverse(input, false).unwrap();
        assert_eq!(pairs(input, &records), vec![("#ok".to_string(), "#ok".to_string())]);
    }

    #[test]
    fn test_retries_when_block_not_trailing() {
        let input = b"{#first} tail {#last}";
        let records = find_attribute_indices_reverse(input, false).unwrap();
        assert_eq!(pairs(input, &records), vec![("#last".to_string(), "#last".to_string())]);
    }

    #[test]
    fn test_escaped_brace_skipped() {
        let input = br"\{#no} {#yes}";
        let records = find_attribute_indices_reverse(input, false).unwrap();
        assert_eq!(pairs(input, &records), vec![("#yes".to_string(), "#yes".to_string())]);

        assert_eq!(find_attribute_indices_reverse(br"text \{#no}", false), None);
    }

    #[test]
    fn test_no_block() {
        assert_eq!(find_attribute_indices_reverse(b"", false), None);
        assert_eq!(find_attribute_indices_reverse(b"plain text", false), None);
        assert_eq!(find_attribute_indices_reverse(b"{#open", false), None);
        assert_eq!(find_attribute_indices_reverse(b"{#id} trailing", false), None);
        assert_eq!(find_attribute_indices_reverse(b"{", false), None);
    }
}
