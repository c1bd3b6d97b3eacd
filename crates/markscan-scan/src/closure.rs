//! Matching closing delimiters.

use crate::tables::is_punct;

/// Find the closer that balances an opener already consumed before `bytes`.
///
/// The scan starts with one open delimiter. Backslash-escaped punctuation is
/// skipped as a pair. When `code_span` is set, backtick runs open and close
/// code spans (a span closes only on a run of the same length) and no
/// delimiter inside a span is counted. An `opener` outside a span fails the
/// match unless `allow_nesting` is set, in which case it must be closed
/// before the outer one.
///
/// Returns the offset of the closer within `bytes`, or `None`.
///
/// # Example
///
/// ```
/// use markscan_scan::closure::find_closure;
///
/// // "(a(b)c)d" with the first '(' already consumed
/// assert_eq!(find_closure(b"a(b)c)d", b'(', b')', false, true), Some(5));
/// assert_eq!(find_closure(b"a(b)c)d", b'(', b')', false, false), None);
/// assert_eq!(find_closure(b"`a)b`)", b'(', b')', true, true), Some(5));
/// ```
pub fn find_closure(
    bytes: &[u8],
    opener: u8,
    closer: u8,
    code_span: bool,
    allow_nesting: bool,
) -> Option<usize> {
    let len = bytes.len();
    let mut i = 0;
    let mut opened = 1usize;
    // Length of the backtick run that opened the current code span, 0 if none.
    let mut span_opener = 0usize;

    while i < len {
        let c = bytes[i];
        if code_span && span_opener != 0 && c == b'`' {
            let run = backtick_run(&bytes[i..]);
            if run == span_opener {
                span_opener = 0;
            }
            i += run;
            continue;
        }
        if c == b'\\' && i + 1 < len && is_punct(bytes[i + 1]) {
            i += 2;
            continue;
        }
        if code_span && span_opener == 0 && c == b'`' {
            span_opener = backtick_run(&bytes[i..]);
            i += span_opener;
            continue;
        }
        if span_opener == 0 {
            if c == closer {
                opened -= 1;
                if opened == 0 {
                    return Some(i);
                }
            } else if c == opener {
                if !allow_nesting {
                    return None;
                }
                opened += 1;
            }
        }
        i += 1;
    }
    None
}

fn backtick_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&c| c == b'`').count()
}
