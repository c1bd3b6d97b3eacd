//! Bare URL and email detection for autolinking.

use crate::tables::{is_email_local, url_flags, URL_ALPHA, URL_PATH, URL_SCHEME};
use regex::bytes::Regex;
use std::sync::LazyLock;

/// Longest accepted URL scheme, first letter included.
const MAX_SCHEME_LEN: usize = 32;

/// Regex for an email domain: dot-separated labels of 1-63 alphanumerics and
/// inner hyphens
static EMAIL_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*",
    )
    .unwrap()
});

/// Find the end of a bare URL at the start of `bytes`.
///
/// Matches `[A-Za-z][A-Za-z0-9.+-]{1,31}:[^<>\x00-\x20]*` and returns the
/// offset just past the last path byte.
///
/// ```
/// use markscan_scan::autolink::find_url_index;
///
/// assert_eq!(find_url_index(b"http://example.com/path>"), Some(23));
/// assert_eq!(find_url_index(b"ab:cd"), Some(5));
/// assert_eq!(find_url_index(b"a:b"), None);
/// ```
pub fn find_url_index(bytes: &[u8]) -> Option<usize> {
    let first = *bytes.first()?;
    if url_flags(first) & (URL_ALPHA | URL_SCHEME) != URL_ALPHA | URL_SCHEME {
        return None;
    }
    let scheme_len = 1 + bytes[1..]
        .iter()
        .take_while(|&&c| url_flags(c) & URL_SCHEME != 0)
        .count();
    if !(2..=MAX_SCHEME_LEN).contains(&scheme_len) || bytes.get(scheme_len) != Some(&b':') {
        return None;
    }
    let path_start = scheme_len + 1;
    let path_len = bytes[path_start..]
        .iter()
        .take_while(|&&c| url_flags(c) & URL_PATH != 0)
        .count();
    Some(path_start + path_len)
}

/// Find the end of a bare email address at the start of `bytes`.
///
/// The local part is the maximal run of allowed bytes and must be followed
/// by `@` and at least one domain label. Returns the offset just past the
/// last domain byte matched.
///
/// ```
/// use markscan_scan::autolink::find_email_index;
///
/// assert_eq!(find_email_index(b"user@sub.example.com"), Some(20));
/// assert_eq!(find_email_index(b"user@-bad-.com"), None);
/// ```
pub fn find_email_index(bytes: &[u8]) -> Option<usize> {
    let local = bytes.iter().take_while(|&&c| is_email_local(c)).count();
    if local == 0 || bytes.get(local) != Some(&b'@') {
        return None;
    }
    let domain = local + 1;
    let matched = EMAIL_DOMAIN_RE.find(&bytes[domain..])?;
    Some(domain + matched.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_stops_at_angle_bracket() {
        let input = b"http://example.com/path>";
        assert_eq!(find_url_index(input), Some(input.len() - 1));
        assert_eq!(find_url_index(b"<http://x>"), None);
    }

    #[test]
    fn test_url_stops_at_whitespace_and_controls() {
        assert_eq!(find_url_index(b"https://a.b/c d"), Some(13));
        assert_eq!(find_url_index(b"mailto:x\ny"), Some(8));
        assert_eq!(find_url_index(b"irc:chan\x00"), Some(8));
    }

    #[test]
    fn test_url_scheme_length() {
        assert_eq!(find_url_index(b"ab:cd"), Some(5));
        assert_eq!(find_url_index(b"a:cd"), None);

        let mut max = vec![b'a'; MAX_SCHEME_LEN];
        max.extend_from_slice(b":x");
        assert_eq!(find_url_index(&max), Some(MAX_SCHEME_LEN + 2));

        let mut long = vec![b'a'; MAX_SCHEME_LEN + 1];
        long.extend_from_slice(b":x");
        assert_eq!(find_url_index(&long), None);
    }

    #[test]
    fn test_url_scheme_characters() {
        assert_eq!(find_url_index(b"svn+ssh:host"), Some(12));
        assert_eq!(find_url_index(b"x-a.b:"), Some(6));
        assert_eq!(find_url_index(b"1http://x"), None);
        assert_eq!(find_url_index(b"+a:x"), None);
        assert_eq!(find_url_index(b"ht_tp://x"), None);
    }

    #[test]
    fn test_url_needs_colon() {
        assert_eq!(find_url_index(b""), None);
        assert_eq!(find_url_index(b"http"), None);
        assert_eq!(find_url_index(b"http//x"), None);
    }

    #[test]
    fn test_url_empty_path() {
        assert_eq!(find_url_index(b"ab:"), Some(3));
        assert_eq!(find_url_index(b"ab: x"), Some(3));
    }

    #[test]
    fn test_url_keeps_non_ascii_path() {
        let input = "http://例え.jp/ä x".as_bytes();
        let end = find_url_index(input).unwrap();
        assert_eq!(&input[end..], b" x");
    }

    #[test]
    fn test_email_basic() {
        assert_eq!(find_email_index(b"user@sub.example.com"), Some(20));
        assert_eq!(find_email_index(b"a.b+tag@example.org more"), Some(19));
    }

    #[test]
    fn test_email_stops_before_trailing_dot() {
        assert_eq!(find_email_index(b"me@example.com."), Some(14));
        assert_eq!(find_email_index(b"me@example.com>"), Some(14));
    }

    #[test]
    fn test_email_rejects_bad_domain() {
        assert_eq!(find_email_index(b"user@-bad-.com"), None);
        assert_eq!(find_email_index(b"user@"), None);
        assert_eq!(find_email_index(b"user@.com"), None);
    }

    #[test]
    fn test_email_hyphen_labels() {
        assert_eq!(find_email_index(b"x@a-b.c"), Some(7));
        // a trailing hyphen is left out of the match
        assert_eq!(find_email_index(b"x@ab-"), Some(4));
    }

    #[test]
    fn test_email_label_length() {
        let label = "a".repeat(63);
        let input = format!("x@{label}.com");
        assert_eq!(find_email_index(input.as_bytes()), Some(input.len()));

        let long = format!("x@{}", "b".repeat(64));
        assert_eq!(find_email_index(long.as_bytes()), Some(2 + 63));
    }

    #[test]
    fn test_email_needs_local_part_and_at() {
        assert_eq!(find_email_index(b"@example.com"), None);
        assert_eq!(find_email_index(b"user example.com"), None);
        assert_eq!(find_email_index(b""), None);
        assert_eq!(find_email_index(b"us(er@example.com"), None);
    }
}
