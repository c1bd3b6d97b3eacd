//! Byte classification tables.
//!
//! Every predicate here is a single index into a 256-entry table built at
//! compile time, so the scanners can classify bytes without branching on
//! ranges.

/// Path byte of a bare URL: anything but controls `<= 0x20`, `<` and `>`.
pub const URL_PATH: u8 = 1;
/// ASCII letter, valid as the first byte of a URL scheme.
pub const URL_ALPHA: u8 = 2;
/// Scheme byte: letters, digits, `+`, `-`, `.`.
pub const URL_SCHEME: u8 = 4;

/// Slack added to the source length when a copy-on-write buffer first allocates.
pub(crate) const COPY_SLACK: usize = 20;

const fn mark(mut table: [u8; 256], bytes: &[u8], flag: u8) -> [u8; 256] {
    let mut i = 0;
    while i < bytes.len() {
        table[bytes[i] as usize] |= flag;
        i += 1;
    }
    table
}

const fn mark_range(mut table: [u8; 256], from: u8, to: u8, flag: u8) -> [u8; 256] {
    let mut i = from as usize;
    while i <= to as usize {
        table[i] |= flag;
        i += 1;
    }
    table
}

const fn create_space_table() -> [u8; 256] {
    mark([0; 256], b" \t\n\x0b\x0c\r", 1)
}

const fn create_punct_table() -> [u8; 256] {
    mark([0; 256], b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~", 1)
}

const fn create_url_table() -> [u8; 256] {
    let mut table = mark_range([0; 256], 0x21, 0xff, URL_PATH);
    table[b'<' as usize] = 0;
    table[b'>' as usize] = 0;
    let table = mark_range(table, b'a', b'z', URL_ALPHA | URL_SCHEME);
    let table = mark_range(table, b'A', b'Z', URL_ALPHA | URL_SCHEME);
    let table = mark_range(table, b'0', b'9', URL_SCHEME);
    mark(table, b"+-.", URL_SCHEME)
}

const fn create_url_safe_table() -> [u8; 256] {
    let table = mark_range([0; 256], b'a', b'z', 1);
    let table = mark_range(table, b'A', b'Z', 1);
    let table = mark_range(table, b'0', b'9', 1);
    mark(table, b"!#$&'()*+,-./:;=?@_~", 1)
}

const fn create_email_table() -> [u8; 256] {
    let table = mark_range([0; 256], b'a', b'z', 1);
    let table = mark_range(table, b'A', b'Z', 1);
    let table = mark_range(table, b'0', b'9', 1);
    mark(table, b"!#$%&'*+-./=?^_`{|}~", 1)
}

const fn create_utf8_len_table() -> [u8; 256] {
    let table = mark_range([0; 256], 0x00, 0x7f, 1);
    let table = mark_range(table, 0xc2, 0xdf, 2);
    let table = mark_range(table, 0xe0, 0xef, 3);
    mark_range(table, 0xf0, 0xf7, 4)
}

const fn create_html_escape_table() -> [u8; 256] {
    let mut table = [0; 256];
    table[b'"' as usize] = 1;
    table[b'&' as usize] = 2;
    table[b'<' as usize] = 3;
    table[b'>' as usize] = 4;
    table
}

static SPACE_TABLE: [u8; 256] = create_space_table();
static PUNCT_TABLE: [u8; 256] = create_punct_table();
static URL_TABLE: [u8; 256] = create_url_table();
static URL_SAFE_TABLE: [u8; 256] = create_url_safe_table();
static EMAIL_TABLE: [u8; 256] = create_email_table();
static UTF8_LEN_TABLE: [u8; 256] = create_utf8_len_table();
static HTML_ESCAPE_TABLE: [u8; 256] = create_html_escape_table();

static HTML_ESCAPES: [&[u8]; 5] = [b"", b"&quot;", b"&amp;", b"&lt;", b"&gt;"];

/// Whitespace: space, tab, newline, carriage return, vertical tab, form feed.
#[inline]
pub fn is_space(c: u8) -> bool {
    SPACE_TABLE[c as usize] == 1
}

/// ASCII punctuation that a backslash can escape.
#[inline]
pub fn is_punct(c: u8) -> bool {
    PUNCT_TABLE[c as usize] == 1
}

#[inline]
pub fn is_numeric(c: u8) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub fn is_hex_decimal(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

#[inline]
pub fn is_alpha_numeric(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

/// Byte length of the UTF-8 sequence introduced by `lead`.
///
/// Returns `None` for continuation bytes and bytes that can never start a
/// sequence (`0xC0`, `0xC1`, `0xF8..=0xFF`).
///
/// ```
/// use markscan_scan::tables::utf8_len;
///
/// assert_eq!(utf8_len(b'a'), Some(1));
/// assert_eq!(utf8_len("é".as_bytes()[0]), Some(2));
/// assert_eq!(utf8_len(0x80), None);
/// ```
#[inline]
pub fn utf8_len(lead: u8) -> Option<usize> {
    match UTF8_LEN_TABLE[lead as usize] {
        0 => None,
        n => Some(n as usize),
    }
}

/// URL scanner flags for `c`, a combination of [`URL_PATH`], [`URL_ALPHA`]
/// and [`URL_SCHEME`].
#[inline]
pub fn url_flags(c: u8) -> u8 {
    URL_TABLE[c as usize]
}

/// Bytes that URL escaping passes through unchanged.
#[inline]
pub fn is_url_safe(c: u8) -> bool {
    URL_SAFE_TABLE[c as usize] == 1
}

/// Bytes allowed in the local part of a bare email address.
#[inline]
pub fn is_email_local(c: u8) -> bool {
    EMAIL_TABLE[c as usize] == 1
}

/// The entity replacing `c` in HTML text, if it needs one.
#[inline]
pub fn escape_html_byte(c: u8) -> Option<&'static [u8]> {
    match HTML_ESCAPE_TABLE[c as usize] {
        0 => None,
        i => Some(HTML_ESCAPES[i as usize]),
    }
}
