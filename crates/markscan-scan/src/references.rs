//! Escaping and unescaping passes: backslash escapes, numeric and named
//! character references, HTML text escaping, and URL percent-encoding.
//!
//! Every pass writes through a [`CopyOnWriteBuffer`] and returns
//! `Cow::Borrowed` when the input needed no change, so callers must not
//! assume a fresh allocation.

use crate::buffer::CopyOnWriteBuffer;
use crate::entities::{BuiltinEntities, EntityLookup};
use crate::tables::{
    escape_html_byte, is_alpha_numeric, is_hex_decimal, is_numeric, is_punct, is_url_safe,
    utf8_len,
};
use crate::text::{read_while, to_valid_rune};
use log::trace;
use std::borrow::Cow;

/// Longest decimal numeric reference, in digits.
const MAX_DECIMAL_DIGITS: usize = 7;

static HEX_CHARS: &[u8] = b"0123456789ABCDEF";
static SPACE_ESCAPE: &[u8] = b"%20";

/// Escape `"`, `&`, `<` and `>` for HTML text.
///
/// ```
/// use markscan_scan::references::escape_html;
///
/// assert_eq!(&*escape_html(b"a < b & \"c\""), b"a &lt; b &amp; &quot;c&quot;");
/// ```
pub fn escape_html(v: &[u8]) -> Cow<'_, [u8]> {
    let mut cob = CopyOnWriteBuffer::new(v);
    let mut n = 0;
    for (i, &c) in v.iter().enumerate() {
        if let Some(escaped) = escape_html_byte(c) {
            cob.write(&v[n..i]);
            cob.write(escaped);
            n = i + 1;
        }
    }
    if cob.is_copied() {
        cob.write(&v[n..]);
    }
    cob.into_cow()
}

/// Replace every backslash-escaped punctuation pair with the punctuation.
///
/// ```
/// use markscan_scan::references::unescape_punctuations;
///
/// assert_eq!(&*unescape_punctuations(br"\*not\* \a"), br"*not* \a");
/// ```
pub fn unescape_punctuations(source: &[u8]) -> Cow<'_, [u8]> {
    let mut cob = CopyOnWriteBuffer::new(source);
    let limit = source.len();
    let mut n = 0;
    let mut i = 0;
    while i < limit {
        if source[i] == b'\\' && i + 1 < limit && is_punct(source[i + 1]) {
            cob.write(&source[n..i]);
            cob.write_byte(source[i + 1]);
            i += 2;
            n = i;
            continue;
        }
        i += 1;
    }
    if cob.is_copied() {
        cob.write(&source[n..]);
    }
    cob.into_cow()
}

/// Resolve `&#NNN;` and `&#xHHH;` references.
///
/// Decimal references take 1 to 7 digits; hexadecimal ones any number of
/// digits, with values beyond `u32` treated as invalid. Zero and values that
/// are not Unicode scalar values decode to U+FFFD. Anything else that starts
/// with `&` is left as written.
///
/// ```
/// use markscan_scan::references::resolve_numeric_references;
///
/// assert_eq!(&*resolve_numeric_references(b"&#65;&#x42;&#0;"), "AB\u{fffd}".as_bytes());
/// assert_eq!(&*resolve_numeric_references(b"&#12345678;"), b"&#12345678;");
/// ```
pub fn resolve_numeric_references(source: &[u8]) -> Cow<'_, [u8]> {
    let mut cob = CopyOnWriteBuffer::new(source);
    let mut buf = [0u8; 4];
    let limit = source.len();
    let mut n = 0;
    let mut i = 0;
    while i < limit {
        if source[i] != b'&' || source.get(i + 1) != Some(&b'#') {
            i += 1;
            continue;
        }
        let pos = i;
        if let Some((value, end)) = numeric_reference(source, i + 2) {
            cob.write(&source[n..pos]);
            cob.write(to_valid_rune(value).encode_utf8(&mut buf).as_bytes());
            i = end + 1;
            n = i;
            continue;
        }
        i = pos + 1;
    }
    if cob.is_copied() {
        cob.write(&source[n..]);
    }
    cob.into_cow()
}

/// Parse the body of a numeric reference starting right after `&#`.
///
/// Returns the code point (`u32::MAX` on hexadecimal overflow) and the
/// offset of the terminating `;`.
fn numeric_reference(source: &[u8], start: usize) -> Option<(u32, usize)> {
    let limit = source.len();
    match *source.get(start)? {
        b'x' | b'X' => {
            let digits = start + 1;
            let (end, ok) = read_while(source, digits..limit, is_hex_decimal);
            if !ok || source.get(end) != Some(&b';') {
                return None;
            }
            let value = std::str::from_utf8(&source[digits..end])
                .ok()
                .and_then(|s| u32::from_str_radix(s, 16).ok())
                .unwrap_or(u32::MAX);
            Some((value, end))
        }
        b'0'..=b'9' => {
            let (end, _) = read_while(source, start..limit, is_numeric);
            if end - start > MAX_DECIMAL_DIGITS || source.get(end) != Some(&b';') {
                return None;
            }
            let value = source[start..end]
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
            Some((value, end))
        }
        _ => None,
    }
}

/// Resolve `&name;` references against the built-in entity table.
///
/// ```
/// use markscan_scan::references::resolve_entity_names;
///
/// assert_eq!(&*resolve_entity_names(b"&copy; &bogus; &amp"), "© &bogus; &amp".as_bytes());
/// ```
pub fn resolve_entity_names(source: &[u8]) -> Cow<'_, [u8]> {
    resolve_entity_names_with(source, &BuiltinEntities)
}

/// Resolve `&name;` references against `entities`.
///
/// The name is the maximal run of ASCII alphanumerics after `&`; it must be
/// followed by `;` and known to `entities`, otherwise the text is kept.
pub fn resolve_entity_names_with<'a, E>(source: &'a [u8], entities: &E) -> Cow<'a, [u8]>
where
    E: EntityLookup + ?Sized,
{
    let mut cob = CopyOnWriteBuffer::new(source);
    let limit = source.len();
    let mut n = 0;
    let mut i = 0;
    while i < limit {
        if source[i] != b'&' || source.get(i + 1) == Some(&b'#') {
            i += 1;
            continue;
        }
        let pos = i;
        let start = i + 1;
        let (end, ok) = read_while(source, start..limit, is_alpha_numeric);
        if ok && source.get(end) == Some(&b';') {
            let expansion = std::str::from_utf8(&source[start..end])
                .ok()
                .and_then(|name| entities.lookup(name));
            if let Some(expansion) = expansion {
                cob.write(&source[n..pos]);
                cob.write(expansion.as_bytes());
                i = end + 1;
                n = i;
                continue;
            }
        }
        i = pos + 1;
    }
    if cob.is_copied() {
        cob.write(&source[n..]);
    }
    cob.into_cow()
}

/// Percent-encode a URL for an `href`/`src` attribute.
///
/// With `resolve_reference`, backslash escapes, numeric references and
/// named references (built-in table) are resolved first, in that order.
/// Already percent-encoded triplets are kept, a space becomes `%20`, and
/// bytes that cannot start a UTF-8 sequence are passed through untouched.
///
/// ```
/// use markscan_scan::references::url_escape;
///
/// assert_eq!(&*url_escape(b"http://a.com/x y%41", true), b"http://a.com/x%20y%41");
/// assert_eq!(&*url_escape("/caf\u{e9}".as_bytes(), false), b"/caf%C3%A9");
/// ```
pub fn url_escape(v: &[u8], resolve_reference: bool) -> Cow<'_, [u8]> {
    url_escape_with(v, resolve_reference, &BuiltinEntities)
}

/// [`url_escape`] resolving named references against `entities`.
pub fn url_escape_with<'a, E>(v: &'a [u8], resolve_reference: bool, entities: &E) -> Cow<'a, [u8]>
where
    E: EntityLookup + ?Sized,
{
    if !resolve_reference {
        return percent_encode(v);
    }
    let v = unescape_punctuations(v);
    let v = then(v, resolve_numeric_references);
    let v = then(v, |s| resolve_entity_names_with(s, entities));
    then(v, percent_encode)
}

/// Apply a pass to the output of a previous one, keeping the borrow when
/// neither pass changed anything.
fn then<'a, F>(prev: Cow<'a, [u8]>, pass: F) -> Cow<'a, [u8]>
where
    F: for<'b> Fn(&'b [u8]) -> Cow<'b, [u8]>,
{
    match prev {
        Cow::Borrowed(bytes) => pass(bytes),
        Cow::Owned(bytes) => {
            let changed = match pass(bytes.as_slice()) {
                Cow::Owned(next) => Some(next),
                Cow::Borrowed(_) => None,
            };
            Cow::Owned(changed.unwrap_or(bytes))
        }
    }
}

fn percent_encode(v: &[u8]) -> Cow<'_, [u8]> {
    let mut cob = CopyOnWriteBuffer::new(v);
    let limit = v.len();
    let mut n = 0;
    let mut i = 0;
    while i < limit {
        let c = v[i];
        if is_url_safe(c) {
            i += 1;
            continue;
        }
        if c == b'%' && i + 2 < limit && is_hex_decimal(v[i + 1]) && is_hex_decimal(v[i + 2]) {
            i += 3;
            continue;
        }
        let Some(len) = utf8_len(c) else {
            trace!("skipping invalid UTF-8 lead byte {:#04x} at {}", c, i);
            i += 1;
            continue;
        };
        cob.write(&v[n..i]);
        if c == b' ' {
            cob.write(SPACE_ESCAPE);
            i += 1;
            n = i;
            continue;
        }
        // a sequence ends early at the first byte that is not a continuation
        let end = i
            + 1
            + v[i + 1..(i + len).min(limit)]
                .iter()
                .take_while(|&&b| b & 0xc0 == 0x80)
                .count();
        for &b in &v[i..end] {
            cob.write(&[
                b'%',
                HEX_CHARS[usize::from(b >> 4)],
                HEX_CHARS[usize::from(b & 0xf)],
            ]);
        }
        i = end;
        n = i;
    }
    if cob.is_copied() {
        cob.write(&v[n..]);
    }
    cob.into_cow()
}
