//! Named character reference lookup.
//!
//! Resolving `&name;` needs a table from entity names to their expansion.
//! The full HTML5 table belongs to the pipeline that embeds markscan, so the
//! resolver only depends on the [`EntityLookup`] trait. [`BuiltinEntities`]
//! covers the common entities and is what the convenience functions use.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Maps a bare entity name (`amp`, no `&` or `;`) to its expansion.
///
/// A `None` answer leaves the reference in the text as written.
pub trait EntityLookup {
    fn lookup(&self, name: &str) -> Option<&str>;
}

/// Common HTML entities mapping
static HTML_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    // Markup-significant
    m.insert("amp", "&");
    m.insert("lt", "<");
    m.insert("gt", ">");
    m.insert("quot", "\"");
    m.insert("apos", "'");
    // Spaces and dashes
    m.insert("nbsp", "\u{a0}");
    m.insert("ensp", "\u{2002}");
    m.insert("emsp", "\u{2003}");
    m.insert("thinsp", "\u{2009}");
    m.insert("zwnj", "\u{200c}");
    m.insert("zwj", "\u{200d}");
    m.insert("shy", "\u{ad}");
    m.insert("mdash", "—");
    m.insert("ndash", "–");
    m.insert("hellip", "…");
    // Quotes
    m.insert("lsquo", "‘");
    m.insert("rsquo", "’");
    m.insert("ldquo", "“");
    m.insert("rdquo", "”");
    m.insert("laquo", "«");
    m.insert("raquo", "»");
    // Copyright, trademark, registered
    m.insert("copy", "©");
    m.insert("trade", "™");
    m.insert("reg", "®");
    // Arrows
    m.insert("larr", "←");
    m.insert("rarr", "→");
    m.insert("uarr", "↑");
    m.insert("darr", "↓");
    m.insert("harr", "↔");
    // Math
    m.insert("times", "×");
    m.insert("divide", "÷");
    m.insert("plusmn", "±");
    m.insert("minus", "−");
    m.insert("ne", "≠");
    m.insert("le", "≤");
    m.insert("ge", "≥");
    m.insert("infin", "∞");
    m.insert("frac12", "½");
    m.insert("frac14", "¼");
    m.insert("frac34", "¾");
    // Currency
    m.insert("euro", "€");
    m.insert("pound", "£");
    m.insert("yen", "¥");
    m.insert("cent", "¢");
    // Latin letters
    m.insert("auml", "ä");
    m.insert("ouml", "ö");
    m.insert("uuml", "ü");
    m.insert("Auml", "Ä");
    m.insert("Ouml", "Ö");
    m.insert("Uuml", "Ü");
    m.insert("szlig", "ß");
    m.insert("eacute", "é");
    m.insert("egrave", "è");
    m.insert("aacute", "á");
    m.insert("ntilde", "ñ");
    m.insert("ccedil", "ç");
    // Other common
    m.insert("deg", "°");
    m.insert("para", "¶");
    m.insert("sect", "§");
    m.insert("bull", "•");
    m.insert("middot", "·");
    m.insert("dagger", "†");
    m.insert("Dagger", "‡");
    m.insert("permil", "‰");
    m.insert("prime", "′");
    m.insert("Prime", "″");
    m
});

/// The built-in table of common HTML entities.
///
/// ```
/// use markscan_scan::entities::{BuiltinEntities, EntityLookup};
///
/// assert_eq!(BuiltinEntities.lookup("copy"), Some("©"));
/// assert_eq!(BuiltinEntities.lookup("nosuch"), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEntities;

impl EntityLookup for BuiltinEntities {
    fn lookup(&self, name: &str) -> Option<&str> {
        HTML_ENTITIES.get(name).copied()
    }
}

impl EntityLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl EntityLookup for HashMap<&str, &str> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

impl<T: EntityLookup + ?Sized> EntityLookup for &T {
    fn lookup(&self, name: &str) -> Option<&str> {
        (**self).lookup(name)
    }
}
