//! Markscan Scan
//!
//! Byte-level scanners used by a Markdown-to-HTML pipeline: delimiter
//! closure, attribute blocks, character references, HTML and URL escaping,
//! and bare URL/email detection.
//!
//! # Overview
//!
//! Every scanner works on a byte slice (usually [`markscan_core::Window::bytes`])
//! and reports offsets relative to it. Nothing here fails: a scan that does
//! not match returns `None`, and a transformation that changes nothing
//! returns the input as `Cow::Borrowed`.
//!
//! # Example
//!
//! ```
//! use markscan_scan::{find_closure, url_escape};
//! use std::borrow::Cow;
//!
//! // offset of the `)` closing a link destination
//! assert_eq!(find_closure(b"a(b)c)d", b'(', b')', false, true), Some(5));
//!
//! assert_eq!(&*url_escape(b"/a b&amp;c", true), b"/a%20b&c");
//! assert!(matches!(url_escape(b"/plain", true), Cow::Borrowed(_)));
//! ```

pub mod attributes;
pub mod autolink;
pub mod buffer;
pub mod closure;
pub mod entities;
pub mod indent;
pub mod references;
pub mod tables;
pub mod text;

pub use attributes::{find_attribute_index, find_attribute_indices_reverse, find_html_attribute_index};
pub use autolink::{find_email_index, find_url_index};
pub use buffer::CopyOnWriteBuffer;
pub use closure::find_closure;
pub use entities::{BuiltinEntities, EntityLookup};
pub use references::{
    escape_html, resolve_entity_names, resolve_entity_names_with, resolve_numeric_references,
    unescape_punctuations, url_escape, url_escape_with,
};
pub use text::to_link_reference;
