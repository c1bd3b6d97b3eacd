//! Core types for markscan

use crate::error::{MarkscanError, Result};
use serde::{Deserialize, Serialize};

/// A bounded, immutable view over source bytes.
///
/// Scanners receive `window.bytes()` and report offsets relative to
/// [`Window::start`]; [`Window::absolute`] maps them back into the
/// underlying data.
///
/// # Example
///
/// ```
/// use markscan_core::Window;
///
/// let source = b"see (a(b)c) here";
/// let window = Window::new(source, 5, 11).unwrap();
/// assert_eq!(window.bytes(), b"a(b)c)");
/// assert_eq!(window.absolute(5), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    data: &'a [u8],
    start: usize,
    end: usize,
}

impl<'a> Window<'a> {
    /// Create a window over `data[start..end]`.
    ///
    /// Fails when `start > end` or `end > data.len()`.
    pub fn new(data: &'a [u8], start: usize, end: usize) -> Result<Self> {
        if start > end || end > data.len() {
            return Err(MarkscanError::Window {
                start,
                end,
                len: data.len(),
            });
        }
        Ok(Self { data, start, end })
    }

    /// Create a window covering all of `data`.
    pub fn full(data: &'a [u8]) -> Self {
        Self {
            data,
            start: 0,
            end: data.len(),
        }
    }

    /// The underlying source the window was cut from.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The viewed bytes.
    pub fn bytes(&self) -> &'a [u8] {
        &self.data[self.start..self.end]
    }

    /// Start offset within the underlying data.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive) within the underlying data.
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Map an offset relative to this window to an offset into [`Window::data`].
    pub fn absolute(&self, offset: usize) -> usize {
        self.start + offset
    }

    /// Narrow the window to `[from, self.len())`, relative to its current start.
    ///
    /// Returns `None` when `from` is past the end.
    pub fn advance(&self, from: usize) -> Option<Self> {
        if from > self.len() {
            return None;
        }
        Some(Self {
            data: self.data,
            start: self.start + from,
            end: self.end,
        })
    }
}

/// Classification of an attribute token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    /// `#identifier`
    Id,
    /// `.class-name`
    Class,
    /// `name=value`
    Named,
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeKind::Id => write!(f, "id"),
            AttributeKind::Class => write!(f, "class"),
            AttributeKind::Named => write!(f, "named"),
        }
    }
}

/// Offsets of one attribute token within the window it was parsed from.
///
/// For `#id` and `.class` tokens the name covers the whole token, marker
/// included, and the value offsets mirror the name. For `name=value`
/// tokens the value excludes surrounding quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub name_start: usize,
    pub name_end: usize,
    pub value_start: usize,
    pub value_end: usize,
}

impl AttributeRecord {
    /// Create a record from its four offsets.
    pub fn new(name_start: usize, name_end: usize, value_start: usize, value_end: usize) -> Self {
        Self {
            name_start,
            name_end,
            value_start,
            value_end,
        }
    }

    /// Create a record for a `#id` / `.class` token spanning `start..end`.
    pub fn boolean(start: usize, end: usize) -> Self {
        Self::new(start, end, start, end)
    }

    /// The same record with every offset moved forward by `by`.
    pub fn shifted(&self, by: usize) -> Self {
        Self::new(
            self.name_start + by,
            self.name_end + by,
            self.value_start + by,
            self.value_end + by,
        )
    }

    /// Name bytes, sliced from the window the record was produced from.
    pub fn name<'a>(&self, window: &'a [u8]) -> &'a [u8] {
        &window[self.name_start..self.name_end]
    }

    /// Value bytes, sliced from the window the record was produced from.
    pub fn value<'a>(&self, window: &'a [u8]) -> &'a [u8] {
        &window[self.value_start..self.value_end]
    }

    /// Classify the record by the first byte of its name.
    pub fn kind(&self, window: &[u8]) -> AttributeKind {
        match window.get(self.name_start) {
            Some(b'#') => AttributeKind::Id,
            Some(b'.') => AttributeKind::Class,
            _ => AttributeKind::Named,
        }
    }

    /// Whether this is a `#id` / `.class` token.
    pub fn is_boolean(&self, window: &[u8]) -> bool {
        self.kind(window) != AttributeKind::Named
    }
}
