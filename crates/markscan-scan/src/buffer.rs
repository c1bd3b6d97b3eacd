//! Copy-on-write output buffer.
//!
//! Most text handed to the escaping passes needs no change at all. The
//! [`CopyOnWriteBuffer`] keeps a borrowed view of the source until the first
//! write and only then allocates, so the unchanged case returns
//! `Cow::Borrowed` without touching the heap.

use crate::tables::COPY_SLACK;
use std::borrow::Cow;

/// Byte buffer that borrows its source until it is first written to.
///
/// The first write allocates an empty buffer with room for the source plus a
/// little slack and copies nothing: callers write the unchanged prefix
/// themselves before the replacement.
///
/// # Example
///
/// ```
/// use markscan_scan::buffer::CopyOnWriteBuffer;
/// use std::borrow::Cow;
///
/// let source = b"a<b";
/// let mut cob = CopyOnWriteBuffer::new(source);
/// assert!(!cob.is_copied());
///
/// cob.write(&source[..1]);
/// cob.write(b"&lt;");
/// cob.write(&source[2..]);
/// assert!(matches!(cob.into_cow(), Cow::Owned(v) if v == b"a&lt;b"));
/// ```
#[derive(Debug, Clone)]
pub struct CopyOnWriteBuffer<'a> {
    source: &'a [u8],
    copied: Option<Vec<u8>>,
}

impl<'a> CopyOnWriteBuffer<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            copied: None,
        }
    }

    fn owned(&mut self) -> &mut Vec<u8> {
        let capacity = self.source.len() + COPY_SLACK;
        self.copied.get_or_insert_with(|| Vec::with_capacity(capacity))
    }

    /// Append bytes, switching to the owned buffer on the first call.
    pub fn write(&mut self, value: &[u8]) {
        self.owned().extend_from_slice(value);
    }

    /// Append one byte, switching to the owned buffer on the first call.
    pub fn write_byte(&mut self, c: u8) {
        self.owned().push(c);
    }

    /// Whether any write has happened.
    pub fn is_copied(&self) -> bool {
        self.copied.is_some()
    }

    /// Current contents: the source if never written, the owned buffer otherwise.
    pub fn bytes(&self) -> &[u8] {
        match &self.copied {
            Some(buf) => buf.as_slice(),
            None => self.source,
        }
    }

    pub fn into_cow(self) -> Cow<'a, [u8]> {
        match self.copied {
            Some(buf) => Cow::Owned(buf),
            None => Cow::Borrowed(self.source),
        }
    }
}

impl<'a> From<CopyOnWriteBuffer<'a>> for Cow<'a, [u8]> {
    fn from(buffer: CopyOnWriteBuffer<'a>) -> Self {
        buffer.into_cow()
    }
}
