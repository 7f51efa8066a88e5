use core::fmt;

use bstr::{BStr, BString, ByteSlice};

use crate::{Encode, PrintBuf, PrintError};

/// A borrowed byte string that is not necessarily NUL-terminated or valid
/// UTF-8.
///
/// Appending a `Span` copies exactly its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span<'a> {
    bytes: &'a [u8],
}

impl<'a> Span<'a> {
    /// Wraps `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Wraps `len` bytes starting at `ptr`.
    ///
    /// # Safety
    ///
    /// Same contract as [`core::slice::from_raw_parts`]: `ptr` must be
    /// non-null, aligned and valid for reads of `len` bytes for `'a`, and the
    /// memory must not be mutated during `'a`.
    #[must_use]
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Self {
        Self::new(unsafe { core::slice::from_raw_parts(ptr, len) })
    }

    /// The wrapped bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The bytes as a `BStr`.
    #[must_use]
    pub fn as_bstr(&self) -> &'a BStr {
        self.bytes.as_bstr()
    }
}

impl<'a> From<&'a [u8]> for Span<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a str> for Span<'a> {
    fn from(s: &'a str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<Span<'_>> for BString {
    fn from(span: Span<'_>) -> Self {
        BString::from(span.bytes)
    }
}

/// Lossy UTF-8 rendering.
impl fmt::Display for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl Encode for Span<'_> {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        buf.write_bytes(self.bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::print_string;

    #[test]
    fn copies_exactly_len_bytes() {
        let backing = b"abcdef";
        let span = unsafe { Span::from_raw_parts(backing.as_ptr(), 3) };
        assert_eq!(span.len(), 3);
        assert_eq!(print_string(('<', span, '>')).unwrap(), "<abc>");
    }

    #[test]
    fn interior_nul_is_kept() {
        let span = Span::new(b"a\0b");
        let mut b = crate::BufferedPrint::new();
        b.append(span).unwrap();
        assert_eq!(b.as_bytes(), b"a\0b");
    }

    #[test]
    fn converts_to_owned() {
        let span = Span::from("xyz");
        assert_eq!(BString::from(span), "xyz");
        assert_eq!(span.to_string(), "xyz");
        assert!(Span::default().is_empty());
    }
}
