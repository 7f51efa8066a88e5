//! Growable byte region with an inline small-buffer.
//!
//! Layout
//! - The region starts out as `inline`, an `[u8; N]` stored in the buffer
//!   value itself. The first growth moves the text into `heap`; from then on
//!   the heap region is used until `reset()`.
//! - Which region is active is derived from `heap` being empty, never stored
//!   separately.
//! - `pos` (cursor) and `limit` are offsets into the active region, so moving
//!   a `PrintBuf` needs no fix-ups: offsets stay valid wherever the inline
//!   array lands, and a heap region moves by pointer.
//!
//! Invariants
//! - `pos <= limit < region.len()`: one byte past `limit` is always owned, so
//!   `as_bytes_with_nul` can write its terminator without growing.
//! - Growth to a new usable capacity of `limit + additional + N` either fully
//!   succeeds or leaves every field untouched.

use alloc::{string::String, vec::Vec};
use core::{fmt, ops::Shl};

use bstr::{BStr, BString, ByteSlice};

use crate::{Encode, PrintError, PrintOptions};

/// Default size of the inline region.
pub const INLINE_CAPACITY: usize = 256;

/// A print buffer with the default inline region.
pub type BufferedPrint = PrintBuf<INLINE_CAPACITY>;

/// Growable text buffer with `N` bytes of inline storage.
///
/// Values are appended with [`append`](Self::append) (chainable, fallible),
/// the `<<` operator (failure latched, see [`take_error`](Self::take_error)),
/// [`printf`](Self::printf) or [`core::fmt::Write`].
#[derive(Clone)]
pub struct PrintBuf<const N: usize = INLINE_CAPACITY> {
    inline: [u8; N],
    heap: Vec<u8>,
    pos: usize,
    limit: usize,
    options: PrintOptions,
    reallocations: u64,
    error: Option<PrintError>,
}

impl<const N: usize> PrintBuf<N> {
    /// Creates an empty buffer using the inline region.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(PrintOptions::default())
    }

    /// Creates an empty buffer with the given options.
    #[must_use]
    pub fn with_options(options: PrintOptions) -> Self {
        const { assert!(N > 0, "the inline region needs room for a terminator") };
        Self {
            inline: [0; N],
            heap: Vec::new(),
            pos: 0,
            limit: N - 1,
            options,
            reallocations: 0,
            error: None,
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &PrintOptions {
        &self.options
    }

    /// Sets the fractional digits used for floats without explicit precision.
    pub fn set_precision(&mut self, precision: usize) {
        self.options.precision = precision;
    }

    /// Sets how many scope segments a [`SrcInfo`](crate::SrcInfo) prints.
    pub fn set_max_src_scope(&mut self, depth: usize) {
        self.options.max_src_scope = depth;
    }

    fn region(&self) -> &[u8] {
        if self.heap.is_empty() {
            &self.inline
        } else {
            &self.heap
        }
    }

    fn region_mut(&mut self) -> &mut [u8] {
        if self.heap.is_empty() {
            &mut self.inline
        } else {
            &mut self.heap
        }
    }

    /// Whether the text still lives in the inline region.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of bytes written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pos
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Usable capacity: the most bytes the buffer can hold without growing.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.limit
    }

    /// Free bytes between the cursor and the limit.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    /// Number of times the buffer has grown. Any view taken before a change
    /// of this counter points at released storage.
    #[must_use]
    pub fn reallocations(&self) -> u64 {
        self.reallocations
    }

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panics if the cursor, limit and active region disagree.
    pub fn assert_invariants(&self) {
        let region = self.region().len();
        assert!(self.pos <= self.limit, "cursor {} past limit {}", self.pos, self.limit);
        assert!(self.limit < region, "limit {} leaves no terminator byte in {region}", self.limit);
        if self.is_inline() {
            assert_eq!(self.limit, N - 1);
        }
    }

    /// Ensures at least `additional` bytes are free after the cursor.
    ///
    /// Growing sets the usable capacity to `capacity + additional + N`.
    /// Written bytes keep their offsets.
    ///
    /// # Errors
    ///
    /// [`PrintError::Alloc`] or [`PrintError::CapacityOverflow`]; the buffer
    /// is unchanged in both cases.
    #[inline]
    pub fn reserve(&mut self, additional: usize) -> Result<(), PrintError> {
        if additional <= self.remaining() {
            return Ok(());
        }
        self.grow(additional)
    }

    #[cold]
    fn grow(&mut self, additional: usize) -> Result<(), PrintError> {
        let overflow = || PrintError::CapacityOverflow { requested: additional };
        let limit = self
            .limit
            .checked_add(additional)
            .and_then(|l| l.checked_add(N))
            .ok_or_else(overflow)?;
        let region_len = limit.checked_add(1).ok_or_else(overflow)?;

        let mut region = Vec::new();
        region
            .try_reserve_exact(region_len)
            .map_err(|source| PrintError::Alloc { requested: limit, source })?;
        region.extend_from_slice(self.as_bytes());
        region.resize(region_len, 0);

        log::trace!(
            "print buffer grew from {} to {} bytes ({} written, {} requested)",
            self.limit,
            limit,
            self.pos,
            additional
        );
        self.heap = region;
        self.limit = limit;
        self.reallocations += 1;
        Ok(())
    }

    /// Releases grown storage and returns to an empty inline buffer.
    ///
    /// Options are kept; a latched `<<` error is cleared.
    pub fn reset(&mut self) {
        self.heap = Vec::new();
        self.pos = 0;
        self.limit = N - 1;
        self.error = None;
    }

    /// The free region after the cursor.
    ///
    /// For external encoders: [`reserve`](Self::reserve) first, write into
    /// the slice, then [`advance`](Self::advance) by the count written.
    pub fn spare_mut(&mut self) -> &mut [u8] {
        let (pos, limit) = (self.pos, self.limit);
        &mut self.region_mut()[pos..limit]
    }

    /// Moves the cursor forward over `n` bytes already written into
    /// [`spare_mut`](Self::spare_mut).
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`remaining`](Self::remaining).
    pub fn advance(&mut self, n: usize) {
        assert!(n <= self.remaining(), "advance past the reserved region");
        self.pos += n;
    }

    /// Moves the cursor back to `len`. Longer lengths are ignored.
    pub fn truncate(&mut self, len: usize) {
        self.pos = self.pos.min(len);
    }

    /// Removes the last byte if it equals `byte`. Returns whether it did.
    pub fn chop(&mut self, byte: u8) -> bool {
        if self.last() == Some(byte) {
            self.pos -= 1;
            true
        } else {
            false
        }
    }

    /// Removes the last byte, if any.
    pub fn chop_last(&mut self) -> Option<u8> {
        let last = self.last()?;
        self.pos -= 1;
        Some(last)
    }

    /// The last byte written.
    #[must_use]
    pub fn last(&self) -> Option<u8> {
        self.as_bytes().last().copied()
    }

    /// Copies `bytes` verbatim.
    ///
    /// # Errors
    ///
    /// Fails only if the buffer cannot grow.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, PrintError> {
        self.reserve(bytes.len())?;
        self.push_reserved(bytes);
        Ok(self)
    }

    /// Appends a single character.
    ///
    /// # Errors
    ///
    /// Fails only if the buffer cannot grow.
    pub fn put(&mut self, ch: char) -> Result<&mut Self, PrintError> {
        self.append(ch)
    }

    /// Copies `bytes` into space already reserved.
    pub(crate) fn push_reserved(&mut self, bytes: &[u8]) {
        let pos = self.pos;
        self.region_mut()[pos..pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// The written bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.region()[..self.pos]
    }

    /// The written bytes as a `BStr`.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.as_bytes().as_bstr()
    }

    /// The written bytes followed by a NUL.
    ///
    /// The terminator is written into the byte past the cursor, which is
    /// always owned; the cursor does not move, so a later append overwrites
    /// it.
    pub fn as_bytes_with_nul(&mut self) -> &[u8] {
        let pos = self.pos;
        let region = self.region_mut();
        region[pos] = 0;
        &region[..=pos]
    }

    /// Copies the written bytes into an owned `BString`.
    #[must_use]
    pub fn to_bstring(&self) -> BString {
        BString::from(self.as_bytes())
    }

    /// Copies the written bytes into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Moves the text out as a `String`, replacing invalid UTF-8, and resets
    /// the buffer.
    pub fn take_string(&mut self) -> String {
        let s = self.as_bstr().to_str_lossy().into_owned();
        self.reset();
        s
    }

    /// Appends one value.
    ///
    /// # Errors
    ///
    /// Growth failure, or [`PrintError::Unsupported`] from a
    /// [`Displayed`](crate::Displayed) value whose `Display` fails. Bytes
    /// already appended stay in place.
    pub fn append<T: Encode>(&mut self, value: T) -> Result<&mut Self, PrintError> {
        value.encode(self)?;
        Ok(self)
    }

    /// Formats `args` into the buffer and returns the number of bytes
    /// written.
    ///
    /// # Errors
    ///
    /// Growth failure, or [`PrintError::Unsupported`] when an argument's
    /// `Display` fails.
    pub fn printf(&mut self, args: fmt::Arguments<'_>) -> Result<usize, PrintError> {
        self.format_two_phase(args, "core::fmt::Arguments")
    }

    /// Formats into the free region; if it overflows, measures the exact
    /// length, grows and formats again.
    pub(crate) fn format_two_phase(
        &mut self,
        args: fmt::Arguments<'_>,
        type_name: &'static str,
    ) -> Result<usize, PrintError> {
        let start = self.pos;
        let (written, overflowed) = {
            let mut w = crate::convert::SliceWriter::new(self.spare_mut());
            let ok = fmt::Write::write_fmt(&mut w, args).is_ok();
            let (n, overflowed) = (w.len(), w.overflowed());
            // A `Display` impl may swallow the overflow error and return `Ok`.
            if ok && !overflowed {
                self.pos += n;
                return Ok(n);
            }
            (n, overflowed)
        };
        if !overflowed {
            return Err(self.unsupported(type_name, start, written));
        }

        let Some(needed) = crate::convert::measure(args) else {
            return Err(self.unsupported(type_name, start, written));
        };
        log::debug!("{type_name}: {needed} bytes did not fit in {written}, retrying");
        self.reserve(needed)?;

        let mut w = crate::convert::SliceWriter::new(self.spare_mut());
        let ok = fmt::Write::write_fmt(&mut w, args).is_ok() && !w.overflowed();
        let n = w.len();
        if !ok {
            return Err(self.unsupported(type_name, start, n));
        }
        self.pos += n;
        Ok(n)
    }

    fn unsupported(&self, type_name: &'static str, start: usize, len: usize) -> PrintError {
        PrintError::Unsupported {
            type_name,
            partial: BString::from(&self.region()[start..start + len]),
        }
    }

    /// Returns and clears the first error latched by `<<` or `fmt::Write`.
    ///
    /// # Errors
    ///
    /// The latched error, if any.
    pub fn take_error(&mut self) -> Result<(), PrintError> {
        self.error.take().map_or(Ok(()), Err)
    }

    fn latch(&mut self, e: PrintError) {
        if self.error.is_none() {
            self.error = Some(e);
        }
    }
}

impl<const N: usize> Default for PrintBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for PrintBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintBuf")
            .field("text", &self.as_bstr())
            .field("capacity", &self.limit)
            .field("inline", &self.is_inline())
            .finish_non_exhaustive()
    }
}

/// Lossy UTF-8 rendering of the written bytes.
impl<const N: usize> fmt::Display for PrintBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl<const N: usize> fmt::Write for PrintBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Err(e) = self.reserve(s.len()) {
            self.latch(e);
            return Err(fmt::Error);
        }
        self.push_reserved(s.as_bytes());
        Ok(())
    }
}

impl<'a, const N: usize, T: Encode> Shl<T> for &'a mut PrintBuf<N> {
    type Output = &'a mut PrintBuf<N>;

    /// Appends `value` unless an earlier `<<` failed.
    fn shl(self, value: T) -> Self::Output {
        if self.error.is_none() {
            if let Err(e) = value.encode(self) {
                self.latch(e);
            }
        }
        self
    }
}

#[cfg(feature = "std")]
impl<const N: usize> std::io::Write for PrintBuf<N> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_bytes(buf)
            .map(|_| buf.len())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::OutOfMemory, e))
    }

    /// Nothing to flush: there is no underlying sink.
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
