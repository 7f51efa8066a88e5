//! Numeric-to-text primitives.
//!
//! These write straight into a caller-provided byte slice. None of them
//! allocate. The ones that can run out of room say so in their return value
//! instead of truncating, so callers can grow the destination and retry:
//! - [`itoa`] never needs more than [`Integer::RESERVE`] bytes.
//! - [`itoa_hex`] returns the length it needs, whether or not it wrote.
//! - [`ftoa_left`] returns `None` when the text did not fit.
//!
//! The fixed-width variants ([`itoa_left`], [`itoa_right`], [`ftoa_right`])
//! always fill the whole destination; choosing a destination wide enough for
//! the value is the caller's job. An oversized value keeps its leading bytes.

use core::fmt::{self, Write};

const DIGIT_PAIRS: &[u8; 200] = b"\
0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

mod private {
    pub trait Sealed {}
}

/// Native integers accepted by [`itoa`].
pub trait Integer: Copy + private::Sealed {
    /// Bytes a buffer reserves before converting a value of this type.
    const RESERVE: usize;

    /// Sign and magnitude.
    fn split(self) -> (bool, u64);
}

macro_rules! impl_unsigned {
    ($($t:ty => $reserve:expr),* $(,)?) => {$(
        impl private::Sealed for $t {}
        impl Integer for $t {
            const RESERVE: usize = $reserve;

            #[inline]
            fn split(self) -> (bool, u64) {
                (false, self as u64)
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty => $reserve:expr),* $(,)?) => {$(
        impl private::Sealed for $t {}
        impl Integer for $t {
            const RESERVE: usize = $reserve;

            #[inline]
            fn split(self) -> (bool, u64) {
                (self < 0, self.unsigned_abs() as u64)
            }
        }
    )*};
}

impl_unsigned!(u8 => 8, u16 => 8, u32 => 16, u64 => 32, usize => 32);
impl_signed!(i8 => 8, i16 => 8, i32 => 16, i64 => 32, isize => 32);

/// Floats accepted by the float primitives.
pub trait Float: Copy + fmt::Display + private::Sealed {}

impl private::Sealed for f32 {}
impl Float for f32 {}
impl private::Sealed for f64 {}
impl Float for f64 {}

/// Renders `value` in decimal into the tail of `tmp` and returns the used
/// suffix.
fn render_decimal<T: Integer>(value: T, tmp: &mut [u8; 24]) -> &[u8] {
    let (negative, mut n) = value.split();
    let mut i = tmp.len();
    while n >= 100 {
        let d = (n % 100) as usize * 2;
        n /= 100;
        i -= 2;
        tmp[i..i + 2].copy_from_slice(&DIGIT_PAIRS[d..d + 2]);
    }
    if n >= 10 {
        let d = n as usize * 2;
        i -= 2;
        tmp[i..i + 2].copy_from_slice(&DIGIT_PAIRS[d..d + 2]);
    } else {
        i -= 1;
        tmp[i] = b'0' + n as u8;
    }
    if negative {
        i -= 1;
        tmp[i] = b'-';
    }
    &tmp[i..]
}

/// Writes `value` in decimal at the start of `dest` and returns the number of
/// bytes written.
///
/// # Panics
///
/// Panics if `dest` is shorter than the text; [`Integer::RESERVE`] bytes are
/// always enough.
pub fn itoa<T: Integer>(value: T, dest: &mut [u8]) -> usize {
    let mut tmp = [0u8; 24];
    let text = render_decimal(value, &mut tmp);
    dest[..text.len()].copy_from_slice(text);
    text.len()
}

/// Fills all of `dest` with `value` right-justified, padding on the left
/// with `fill`.
pub fn itoa_right<T: Integer>(value: T, dest: &mut [u8], fill: u8) {
    let mut tmp = [0u8; 24];
    let text = render_decimal(value, &mut tmp);
    debug_assert!(text.len() <= dest.len(), "integer wider than its field");
    pad_left(dest, text, fill);
}

/// Fills all of `dest` with `value` left-justified, padding on the right
/// with `fill`.
pub fn itoa_left<T: Integer>(value: T, dest: &mut [u8], fill: u8) {
    let mut tmp = [0u8; 24];
    let text = render_decimal(value, &mut tmp);
    debug_assert!(text.len() <= dest.len(), "integer wider than its field");
    pad_right(dest, text, fill);
}

/// Writes `value` as lowercase hexadecimal without a prefix.
///
/// Returns the number of digits the value needs. Nothing is written when
/// that is more than `dest.len()`.
pub fn itoa_hex(value: u64, dest: &mut [u8]) -> usize {
    let digits = if value == 0 {
        1
    } else {
        (64 - value.leading_zeros() as usize).div_ceil(4)
    };
    if digits > dest.len() {
        return digits;
    }
    let mut v = value;
    for slot in dest[..digits].iter_mut().rev() {
        *slot = HEX_DIGITS[(v & 0xf) as usize];
        v >>= 4;
    }
    digits
}

/// Largest precision `core::fmt` accepts; larger requests are clamped to it.
pub(crate) const MAX_PRECISION: usize = u16::MAX as usize;

/// Writes `value` with `precision` fractional digits at the start of `dest`.
///
/// With `compact`, trailing fractional zeros are dropped, keeping one digit
/// after the decimal point (`2.500000` becomes `2.5`, `2.000000` becomes
/// `2.0`).
///
/// Returns `None` if the text does not fit; `dest` then holds a truncated
/// rendering. Precision above `u16::MAX` is clamped.
pub fn ftoa_left<F: Float>(value: F, dest: &mut [u8], precision: usize, compact: bool) -> Option<usize> {
    let precision = precision.min(MAX_PRECISION);
    let mut w = SliceWriter::new(dest);
    write!(w, "{value:.precision$}").ok()?;
    let n = w.len();
    Some(if compact { trim_fraction(&dest[..n]) } else { n })
}

/// Fills all of `dest` with `value` right-justified, `precision` fractional
/// digits, padding on the left with `fill`.
pub fn ftoa_right<F: Float>(value: F, dest: &mut [u8], precision: usize, fill: u8) {
    let precision = precision.min(MAX_PRECISION);
    let width = dest.len();
    let mut w = SliceWriter::new(dest);
    let fits = write!(w, "{value:.precision$}").is_ok();
    let n = w.len();
    debug_assert!(fits, "float wider than its field");
    if fits {
        dest.copy_within(0..n, width - n);
        dest[..width - n].fill(fill);
    }
}

/// Length of `text` once trailing fractional zeros are dropped.
fn trim_fraction(text: &[u8]) -> usize {
    let Some(dot) = text.iter().position(|&b| b == b'.') else {
        return text.len();
    };
    let mut end = text.len();
    while end > dot + 2 && text[end - 1] == b'0' {
        end -= 1;
    }
    end
}

/// Copies `text` to the end of `dest` and fills the rest with `fill`.
pub(crate) fn pad_left(dest: &mut [u8], text: &[u8], fill: u8) {
    let len = text.len().min(dest.len());
    let gap = dest.len() - len;
    dest[..gap].fill(fill);
    dest[gap..].copy_from_slice(&text[..len]);
}

/// Copies `text` to the start of `dest` and fills the rest with `fill`.
pub(crate) fn pad_right(dest: &mut [u8], text: &[u8], fill: u8) {
    let len = text.len().min(dest.len());
    dest[..len].copy_from_slice(&text[..len]);
    dest[len..].fill(fill);
}

/// `fmt::Write` over a fixed slice.
///
/// On overflow the prefix that fits is kept and `overflowed` is set, which
/// distinguishes "ran out of room" from a `Display` impl returning an error.
pub(crate) struct SliceWriter<'a> {
    dest: &'a mut [u8],
    len: usize,
    overflowed: bool,
}

impl<'a> SliceWriter<'a> {
    pub(crate) fn new(dest: &'a mut [u8]) -> Self {
        Self {
            dest,
            len: 0,
            overflowed: false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn overflowed(&self) -> bool {
        self.overflowed
    }
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.dest.len() - self.len;
        let bytes = s.as_bytes();
        if bytes.len() <= room {
            self.dest[self.len..self.len + bytes.len()].copy_from_slice(bytes);
            self.len += bytes.len();
            Ok(())
        } else {
            self.dest[self.len..].copy_from_slice(&bytes[..room]);
            self.len += room;
            self.overflowed = true;
            Err(fmt::Error)
        }
    }
}

/// `fmt::Write` that only counts.
struct Counter(usize);

impl Write for Counter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Exact length of `args` once formatted, or `None` if a `Display` impl
/// inside it fails.
pub(crate) fn measure(args: fmt::Arguments<'_>) -> Option<usize> {
    let mut c = Counter(0);
    c.write_fmt(args).ok()?;
    Some(c.0)
}
