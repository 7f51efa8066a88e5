//! Typed append dispatch.
//!
//! Each supported value shape implements [`Encode`]. An implementation
//! reserves what its shape needs (a flat budget for integers and bools, the
//! exact length for strings and fixed-width fields), writes at the cursor and
//! advances by what it wrote.
//!
//! Shapes whose length is unknown up front (floats that outgrow their budget,
//! pointers, `Display` values, `fmt::Arguments`) use a two-phase encode: an
//! optimistic attempt into the free region, then measure, grow and retry.

use alloc::{boxed::Box, ffi::CString, string::String, vec::Vec};
use core::{
    any::type_name,
    ffi::CStr,
    fmt::{self, Display},
};

use bstr::{BStr, BString};

use crate::{
    PrintBuf, PrintError,
    convert::{self, Float, Integer},
};

/// Starting budget for float text; most values fit and need no retry.
const FLOAT_RESERVE: usize = 32;

/// A value that knows how to append itself to a [`PrintBuf`].
pub trait Encode {
    /// Appends `self` at the buffer's cursor.
    ///
    /// # Errors
    ///
    /// Growth failure, or a formatting failure for shapes that go through
    /// `core::fmt`.
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError>;
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        (**self).encode(buf)
    }
}

impl<T: Encode + ?Sized> Encode for &mut T {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        (**self).encode(buf)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        (**self).encode(buf)
    }
}

/// `None` appends nothing.
impl<T: Encode> Encode for Option<T> {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        match self {
            Some(v) => v.encode(buf),
            None => Ok(()),
        }
    }
}

impl Encode for bool {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        buf.reserve(8)?;
        buf.push_reserved(if *self { b"true" } else { b"false" });
        Ok(())
    }
}

macro_rules! encode_integers {
    ($($t:ty),*) => {$(
        impl Encode for $t {
            #[inline]
            fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
                buf.reserve(<$t as Integer>::RESERVE)?;
                let n = convert::itoa(*self, buf.spare_mut());
                buf.advance(n);
                Ok(())
            }
        }
    )*};
}

encode_integers!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

impl Encode for char {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        let mut tmp = [0u8; 4];
        buf.write_bytes(self.encode_utf8(&mut tmp).as_bytes())?;
        Ok(())
    }
}

/// Appends `value` with `precision` fractional digits, trailing zeros
/// trimmed.
pub(crate) fn encode_float<F: Float, const N: usize>(
    value: F,
    precision: usize,
    buf: &mut PrintBuf<N>,
) -> Result<(), PrintError> {
    let precision = precision.min(convert::MAX_PRECISION);
    buf.reserve(FLOAT_RESERVE)?;
    if let Some(n) = convert::ftoa_left(value, buf.spare_mut(), precision, true) {
        buf.advance(n);
        return Ok(());
    }

    // Float formatting cannot fail, so the measured length always fits.
    let needed = convert::measure(format_args!("{value:.precision$}")).unwrap_or_default();
    log::debug!("float needs {needed} bytes, retrying after reserve");
    buf.reserve(needed)?;
    let n = convert::ftoa_left(value, buf.spare_mut(), precision, true).unwrap_or_default();
    buf.advance(n);
    Ok(())
}

impl Encode for f64 {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        encode_float(*self, buf.options().precision, buf)
    }
}

impl Encode for f32 {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        encode_float(*self, buf.options().precision, buf)
    }
}

impl Encode for str {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        buf.write_bytes(self.as_bytes())?;
        Ok(())
    }
}

impl Encode for String {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        self.as_str().encode(buf)
    }
}

impl Encode for [u8] {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        buf.write_bytes(self)?;
        Ok(())
    }
}

impl Encode for Vec<u8> {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        self.as_slice().encode(buf)
    }
}

/// A fixed-size character array: bytes up to the first NUL, or all `M`.
impl<const M: usize> Encode for [u8; M] {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        let len = self.iter().position(|&b| b == 0).unwrap_or(M);
        self[..len].encode(buf)
    }
}

impl Encode for BStr {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        <[u8]>::encode(self, buf)
    }
}

impl Encode for BString {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        <[u8]>::encode(self, buf)
    }
}

impl Encode for CStr {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        self.to_bytes().encode(buf)
    }
}

impl Encode for CString {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        self.as_c_str().encode(buf)
    }
}

/// Appends `0x` and the address in lowercase hex.
fn encode_address<const N: usize>(addr: usize, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
    let addr = addr as u64;
    buf.reserve(2)?;
    let mut digits = convert::itoa_hex(addr, &mut buf.spare_mut()[2..]);
    if digits > buf.remaining() - 2 {
        buf.reserve(digits + 2)?;
        digits = convert::itoa_hex(addr, &mut buf.spare_mut()[2..]);
    }
    buf.spare_mut()[..2].copy_from_slice(b"0x");
    buf.advance(digits + 2);
    Ok(())
}

impl<T: ?Sized> Encode for *const T {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        encode_address(self.addr(), buf)
    }
}

impl<T: ?Sized> Encode for *mut T {
    #[inline]
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        encode_address(self.addr(), buf)
    }
}

/// `format_args!` output, through the two-phase protocol.
impl Encode for fmt::Arguments<'_> {
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        buf.printf(*self).map(drop)
    }
}

/// Wrapper routing any `Display` value through `core::fmt`.
///
/// The generic fallback for shapes without a dedicated encoding. Built with
/// [`display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displayed<T>(pub T);

/// Wraps `value` so it is appended through its `Display` impl.
///
/// ```rust
/// use std::net::Ipv4Addr;
///
/// let s = printbuf::print_string!("peer=", printbuf::display(Ipv4Addr::LOCALHOST)).unwrap();
/// assert_eq!(s, "peer=127.0.0.1");
/// ```
pub fn display<T: Display>(value: T) -> Displayed<T> {
    Displayed(value)
}

impl<T: Display> Encode for Displayed<T> {
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        buf.format_two_phase(format_args!("{}", self.0), type_name::<T>())
            .map(drop)
    }
}

impl Encode for () {
    #[inline]
    fn encode<const N: usize>(&self, _buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        Ok(())
    }
}

macro_rules! encode_tuples {
    ($( ($($name:ident),+) )*) => {$(
        /// Appends each element in order, with no separators.
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            #[allow(non_snake_case)]
            fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
                let ($($name,)+) = self;
                $( $name.encode(buf)?; )+
                Ok(())
            }
        }
    )*};
}

encode_tuples! {
    (A)
    (A, B)
    (A, B, C)
    (A, B, C, D)
    (A, B, C, D, E)
    (A, B, C, D, E, F)
    (A, B, C, D, E, F, G)
    (A, B, C, D, E, F, G, H)
    (A, B, C, D, E, F, G, H, I)
    (A, B, C, D, E, F, G, H, I, J)
    (A, B, C, D, E, F, G, H, I, J, K)
    (A, B, C, D, E, F, G, H, I, J, K, L)
}

/// Appends `values` (usually a tuple) into a fresh buffer and returns the
/// text, with invalid UTF-8 replaced.
///
/// # Errors
///
/// Whatever the first failing append returned.
pub fn print_string<T: Encode>(values: T) -> Result<String, PrintError> {
    let mut buf = crate::BufferedPrint::new();
    buf.append(values)?;
    Ok(buf.take_string())
}
