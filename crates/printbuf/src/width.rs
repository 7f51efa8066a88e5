//! Fixed-width, aligned fields.
//!
//! `Width<W, A, T>` always encodes to exactly `W` bytes:
//! - integers and floats are justified to side `A` and padded with the fill
//!   byte; a value wider than `W` is the caller's mistake (debug builds
//!   assert, release builds keep the leading bytes);
//! - strings, byte spans, bools and chars copy at most `W` bytes, silently
//!   truncating, and pad the rest.
//!
//! Alignment is a type parameter so the field is fully known at compile
//! time; [`Left`] and [`Right`] are the two markers.

use alloc::{string::String, vec::Vec};
use core::{ffi::CStr, marker::PhantomData};

use bstr::{BStr, BString};

use crate::{
    Encode, PrintBuf, PrintError, Span,
    convert::{self, Float, pad_left, pad_right},
};

/// Which side of the field the content sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Content first, padding after.
    Left,
    /// Padding first, content after.
    Right,
}

mod private {
    pub trait Sealed {}
}

/// Type-level alignment marker.
pub trait Align: private::Sealed {
    /// The side content is placed on.
    const SIDE: Side;
}

/// Left alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Left;

/// Right alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Right;

impl private::Sealed for Left {}
impl Align for Left {
    const SIDE: Side = Side::Left;
}

impl private::Sealed for Right {}
impl Align for Right {
    const SIDE: Side = Side::Right;
}

/// A value that can fill a fixed-width field.
pub trait Field {
    /// Fills all of `dest` with the value placed on `side`.
    ///
    /// `precision` is only read by floats.
    fn write_field(&self, dest: &mut [u8], side: Side, fill: u8, precision: usize);
}

/// Copies at most `dest.len()` bytes of `text` and pads the rest.
fn justify(dest: &mut [u8], text: &[u8], side: Side, fill: u8) {
    match side {
        Side::Left => pad_right(dest, text, fill),
        Side::Right => pad_left(dest, text, fill),
    }
}

macro_rules! integer_fields {
    ($($t:ty),*) => {$(
        impl Field for $t {
            fn write_field(&self, dest: &mut [u8], side: Side, fill: u8, _precision: usize) {
                match side {
                    Side::Left => convert::itoa_left(*self, dest, fill),
                    Side::Right => convert::itoa_right(*self, dest, fill),
                }
            }
        }
    )*};
}

integer_fields!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

fn float_field<F: Float>(value: F, dest: &mut [u8], side: Side, fill: u8, precision: usize) {
    match side {
        Side::Right => convert::ftoa_right(value, dest, precision, fill),
        Side::Left => {
            let n = convert::ftoa_left(value, dest, precision, false).unwrap_or(0);
            dest[n..].fill(fill);
        }
    }
}

impl Field for f64 {
    fn write_field(&self, dest: &mut [u8], side: Side, fill: u8, precision: usize) {
        float_field(*self, dest, side, fill, precision);
    }
}

impl Field for f32 {
    fn write_field(&self, dest: &mut [u8], side: Side, fill: u8, precision: usize) {
        float_field(*self, dest, side, fill, precision);
    }
}

impl Field for bool {
    fn write_field(&self, dest: &mut [u8], side: Side, fill: u8, _precision: usize) {
        let text: &[u8] = if *self { b"true" } else { b"false" };
        justify(dest, text, side, fill);
    }
}

/// Like any other content: right-aligned lands in the last byte, left-aligned
/// in the first.
impl Field for char {
    fn write_field(&self, dest: &mut [u8], side: Side, fill: u8, _precision: usize) {
        let mut tmp = [0u8; 4];
        justify(dest, self.encode_utf8(&mut tmp).as_bytes(), side, fill);
    }
}

macro_rules! byte_fields {
    ($($t:ty => |$v:ident| $bytes:expr),* $(,)?) => {$(
        impl Field for $t {
            fn write_field(&self, dest: &mut [u8], side: Side, fill: u8, _precision: usize) {
                let $v = self;
                justify(dest, $bytes, side, fill);
            }
        }
    )*};
}

byte_fields! {
    str => |s| s.as_bytes(),
    String => |s| s.as_bytes(),
    [u8] => |s| s,
    Vec<u8> => |s| s,
    BStr => |s| s,
    BString => |s| s,
    CStr => |s| s.to_bytes(),
    Span<'_> => |s| s.as_bytes(),
}

impl<T: Field + ?Sized> Field for &T {
    fn write_field(&self, dest: &mut [u8], side: Side, fill: u8, precision: usize) {
        (**self).write_field(dest, side, fill, precision);
    }
}

/// `value` rendered into exactly `W` bytes, aligned to `A`.
///
/// ```rust
/// use printbuf::{Left, Right, Width, print_string};
///
/// assert_eq!(print_string(Width::<6, Right, _>::new(42)).unwrap(), "    42");
/// assert_eq!(print_string(Width::<6, Left, _>::new(42)).unwrap(), "42    ");
/// assert_eq!(print_string(Width::<3, Right, _>::new("hello")).unwrap(), "hel");
/// assert_eq!(print_string(Width::<7, Right, _>::new(2.5).precision(2)).unwrap(), "   2.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Width<const W: usize, A: Align, T> {
    value: T,
    fill: u8,
    precision: usize,
    align: PhantomData<A>,
}

impl<const W: usize, A: Align, T: Field> Width<W, A, T> {
    /// Space-padded field.
    pub fn new(value: T) -> Self {
        Self {
            value,
            fill: b' ',
            precision: 0,
            align: PhantomData,
        }
    }

    /// Replaces the padding byte.
    #[must_use]
    pub fn fill(self, fill: u8) -> Self {
        Self { fill, ..self }
    }

    /// Field width in bytes.
    pub const WIDTH: usize = W;

    /// The wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Padding byte.
    pub fn fill_byte(&self) -> u8 {
        self.fill
    }

    /// Writes the field into the first `W` bytes of `dest`.
    ///
    /// # Panics
    ///
    /// Panics if `dest` is shorter than `W`.
    pub fn write(&self, dest: &mut [u8]) {
        self.value.write_field(&mut dest[..W], A::SIDE, self.fill, self.precision);
    }
}

impl<const W: usize, A: Align, T: Float + Field> Width<W, A, T> {
    /// Sets the fractional digits of a float field.
    #[must_use]
    pub fn precision(self, precision: usize) -> Self {
        Self { precision, ..self }
    }
}

impl<const W: usize, A: Align, T: Field> Encode for Width<W, A, T> {
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        buf.reserve(W)?;
        self.write(buf.spare_mut());
        buf.advance(W);
        Ok(())
    }
}

/// Builds a `W`-byte field aligned to `A` and padded with `fill`.
pub fn width<const W: usize, A: Align, T: Field>(value: T, fill: u8) -> Width<W, A, T> {
    Width::new(value).fill(fill)
}

/// Space-padded, right-aligned `W`-byte field.
pub fn right<const W: usize, T: Field>(value: T) -> Width<W, Right, T> {
    Width::new(value)
}

/// Space-padded, left-aligned `W`-byte field.
pub fn left<const W: usize, T: Field>(value: T) -> Width<W, Left, T> {
    Width::new(value)
}
