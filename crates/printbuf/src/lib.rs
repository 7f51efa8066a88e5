//! A fast text builder that appends heterogeneous values into one contiguous,
//! growable byte region.
//!
//! [`PrintBuf`] keeps its first `N` bytes inline and only touches the heap
//! once the text outgrows them. Every supported value shape implements
//! [`Encode`], which computes how much room it needs, asks the buffer to
//! guarantee that room, writes its bytes at the cursor and advances the
//! cursor by exactly what was written.
//!
//! ```rust
//! use printbuf::{BufferedPrint, Fixed, Left, Right, Width};
//!
//! let mut buf = BufferedPrint::new();
//! buf.append(("id=", 7_u32, ' '))
//!     .unwrap()
//!     .append(Width::<6, Right, _>::new(42))
//!     .unwrap()
//!     .append('|')
//!     .unwrap()
//!     .append(Width::<4, Left, _>::new("abcdef"))
//!     .unwrap()
//!     .append(Fixed::new(1.23456, 4))
//!     .unwrap();
//! assert_eq!(buf.to_string(), "id=7     42|abcd1.2346");
//! ```
//!
//! Views handed out by accessors (`as_bytes`, `spare_mut`,
//! `as_bytes_with_nul`) borrow the buffer and are therefore invalidated by
//! any later append, reserve, reset or advance: growth moves the region.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod convert;
mod encode;
mod error;
mod fixed;
mod location;
mod manip;
mod options;
mod span;
mod store;
mod width;

#[cfg(test)]
mod tests;

pub use convert::{Float, Integer, ftoa_left, ftoa_right, itoa, itoa_hex, itoa_left, itoa_right};
pub use encode::{Displayed, Encode, display, print_string};
pub use error::PrintError;
pub use fixed::Fixed;
pub use location::{Bracketed, SrcInfo};
pub use manip::{Endl, Ends, Flush};
pub use options::PrintOptions;
pub use span::Span;
pub use store::{BufferedPrint, INLINE_CAPACITY, PrintBuf};
pub use width::{Align, Field, Left, Right, Side, Width, left, right, width};

/// Appends every argument, left to right, into a fresh [`BufferedPrint`] and
/// returns the text.
///
/// Takes any number of arguments; appending stops at the first failure.
///
/// ```rust
/// let s = printbuf::print_string!("x=", 1_i32, ", ok=", true).unwrap();
/// assert_eq!(s, "x=1, ok=true");
/// ```
#[macro_export]
macro_rules! print_string {
    ( $( $value:expr ),* $(,)? ) => {{
        let mut buf = $crate::BufferedPrint::new();
        let appended = (|| -> ::core::result::Result<(), $crate::PrintError> {
            $( buf.append($value)?; )*
            ::core::result::Result::Ok(())
        })();
        appended.map(|()| buf.take_string())
    }};
}

/// C-style formatted print into a buffer, using `format!` syntax.
///
/// Evaluates to `Result<usize, PrintError>` with the number of bytes written.
///
/// ```rust
/// let mut buf = printbuf::BufferedPrint::new();
/// let n = printbuf::bprintf!(buf, "{:>5}|{:.2}", "ab", 3.14159).unwrap();
/// assert_eq!(n, 10);
/// assert_eq!(buf.as_bytes(), b"   ab|3.14");
/// ```
#[macro_export]
macro_rules! bprintf {
    ( $buf:expr, $( $arg:tt )* ) => {
        $buf.printf(::core::format_args!( $( $arg )* ))
    };
}

/// Captures the current file, line and module path as a [`SrcInfo`].
///
/// ```rust
/// let here = printbuf::src_info!();
/// assert!(here.line() > 0);
/// ```
#[macro_export]
macro_rules! src_info {
    () => {
        $crate::SrcInfo::new(::core::file!(), ::core::line!(), ::core::module_path!())
    };
}
