use crate::{Encode, PrintBuf, PrintError, convert, encode::encode_float};

/// A float printed with an explicit precision, optionally right-justified in
/// a field of `digits` bytes.
///
/// ```rust
/// use printbuf::{Fixed, print_string};
///
/// assert_eq!(print_string(Fixed::new(2.0, 3)).unwrap(), "2.0");
/// assert_eq!(print_string(Fixed::with_digits(2.0, 8, 3)).unwrap(), "   2.000");
/// assert_eq!(print_string(Fixed::with_digits(2.0, 8, 3).fill(b'0')).unwrap(), "0002.000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed {
    value: f64,
    digits: Option<usize>,
    precision: usize,
    fill: u8,
}

impl Fixed {
    /// Left-justified, trailing zeros trimmed, like a plain float append at
    /// `precision`.
    #[must_use]
    pub fn new(value: f64, precision: usize) -> Self {
        Self {
            value,
            digits: None,
            precision,
            fill: b' ',
        }
    }

    /// Exactly `digits` bytes, right-justified and padded with spaces.
    ///
    /// `digits` must be wide enough for the rendered value.
    #[must_use]
    pub fn with_digits(value: f64, digits: usize, precision: usize) -> Self {
        Self {
            digits: Some(digits),
            ..Self::new(value, precision)
        }
    }

    /// Replaces the padding byte.
    #[must_use]
    pub fn fill(self, fill: u8) -> Self {
        Self { fill, ..self }
    }

    /// The wrapped value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Field width, if any.
    #[must_use]
    pub fn digits(&self) -> Option<usize> {
        self.digits
    }

    /// Fractional digits.
    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Padding byte.
    #[must_use]
    pub fn fill_byte(&self) -> u8 {
        self.fill
    }
}

impl Encode for Fixed {
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        let Some(digits) = self.digits else {
            return encode_float(self.value, self.precision, buf);
        };
        buf.reserve(digits)?;
        convert::ftoa_right(self.value, &mut buf.spare_mut()[..digits], self.precision, self.fill);
        buf.advance(digits);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{BufferedPrint, print_string};

    #[rstest]
    #[case(Fixed::new(1.23456, 4), "1.2346")]
    #[case(Fixed::new(1.5, 4), "1.5")]
    #[case(Fixed::with_digits(1.23456, 8, 4), "  1.2346")]
    #[case(Fixed::with_digits(-1.23456, 8, 2).fill(b'_'), "___-1.23")]
    #[case(Fixed::with_digits(12.5, 4, 1), "12.5")]
    fn renders(#[case] f: Fixed, #[case] expected: &str) {
        assert_eq!(print_string(f).unwrap(), expected);
    }

    #[test]
    fn explicit_precision_overrides_buffer_precision() {
        let mut b = BufferedPrint::new();
        b.set_precision(1);
        b.append((Fixed::new(0.123_45, 3), ' ', 0.123_45)).unwrap();
        assert_eq!(b.as_bytes(), b"0.123 0.1");
    }

    #[test]
    fn field_grows_buffer_exactly_once() {
        let mut b = PrintBuf::<4>::new();
        b.append(Fixed::with_digits(7.0, 10, 2)).unwrap();
        assert_eq!(b.as_bytes(), b"      7.00");
        assert_eq!(b.reallocations(), 1);
    }
}
