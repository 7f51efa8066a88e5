//! Stand-ins for the iostream manipulators `endl`, `ends` and `flush`.

use crate::{Encode, PrintBuf, PrintError};

/// Appends `'\n'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Endl;

/// Appends a NUL byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ends;

/// Appends nothing; a buffer has no sink to flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flush;

impl Encode for Endl {
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        buf.write_bytes(b"\n")?;
        Ok(())
    }
}

impl Encode for Ends {
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        buf.write_bytes(b"\0")?;
        Ok(())
    }
}

impl Encode for Flush {
    fn encode<const N: usize>(&self, _buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferedPrint;

    #[test]
    fn manipulators() {
        let mut b = BufferedPrint::new();
        let _ = &mut b << "a" << Endl << "b" << Ends << Flush;
        b.take_error().unwrap();
        assert_eq!(b.as_bytes(), b"a\nb\0");
        assert!(b.chop(b'\0'));
        assert!(!b.chop(b'\n'));
    }
}
