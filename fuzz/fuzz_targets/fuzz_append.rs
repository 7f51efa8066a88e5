#![no_main]
use std::fmt::Write as _;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use printbuf::{Fixed, PrintBuf, left, right};

/// One append, mirrored by a `String` rendering built with `core::fmt`.
#[derive(Debug, Arbitrary)]
enum Op {
    Bool(bool),
    Int(i64),
    Char(char),
    Text(String),
    Bytes(Vec<u8>),
    Fixed { value: i32, digits: u8 },
    Right(u16),
    Left(String),
    Chop(u8),
    Reserve(u16),
    Reset,
}

fn check<const N: usize>(ops: &[Op]) {
    let mut buf = PrintBuf::<N>::new();
    let mut expected: Vec<u8> = Vec::new();

    for op in ops {
        match op {
            Op::Bool(v) => {
                buf.append(*v).unwrap();
                expected.extend_from_slice(v.to_string().as_bytes());
            }
            Op::Int(v) => {
                buf.append(*v).unwrap();
                expected.extend_from_slice(v.to_string().as_bytes());
            }
            Op::Char(v) => {
                buf.append(*v).unwrap();
                expected.extend_from_slice(v.to_string().as_bytes());
            }
            Op::Text(s) => {
                buf.append(s).unwrap();
                expected.extend_from_slice(s.as_bytes());
            }
            Op::Bytes(b) => {
                buf.append(b.as_slice()).unwrap();
                expected.extend_from_slice(b);
            }
            Op::Fixed { value, digits } => {
                // Small values only: the field must be wide enough.
                let v = f64::from(*value % 10_000) / 8.0;
                let digits = 12 + usize::from(*digits % 8);
                buf.append(Fixed::with_digits(v, digits, 3)).unwrap();
                let mut s = String::new();
                write!(s, "{v:>digits$.3}").unwrap();
                expected.extend_from_slice(s.as_bytes());
            }
            Op::Right(v) => {
                buf.append(right::<7, _>(*v)).unwrap();
                expected.extend_from_slice(format!("{v:>7}").as_bytes());
            }
            Op::Left(s) => {
                buf.append(left::<6, _>(s.as_bytes())).unwrap();
                let mut field: Vec<u8> = s.bytes().take(6).collect();
                field.resize(6, b' ');
                expected.extend_from_slice(&field);
            }
            Op::Chop(c) => {
                let removed = buf.chop(*c);
                let expected_removed = expected.last() == Some(c);
                assert_eq!(removed, expected_removed);
                if removed {
                    expected.pop();
                }
            }
            Op::Reserve(n) => {
                let n = usize::from(*n);
                buf.reserve(n).unwrap();
                assert!(buf.remaining() >= n);
            }
            Op::Reset => {
                buf.reset();
                expected.clear();
                assert!(buf.is_inline());
            }
        }
        buf.assert_invariants();
        assert_eq!(buf.as_bytes(), expected.as_slice());
    }

    let with_nul = buf.as_bytes_with_nul();
    assert_eq!(with_nul.last(), Some(&0));
    assert_eq!(&with_nul[..with_nul.len() - 1], expected.as_slice());
}

fuzz_target!(|ops: Vec<Op>| {
    check::<1>(&ops);
    check::<16>(&ops);
    check::<256>(&ops);
});
