#![allow(missing_docs)]

use std::{ffi::CStr, fmt::Write as _};

use printbuf::{
    BufferedPrint, Endl, Fixed, Left, PrintBuf, PrintError, Right, Span, SrcInfo, Width, bprintf,
    display, left, print_string, right, width,
};
use rstest::rstest;

#[test]
fn aligned_integers() {
    assert_eq!(print_string(right::<6, _>(42)).unwrap(), "    42");
    assert_eq!(print_string(left::<6, _>(42)).unwrap(), "42    ");
    assert_eq!(print_string(Width::<6, Right, _>::new(42).fill(b'0')).unwrap(), "000042");
}

#[test]
fn string_fields_truncate_and_pad() {
    assert_eq!(print_string(right::<3, _>("hello")).unwrap(), "hel");
    assert_eq!(print_string(width::<8, Left, _>("hi", b' ')).unwrap(), "hi      ");
}

#[allow(clippy::approx_constant)]
#[rstest]
#[case(Fixed::new(3.14159, 4), "3.1416")]
#[case(Fixed::with_digits(3.14159, 8, 4), "  3.1416")]
fn fixed(#[case] f: Fixed, #[case] expected: &str) {
    let s = print_string(f).unwrap();
    assert_eq!(s, expected);
    if let Some(digits) = f.digits() {
        assert_eq!(s.len(), digits);
    }
}

#[test]
fn null_c_string_is_noop() {
    let mut buf = BufferedPrint::new();
    buf.append("abc").unwrap();
    buf.append(None::<&CStr>).unwrap();
    assert_eq!(buf.len(), 3);
    buf.append(Some(c"def")).unwrap();
    assert_eq!(buf.as_bytes(), b"abcdef");
}

#[test]
fn chop_trailing_newline() {
    let mut buf = BufferedPrint::new();
    buf.append(("abc", Endl)).unwrap();
    buf.chop(b'\n');
    assert_eq!(buf.as_bytes(), b"abc");
    buf.chop(b'\n');
    assert_eq!(buf.as_bytes(), b"abc");
}

#[test]
fn inline_boundary_then_one_more_byte() {
    let mut buf = PrintBuf::<32>::new();
    let exact = "x".repeat(31);
    buf.append(exact.as_str()).unwrap();
    assert!(buf.is_inline());
    assert_eq!(buf.as_bytes(), exact.as_bytes());

    buf.append('y').unwrap();
    assert_eq!(buf.reallocations(), 1);
    assert!(buf.capacity() >= 32);
    assert_eq!(&buf.as_bytes()[..31], exact.as_bytes());
    assert_eq!(buf.last(), Some(b'y'));
    assert_eq!(buf.len(), 32);
}

#[test]
fn stream_operator_chains_and_latches_errors() {
    let mut buf = BufferedPrint::new();
    let _ = &mut buf << "n=" << 5_u8 << ", p=" << Fixed::new(0.5, 2) << Endl;
    buf.take_error().unwrap();
    assert_eq!(buf.to_string(), "n=5, p=0.5\n");

    struct Fails;
    impl std::fmt::Display for Fails {
        fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    buf.reset();
    let _ = &mut buf << "a" << display(Fails) << "b";
    assert!(matches!(buf.take_error(), Err(PrintError::Unsupported { .. })));
    assert_eq!(buf.as_bytes(), b"a");
    let _ = &mut buf << "c";
    assert_eq!(buf.as_bytes(), b"ac");
}

#[test]
fn printf_grows_when_needed() {
    let mut buf = PrintBuf::<8>::new();
    let n = bprintf!(buf, "{}-{:05}-{}", "left", 42, "right side of the line").unwrap();
    assert_eq!(buf.to_string(), "left-00042-right side of the line");
    assert_eq!(n, buf.len());
    assert_eq!(buf.reallocations(), 1);
}

#[test]
fn fmt_write_goes_through_the_buffer() {
    let mut buf = PrintBuf::<4>::new();
    write!(buf, "{:>4}|{:<4}|", 1, 2).unwrap();
    assert_eq!(buf.as_bytes(), b"   1|2   |");
}

#[test]
fn everything_at_once() {
    let owned = String::from("owned");
    let ptr = std::ptr::without_provenance::<u8>(0xff);
    let s = print_string!(
        true,
        ' ',
        -12_i32,
        ' ',
        7_u64,
        ' ',
        2.5_f64,
        ' ',
        &owned,
        ' ',
        Span::new(b"span"),
        ' ',
        ptr,
        ' ',
        right::<4, _>('c'),
        ' ',
        SrcInfo::new("dir/file.rs", 9, ""),
    )
    .unwrap();
    assert_eq!(s, "true -12 7 2.5 owned span 0xff    c [file.rs:9]");
}

#[test]
fn print_string_macro_stops_at_first_failure() {
    struct Fails;
    impl std::fmt::Display for Fails {
        fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }
    let err = print_string!("a", 1, display(Fails), "never").unwrap_err();
    assert!(matches!(err, PrintError::Unsupported { .. }));
    assert_eq!(print_string!().unwrap(), "");
}

#[test]
fn null_terminated_view_after_growth() {
    let mut buf = PrintBuf::<2>::new();
    buf.append(("abc", 123_u16)).unwrap();
    assert_eq!(buf.as_bytes_with_nul(), b"abc123\0");
    let view = CStr::from_bytes_with_nul(buf.as_bytes_with_nul()).unwrap();
    assert_eq!(view.to_str().unwrap(), "abc123");
}

#[test]
fn precision_is_configurable() {
    let mut buf = BufferedPrint::new();
    buf.set_precision(3);
    buf.append(1.0 / 3.0).unwrap();
    assert_eq!(buf.as_bytes(), b"0.333");
}
