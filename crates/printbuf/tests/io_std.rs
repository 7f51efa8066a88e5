#![allow(missing_docs)]

use std::io::{self, Write};

use printbuf::{Flush, PrintBuf};

#[test]
fn write_all_across_growth() {
    let mut buf = PrintBuf::<8>::new();
    buf.write_all(b"abc").unwrap();
    assert!(buf.is_inline());
    buf.write_all(b"defghijklmnop").unwrap();
    assert!(!buf.is_inline());
    assert_eq!(buf.reallocations(), 1);
    assert_eq!(buf.as_bytes(), b"abcdefghijklmnop");
}

#[test]
fn io_write_macro_formats_into_buffer() {
    let mut buf = PrintBuf::<4>::new();
    write!(buf, "{}-{:>4}", 12, "ab").unwrap();
    assert_eq!(buf.as_bytes(), b"12-  ab");
}

#[test]
fn flush_is_a_no_op() {
    let mut buf = PrintBuf::<8>::new();
    buf.write_all(b"keep").unwrap();
    buf.flush().unwrap();
    buf.append(Flush).unwrap();
    assert_eq!(buf.as_bytes(), b"keep");
}

#[test]
fn copies_from_a_reader() {
    let mut buf = PrintBuf::<16>::new();
    let text = "line one\nline two\nline three\n";
    let n = io::copy(&mut text.as_bytes(), &mut buf).unwrap();
    assert_eq!(n, text.len() as u64);
    assert_eq!(buf.as_bytes(), text.as_bytes());
}
