use alloc::vec::Vec;

use quickcheck::QuickCheck;

use crate::PrintBuf;

/// Property: growing never moves or alters bytes already written, and every
/// growth leaves at least the requested room.
#[test]
fn growth_preserves_prefix() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(chunks: Vec<Vec<u8>>) -> bool {
        let mut buf = PrintBuf::<4>::new();
        let mut expected: Vec<u8> = Vec::new();
        for chunk in &chunks {
            let before = buf.reallocations();
            if buf.reserve(chunk.len()).is_err() || buf.remaining() < chunk.len() {
                return false;
            }
            if buf.as_bytes() != expected.as_slice() {
                return false;
            }
            let grew = buf.reallocations() - before;
            if grew > 1 {
                return false;
            }
            buf.write_bytes(chunk).unwrap();
            buf.assert_invariants();
            if buf.reallocations() - before != grew {
                return false;
            }
            expected.extend_from_slice(chunk);
        }
        buf.as_bytes() == expected.as_slice() && buf.as_bytes_with_nul().last() == Some(&0)
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Vec<Vec<u8>>) -> bool);
}

/// Property: the capacity after a growth is `old + requested + N`.
#[quickcheck_macros::quickcheck]
fn growth_formula(prefix: u8, request: u16) -> bool {
    let mut buf = PrintBuf::<8>::new();
    let prefix = usize::from(prefix % 8);
    let request = usize::from(request);
    buf.write_bytes(&[b'x'; 8][..prefix.min(7)]).unwrap();
    let old = buf.capacity();
    let must_grow = request > buf.remaining();
    buf.reserve(request).unwrap();
    if must_grow {
        buf.capacity() == old + request + 8 && buf.reallocations() == 1
    } else {
        buf.capacity() == old && buf.reallocations() == 0
    }
}
