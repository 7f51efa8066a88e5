use core::{fmt, panic::Location};

use crate::{Encode, PrintBuf, PrintError};

/// Bytes reserved before rendering a location; most fit without a retry.
const SRC_INFO_RESERVE: usize = 64;

/// A source location: file, line and an optional `::`-separated scope.
///
/// Appended as `[file:line scope]`, with the file reduced to its base name
/// and the scope to its last [`max_src_scope`](crate::PrintOptions) segments.
///
/// ```rust
/// use printbuf::{SrcInfo, print_string};
///
/// let at = SrcInfo::new("src/net/conn.rs", 42, "app::net::conn::Conn::read");
/// assert_eq!(print_string(at).unwrap(), "[conn.rs:42 conn::Conn::read]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SrcInfo {
    file: &'static str,
    line: u32,
    scope: &'static str,
}

impl SrcInfo {
    /// Builds a location. `scope` may be empty.
    #[must_use]
    pub const fn new(file: &'static str, line: u32, scope: &'static str) -> Self {
        Self { file, line, scope }
    }

    /// The location of the caller, without a scope.
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        let at = Location::caller();
        Self::new(at.file(), at.line(), "")
    }

    /// Full file path as captured.
    #[must_use]
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Line number.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Full scope as captured.
    #[must_use]
    pub fn scope(&self) -> &'static str {
        self.scope
    }

    /// File name without directories.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }

    /// The last `depth` segments of the scope.
    #[must_use]
    pub fn scope_tail(&self, depth: usize) -> &'static str {
        if depth == 0 {
            return "";
        }
        self.scope
            .rmatch_indices("::")
            .nth(depth - 1)
            .map_or(self.scope, |(i, sep)| &self.scope[i + sep.len()..])
    }

    /// Display adapter for the bracketed form.
    #[must_use]
    pub fn bracketed(&self, max_scope: usize) -> Bracketed {
        Bracketed {
            info: *self,
            max_scope,
        }
    }
}

impl From<&Location<'static>> for SrcInfo {
    fn from(at: &Location<'static>) -> Self {
        Self::new(at.file(), at.line(), "")
    }
}

/// `[file:line scope]` rendering of a [`SrcInfo`].
#[derive(Debug, Clone, Copy)]
pub struct Bracketed {
    info: SrcInfo,
    max_scope: usize,
}

impl fmt::Display for Bracketed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.info.scope_tail(self.max_scope);
        write!(f, "[{}:{}", self.info.file_name(), self.info.line)?;
        if !scope.is_empty() {
            write!(f, " {scope}")?;
        }
        f.write_str("]")
    }
}

impl Encode for SrcInfo {
    fn encode<const N: usize>(&self, buf: &mut PrintBuf<N>) -> Result<(), PrintError> {
        buf.reserve(SRC_INFO_RESERVE)?;
        let bracketed = self.bracketed(buf.options().max_src_scope);
        buf.format_two_phase(format_args!("{bracketed}"), "printbuf::SrcInfo")
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use rstest::rstest;

    use super::*;
    use crate::{BufferedPrint, PrintOptions};

    const AT: SrcInfo = SrcInfo::new("a/b/c.rs", 7, "x::y::z::f");

    #[rstest]
    #[case(0, "[c.rs:7]")]
    #[case(1, "[c.rs:7 f]")]
    #[case(3, "[c.rs:7 y::z::f]")]
    #[case(4, "[c.rs:7 x::y::z::f]")]
    #[case(9, "[c.rs:7 x::y::z::f]")]
    fn scope_depth(#[case] depth: usize, #[case] expected: &str) {
        let mut b = BufferedPrint::with_options(PrintOptions {
            max_src_scope: depth,
            ..Default::default()
        });
        b.append(AT).unwrap();
        assert_eq!(b.to_string(), expected);
    }

    #[test]
    fn no_scope_no_space() {
        assert_eq!(SrcInfo::new("m.rs", 1, "").bracketed(3).to_string(), "[m.rs:1]");
    }

    #[test]
    fn windows_paths() {
        assert_eq!(SrcInfo::new(r"src\lib.rs", 1, "").file_name(), "lib.rs");
    }

    #[test]
    fn caller_points_here() {
        let at = SrcInfo::caller();
        assert_eq!(at.file_name(), "location.rs");
        assert_eq!(at.line(), line!() - 2);
    }

    #[test]
    fn macro_captures_module_path() {
        let at = crate::src_info!();
        assert_eq!(at.scope(), module_path!());
        assert_eq!(at.scope_tail(2), "location::tests");
    }

    #[test]
    fn long_scope_outgrows_reserve() {
        let scope: &'static str = "a_very_long_module_name::another_very_long_module_name::and_a_long_function_name";
        let mut b = PrintBuf::<16>::new();
        b.append(SrcInfo::new("f.rs", 123_456, scope)).unwrap();
        assert_eq!(b.len(), "[f.rs:123456 ]".len() + scope.len());
    }
}
