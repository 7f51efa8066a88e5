/// Configuration for a [`PrintBuf`](crate::PrintBuf).
///
/// # Examples
///
/// ```rust
/// use printbuf::{BufferedPrint, PrintOptions};
///
/// let mut buf = BufferedPrint::with_options(PrintOptions {
///     precision: 2,
///     ..Default::default()
/// });
/// buf.append(1.239_f64).unwrap();
/// assert_eq!(buf.as_bytes(), b"1.24");
/// ```
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Number of fractional digits used when a float is appended without an
    /// explicit precision.
    ///
    /// Trailing zeros are trimmed from plain float appends, so this is an
    /// upper bound on the digits printed after the decimal point.
    ///
    /// # Default
    ///
    /// `6`
    pub precision: usize,

    /// Maximum number of `::`-separated scope segments printed for a
    /// [`SrcInfo`](crate::SrcInfo).
    ///
    /// # Default
    ///
    /// `3`
    pub max_src_scope: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            precision: 6,
            max_src_scope: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = PrintOptions::default();
        assert_eq!(o.precision, 6);
        assert_eq!(o.max_src_scope, 3);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let o: PrintOptions = serde_json::from_str(r#"{"precision":2}"#).unwrap();
        assert_eq!(
            o,
            PrintOptions {
                precision: 2,
                max_src_scope: 3
            }
        );
    }
}
