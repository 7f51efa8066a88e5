use alloc::collections::TryReserveError;

use bstr::BString;
use thiserror::Error;

/// Failure of an append.
///
/// Only two things can go wrong: the buffer cannot grow, or a value handed to
/// the generic textual fallback refuses to format itself. Everything else
/// (a `None` C string, a string longer than its field, resetting an empty
/// buffer) is defined behavior rather than an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    /// The allocator refused to provide the grown region. The buffer keeps
    /// its previous contents and capacity.
    #[error("failed to grow print buffer to {requested} bytes")]
    Alloc {
        /// Usable capacity that was being requested.
        requested: usize,
        /// Allocator failure.
        #[source]
        source: TryReserveError,
    },

    /// The requested capacity does not fit in `usize`.
    #[error("print buffer capacity overflow ({requested} more bytes requested)")]
    CapacityOverflow {
        /// Number of free bytes that was being guaranteed.
        requested: usize,
    },

    /// A value's `Display` implementation reported an error.
    #[error("writing of {type_name} {partial:?} not supported")]
    Unsupported {
        /// `core::any::type_name` of the offending value.
        type_name: &'static str,
        /// Whatever the value managed to render before failing.
        partial: BString,
    },
}
