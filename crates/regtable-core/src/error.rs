//! Error types for regtable-core
//!
//! Decoding and analysis never fail. The only structural errors come from
//! selecting the byte window that holds the table.

use core::fmt;

use crate::entry::ENTRY_SIZE;

/// Errors raised while selecting a table window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The window length is zero
    EmptyWindow,
    /// The window length is not a whole number of entries
    UnalignedLength {
        /// Requested length in bytes
        len: usize,
        /// Nearest valid length below, if any
        lower: Option<usize>,
        /// Nearest valid length above, if it fits in `usize`
        upper: Option<usize>,
    },
    /// The window extends past the end of the input
    OutOfBounds {
        /// Requested start offset
        offset: usize,
        /// Requested length
        len: usize,
        /// Size of the input
        available: usize,
    },
}

impl TableError {
    /// Build an [`TableError::UnalignedLength`] with the suggestions that exist
    pub fn unaligned(len: usize) -> Self {
        let upper = len.checked_next_multiple_of(ENTRY_SIZE);
        let lower = (len > ENTRY_SIZE).then(|| len / ENTRY_SIZE * ENTRY_SIZE);
        Self::UnalignedLength { len, lower, upper }
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWindow => write!(f, "table length must be non-zero"),
            Self::UnalignedLength { len, lower, upper } => {
                write!(
                    f,
                    "table length {} is not a multiple of {} bytes",
                    len, ENTRY_SIZE
                )?;
                match (upper, lower) {
                    (Some(upper), Some(lower)) => write!(f, " (try {} or {})", upper, lower),
                    (Some(only), None) | (None, Some(only)) => write!(f, " (try {})", only),
                    (None, None) => Ok(()),
                }
            }
            Self::OutOfBounds {
                offset,
                len,
                available,
            } => write!(
                f,
                "range 0x{:X}+0x{:X} exceeds input of {} bytes",
                offset, len, available
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TableError {}

/// Result type alias using [`TableError`]
pub type Result<T> = core::result::Result<T, TableError>;
