//! Error types for digital net construction.
//!
//! Loading a net can fail in two broad ways: the data is malformed (a format
//! error) or the requested family/parameterization simply is not in the
//! backing store (data unavailable). Both are fatal to that construction
//! attempt; no partial engine is ever returned, because silently substituting
//! generating matrices would produce a numerically wrong integral estimate,
//! not just a slow one. Once an engine is constructed, point generation
//! cannot fail.
//!
//! Range queries deliberately do *not* use this type: probing an unknown
//! family answers with a negative sentinel (see [`crate::loader`]) so callers
//! can scan parameterizations defensively.

use thiserror::Error;

/// Errors that can occur while loading generating matrices.
#[derive(Debug, Error)]
pub enum NetError {
    /// The stream header declared a word width other than 32 or 64.
    #[error("unsupported bit width {found}, expected 32 or 64")]
    UnsupportedBitWidth {
        /// The width found in the header.
        found: u32,
    },

    /// The stream ended before the mandatory matrix body was complete.
    #[error("truncated stream: expected {expected} values, read {read}")]
    TruncatedStream {
        /// Number of values the header promised.
        expected: usize,
        /// Number of values actually read.
        read: usize,
    },

    /// A token could not be parsed as the expected number.
    #[error("invalid token {token:?}")]
    InvalidToken {
        /// The offending token.
        token: String,
    },

    /// A Sobol table file did not start with the expected magic number.
    #[error("bad magic number in Sobol table file")]
    BadMagic,

    /// The requested shape exceeds what a table file provides.
    #[error("requested s = {s}, m = {m} outside table extent s_max = {s_max}, m_max = {m_max}")]
    OutOfTable {
        /// Requested dimension.
        s: u32,
        /// Requested resolution.
        m: u32,
        /// Dimensions available in the file.
        s_max: u32,
        /// Resolutions available in the file.
        m_max: u32,
    },

    /// No data for the named family at the requested parameterization.
    #[error("no data for family {family:?} with s = {s}, m = {m}")]
    NotFound {
        /// Backing-store key of the family.
        family: &'static str,
        /// Requested dimension.
        s: u32,
        /// Requested resolution.
        m: u32,
    },

    /// An underlying I/O operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
