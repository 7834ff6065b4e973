//! Error types for slotlru

use std::fmt;

/// Result type alias for slotlru operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction
///
/// Lookups never fail: a missing key is reported as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Capacity of zero was requested
    ZeroCapacity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "Cache capacity must be greater than 0"),
        }
    }
}

impl std::error::Error for Error {}
