//! Crate-level error types
//!
//! Errors surfaced by the producer-facing device API. Per-connection
//! failures never appear here: they are isolated to the offending pump
//! and reported through logging (see [`crate::hub::PumpError`]).

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for device operations
#[derive(Debug)]
pub enum Error {
    /// `init` was called on an already-initialized device
    AlreadyInitialized,
    /// The device has not been initialized yet
    NotInitialized,
    /// Channel index is outside the device's channel range
    ChannelOutOfRange {
        /// The offending channel index
        channel: usize,
    },
    /// A write was larger than the channel's configured LED count
    LengthExceeded {
        /// Length of the attempted write
        len: usize,
        /// Configured capacity of the channel
        capacity: usize,
    },
    /// Frame payload serialization failed
    Frame(serde_json::Error),
    /// I/O error (server bind/accept)
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::AlreadyInitialized => write!(f, "Device already initialized"),
            Error::NotInitialized => write!(f, "Device not initialized"),
            Error::ChannelOutOfRange { channel } => {
                write!(f, "Channel index out of range: {}", channel)
            }
            Error::LengthExceeded { len, capacity } => {
                write!(f, "Too many LEDs: {} exceeds channel capacity {}", len, capacity)
            }
            Error::Frame(e) => write!(f, "Can't serialize frame: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Frame(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Frame(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
