//! Pump error types
//!
//! Failures that terminate a single viewer connection. They are logged
//! and isolated; the producer and other viewers never see them.

/// Error type for a connection pump
#[derive(Debug, Clone)]
pub enum PumpError {
    /// A write (frame, ping or close) did not complete within the deadline
    WriteDeadlineExceeded,
    /// No inbound traffic arrived within the liveness deadline
    ReadDeadlineExceeded,
    /// The pump's outbound queue filled without draining
    QueueOverflow,
    /// The underlying transport failed
    Transport(String),
}

impl std::fmt::Display for PumpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PumpError::WriteDeadlineExceeded => write!(f, "write deadline exceeded"),
            PumpError::ReadDeadlineExceeded => write!(f, "read deadline exceeded"),
            PumpError::QueueOverflow => write!(f, "outbound queue overflow"),
            PumpError::Transport(reason) => write!(f, "transport error: {}", reason),
        }
    }
}

impl std::error::Error for PumpError {}
