//! Error types for a single poll.

use thiserror::Error;

/// Everything that can stop a poll before a gauge is printed.
///
/// All of these are terminal: the caller reports the message and exits
/// with status 1, leaving retries to whoever invoked the tool.
#[derive(Debug, Error)]
pub enum Error {
    /// No OID was requested.
    #[error("Missing option")]
    MissingArgument,

    /// The `server[:port[:device]]` argument could not be understood.
    #[error("invalid source {0}")]
    InvalidSource(String),

    /// The session to gpsd could not be opened.
    #[error("connection failed: {0}")]
    ConnectionFailure(String),

    /// Reading or decoding from an open session failed.
    #[error("read failed: {0}")]
    TransportFailure(String),

    /// The deadline passed without a satellite report.
    #[error("timeout")]
    Timeout,

    /// The requested OID is not one of the known gauges.
    #[error("Unknown OID {0}")]
    UnknownIdentifier(String),
}

impl Error {
    /// Whether the usage text should follow the error message.
    pub fn shows_usage(&self) -> bool {
        matches!(self, Error::MissingArgument | Error::UnknownIdentifier(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::TransportFailure(err.to_string())
    }
}
