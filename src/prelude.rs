use std::fmt;

/// Error type for gradnet
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Indicates some vector length does not match the network topology.
    DimensionErr,
    /// Indicates a training-record line is missing its tag or holds an
    /// unreadable value.
    RecordErr(String),
    /// Indicates the underlying training-data stream failed.
    IoErr(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionErr => write!(f, "vector length does not match topology"),
            Error::RecordErr(msg) => write!(f, "malformed training record: {msg}"),
            Error::IoErr(msg) => write!(f, "training data stream: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoErr(err.to_string())
    }
}
