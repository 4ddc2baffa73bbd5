use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The provider could not be configured, e.g. no credential was found.
    Configuration,
    /// The upstream service answered with a non-success status.
    Upstream,
    /// The request never got a response (connection, TLS, IO).
    Transport,
    /// The caller's input is structurally invalid.
    Structural,
    /// The upstream answered successfully but the payload is unusable.
    MalformedResponse,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "Configuration error"),
            ErrorKind::Upstream => write!(f, "Upstream error"),
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::Structural => write!(f, "Structural error"),
            ErrorKind::MalformedResponse => write!(f, "Malformed response"),
        }
    }
}

/// Error returned when a loosely-typed record can't be coerced into a
/// [`Message`](crate::Message).
#[derive(Debug, thiserror::Error)]
#[error("invalid message record at index {index}: {source}")]
pub struct MessageError {
    index: usize,
    #[source]
    source: serde_json::Error,
}

impl MessageError {
    #[inline]
    pub(crate) fn new(index: usize, source: serde_json::Error) -> Self {
        Self { index, source }
    }

    /// Position of the offending record in the input list.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}
