use core::fmt;

use thiserror::Error;

/// Side of a transport an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The read side.
    Input,
    /// The write side.
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCapacity,
    Unsupported,
    Closed,
    Io,
}

/// Errors raised by transports and buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// A buffer was configured with zero capacity.
    #[error("invalid buffer capacity: {0}")]
    InvalidCapacity(usize),

    /// The transport has no endpoint for the requested direction.
    #[error("transport has no {0} endpoint")]
    Unsupported(Direction),

    /// The buffer or transport has already been closed.
    #[error("transport is closed")]
    Closed,

    /// Failure reported by the underlying stream, passed through untouched.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCapacity(_) => ErrorKind::InvalidCapacity,
            Error::Unsupported(_) => ErrorKind::Unsupported,
            Error::Closed => ErrorKind::Closed,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> std::io::Error {
        match err {
            Error::Io(inner) => inner,
            other => {
                let kind = match other.kind() {
                    ErrorKind::InvalidCapacity => std::io::ErrorKind::InvalidInput,
                    ErrorKind::Unsupported => std::io::ErrorKind::Unsupported,
                    ErrorKind::Closed => std::io::ErrorKind::NotConnected,
                    ErrorKind::Io => std::io::ErrorKind::Other,
                };
                std::io::Error::new(kind, other)
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
