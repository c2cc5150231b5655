//! Transport layer abstraction.
//!
//! [`Transport`] is the capability shared by raw and buffered transports, so
//! callers can hold either one behind the same bound.
//!
//! # Implementations
//!
//! - `BufferedTransport`: adds input and output buffering to any transport
//! - `StreamTransport`: wraps optional `std::io` reader and writer halves
//! - `LoopbackTransport`: in-memory loopback for testing
//!
//! # Example
//!
//! ```rust
//! use buftransport::{BufferedTransport, LoopbackTransport, Transport};
//!
//! let mut transport = BufferedTransport::new(LoopbackTransport::new());
//! transport.open()?;
//! transport.write(b"Hello")?;
//! transport.flush()?;
//!
//! let mut buf = [0u8; 32];
//! let n = transport.read(&mut buf)?;
//! assert_eq!(&buf[..n], b"Hello");
//! # Ok::<(), buftransport::Error>(())
//! ```

mod buffered;
mod loopback;
mod stream;

pub use buffered::BufferedTransport;
pub use loopback::{LoopbackStats, LoopbackTransport};
pub use stream::StreamTransport;

use crate::error::{Error, Result};

/// A bidirectional byte transport with an explicit open/closed lifecycle.
///
/// Either endpoint may be missing: a read-only transport reports
/// `has_output() == false`, a write-only one `has_input() == false`.
pub trait Transport {
    /// Whether the connection is currently open.
    fn is_open(&self) -> bool;

    /// Opens the connection.
    fn open(&mut self) -> Result<()>;

    /// Closes the connection.
    fn close(&mut self) -> Result<()>;

    /// Reads bytes into the buffer.
    ///
    /// Returns the number of bytes read, which may be fewer than requested.
    /// Zero signals end of stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Writes the whole buffer.
    fn write(&mut self, buf: &[u8]) -> Result<()>;

    /// Pushes any data held by the transport to its destination.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Whether the transport has a read endpoint.
    fn has_input(&self) -> bool {
        true
    }

    /// Whether the transport has a write endpoint.
    fn has_output(&self) -> bool {
        true
    }

    /// Reads until `buf` is full, failing with `UnexpectedEof` if the stream
    /// ends first.
    fn read_exact(&mut self, mut buf: &mut [u8]) -> Result<()> {
        while !buf.is_empty() {
            match self.read(buf)? {
                0 => {
                    return Err(Error::Io(std::io::Error::from(
                        std::io::ErrorKind::UnexpectedEof,
                    )));
                }
                n => {
                    let tmp = buf;
                    buf = &mut tmp[n..];
                }
            }
        }
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<()> {
        (**self).write(buf)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn has_input(&self) -> bool {
        (**self).has_input()
    }

    fn has_output(&self) -> bool {
        (**self).has_output()
    }
}
