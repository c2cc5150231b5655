//! # BufTransport - Buffered Byte Transports
//!
//! BufTransport puts independently sized input and output buffers in front
//! of any byte transport, so that many small reads and writes turn into a
//! few large ones on the wrapped connection.
//!
//! - **Drop-in decorator**: `BufferedTransport` implements the same
//!   `Transport` trait it wraps
//! - **Optional endpoints**: read-only and write-only transports get only
//!   the buffer they can use
//! - **Flush on close**: buffered output is never dropped by `close`
//! - **std::io bridge**: buffered transports implement `Read`, `BufRead`
//!   and `Write`
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Application Layer                     │
//! ├─────────────────────────────────────────────────────────┤
//! │                   BufferedTransport                      │
//! │  ┌──────────────────────┐  ┌──────────────────────┐     │
//! │  │     InputBuffer      │  │     OutputBuffer     │     │
//! │  └──────────────────────┘  └──────────────────────┘     │
//! ├─────────────────────────────────────────────────────────┤
//! │                    Transport Layer                       │
//! │  ┌─────────────────────────────────────────────────┐   │
//! │  │   Any Transport (stream, loopback, custom...)    │   │
//! │  └─────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::net::TcpStream;
//! use buftransport::{BufferedTransport, StreamTransport, Transport};
//!
//! let stream = TcpStream::connect("127.0.0.1:7878")?;
//! let inner = StreamTransport::new(stream.try_clone()?, stream);
//! let mut transport = BufferedTransport::with_capacity(inner, 4096)?;
//!
//! transport.write(b"Hello, World!")?;
//! transport.flush()?;
//!
//! let mut buf = [0u8; 1024];
//! let n = transport.read(&mut buf)?;
//! transport.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]

pub(crate) mod buffer;
pub mod config;
pub mod error;
pub mod transport;

pub use config::BufferConfig;
pub use error::{Direction, Error, ErrorKind, Result};
pub use transport::{BufferedTransport, LoopbackStats, LoopbackTransport, StreamTransport, Transport};

/// Default capacity of each buffer, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;
