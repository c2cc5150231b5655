use std::io;

use log::{debug, warn};

use crate::buffer::{InputBuffer, OutputBuffer};
use crate::config::BufferConfig;
use crate::error::{Direction, Error, Result};
use crate::transport::Transport;

/// A buffered transport wrapper.
///
/// Adds an input buffer and an output buffer in front of any transport.
/// Each buffer exists only when the wrapped transport exposes the matching
/// endpoint; buffers are built at construction and rebuilt on every
/// [`open`](Transport::open).
///
/// Small writes accumulate until the output buffer would overflow or
/// [`flush`](Transport::flush) is called. [`close`](Transport::close) always
/// flushes pending output before closing the wrapped transport.
///
/// All operations take `&mut self`; input and output state are not
/// synchronized for use from several threads.
#[derive(Debug)]
pub struct BufferedTransport<T> {
    inner: T,
    config: BufferConfig,
    input: Option<InputBuffer>,
    output: Option<OutputBuffer>,
}

impl<T: Transport> BufferedTransport<T> {
    /// Wraps `inner` with 1024-byte buffers.
    pub fn new(inner: T) -> Self {
        let mut transport = Self {
            inner,
            config: BufferConfig::default(),
            input: None,
            output: None,
        };
        transport.initialize_buffers();
        transport
    }

    /// Wraps `inner` with both buffers sized to `capacity`.
    pub fn with_capacity(inner: T, capacity: usize) -> Result<Self> {
        Self::with_config(inner, BufferConfig::new().with_capacity(capacity))
    }

    pub fn with_config(inner: T, config: BufferConfig) -> Result<Self> {
        config.validate()?;
        let mut transport = Self {
            inner,
            config,
            input: None,
            output: None,
        };
        transport.initialize_buffers();
        Ok(transport)
    }

    /// Returns a reference to the wrapped transport.
    pub fn underlying(&self) -> &T {
        &self.inner
    }

    /// Returns a mutable reference to the wrapped transport.
    ///
    /// I/O issued here bypasses the buffers; mixing it with buffered calls
    /// leaves the byte order unspecified.
    pub fn underlying_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Flushes pending output and returns the wrapped transport.
    ///
    /// Unread buffered input is discarded.
    pub fn into_inner(mut self) -> Result<T> {
        if let Some(output) = self.output.as_mut() {
            if output.is_writable() {
                output.flush(&mut self.inner)?;
            }
        }
        Ok(self.inner)
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Returns the number of bytes buffered for reading.
    pub fn read_buffered(&self) -> usize {
        self.input.as_ref().map_or(0, InputBuffer::buffered)
    }

    /// Returns the number of bytes buffered for writing.
    pub fn write_buffered(&self) -> usize {
        self.output.as_ref().map_or(0, OutputBuffer::pending)
    }

    /// Rebuilds the buffers from the endpoints the wrapped transport
    /// currently exposes.
    fn initialize_buffers(&mut self) {
        self.input = self
            .inner
            .has_input()
            .then(|| InputBuffer::new(self.config.read_capacity));
        self.output = self
            .inner
            .has_output()
            .then(|| OutputBuffer::new(self.config.write_capacity));
        debug!(
            "buffers initialized: input={:?} output={:?}",
            self.input.as_ref().map(InputBuffer::capacity),
            self.output.as_ref().map(OutputBuffer::capacity),
        );
    }
}

impl<T: Transport> Transport for BufferedTransport<T> {
    fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Opens the wrapped transport and rebuilds the buffers.
    ///
    /// Output still pending in the old buffer is written to the freshly
    /// opened transport before the buffer is replaced. Unread input is
    /// dropped.
    ///
    /// If that write fails the error is returned with the wrapped transport
    /// already open and the old buffers kept, so the undelivered bytes stay
    /// in `write_buffered()` and a later `flush` or
    /// `close` can still deliver them.
    fn open(&mut self) -> Result<()> {
        self.inner.open()?;

        if let Some(output) = self.output.as_mut() {
            if output.is_writable() && output.pending() > 0 {
                debug!("writing {} pending bytes before rebuilding buffers", output.pending());
                output.flush(&mut self.inner)?;
            }
        }

        self.initialize_buffers();
        debug!("buffered transport opened");
        Ok(())
    }

    /// Closes the input buffer, flushes and closes the output buffer, then
    /// closes the wrapped transport.
    ///
    /// Every step runs even if an earlier one fails; the first error is
    /// returned.
    fn close(&mut self) -> Result<()> {
        let mut first_err: Option<Error> = None;

        if let Some(input) = self.input.as_mut() {
            if input.is_readable() {
                input.close();
            }
        }

        if let Some(output) = self.output.as_mut() {
            if output.is_writable() {
                if let Err(e) = output.close(&mut self.inner) {
                    warn!("failed to flush output buffer on close: {}", e);
                    first_err.get_or_insert(e);
                }
            }
        }

        if let Err(e) = self.inner.close() {
            warn!("failed to close underlying transport: {}", e);
            first_err.get_or_insert(e);
        }

        debug!("buffered transport closed");
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.input.as_mut() {
            Some(input) => input.read(&mut self.inner, buf),
            None => Err(Error::Unsupported(Direction::Input)),
        }
    }

    fn write(&mut self, buf: &[u8]) -> Result<()> {
        match self.output.as_mut() {
            Some(output) => output.write(&mut self.inner, buf),
            None => Err(Error::Unsupported(Direction::Output)),
        }
    }

    /// Writes all pending output through. A no-op without an output
    /// endpoint.
    fn flush(&mut self) -> Result<()> {
        match self.output.as_mut() {
            Some(output) => output.flush(&mut self.inner),
            None => Ok(()),
        }
    }

    fn has_input(&self) -> bool {
        self.input.is_some()
    }

    fn has_output(&self) -> bool {
        self.output.is_some()
    }
}

impl<T: Transport> io::Read for BufferedTransport<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(Transport::read(self, buf)?)
    }
}

impl<T: Transport> io::BufRead for BufferedTransport<T> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        let input = self
            .input
            .as_mut()
            .ok_or(Error::Unsupported(Direction::Input))?;
        Ok(input.fill_buf(&mut self.inner)?)
    }

    fn consume(&mut self, amt: usize) {
        if let Some(input) = self.input.as_mut() {
            input.consume(amt);
        }
    }
}

impl<T: Transport> io::Write for BufferedTransport<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Transport::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(Transport::flush(self)?)
    }
}
