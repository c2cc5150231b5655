use log::trace;

use crate::error::{Direction, Error, Result};
use crate::transport::Transport;

/// Call counters kept by [`LoopbackTransport`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopbackStats {
    pub open_calls: usize,
    pub close_calls: usize,
    pub read_calls: usize,
    pub write_calls: usize,
    pub flush_calls: usize,
}

/// A loopback transport for testing.
///
/// Data written becomes readable in order. The transport starts closed and
/// tolerates repeated `close` calls. A read with nothing pending returns 0.
#[derive(Debug)]
pub struct LoopbackTransport {
    /// Bytes waiting to be read.
    buffer: Vec<u8>,

    /// Read position in `buffer`.
    read_pos: usize,

    /// Every byte ever written, in order.
    written: Vec<u8>,

    open: bool,
    input: bool,
    output: bool,

    /// Upper bound on bytes returned by a single read.
    read_chunk: Option<usize>,

    stats: LoopbackStats,
}

impl LoopbackTransport {
    /// Creates a closed loopback with both endpoints.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            read_pos: 0,
            written: Vec::new(),
            open: false,
            input: true,
            output: true,
            read_chunk: None,
            stats: LoopbackStats::default(),
        }
    }

    /// A loopback without a write endpoint. Use [`feed`](Self::feed) to
    /// supply readable data.
    pub fn read_only() -> Self {
        Self {
            output: false,
            ..Self::new()
        }
    }

    /// A loopback without a read endpoint.
    pub fn write_only() -> Self {
        Self {
            input: false,
            ..Self::new()
        }
    }

    /// Caps every read at `chunk` bytes.
    pub fn with_read_chunk(mut self, chunk: usize) -> Self {
        self.read_chunk = Some(chunk);
        self
    }

    /// Queues bytes for reading without recording them as written.
    pub fn feed(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Returns the number of bytes available to read.
    pub fn available(&self) -> usize {
        self.buffer.len() - self.read_pos
    }

    /// Everything written so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    pub fn stats(&self) -> LoopbackStats {
        self.stats
    }
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for LoopbackTransport {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self) -> Result<()> {
        self.stats.open_calls += 1;
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.stats.close_calls += 1;
        self.open = false;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.input {
            return Err(Error::Unsupported(Direction::Input));
        }
        if !self.open {
            return Err(Error::Closed);
        }
        self.stats.read_calls += 1;

        let limit = self.read_chunk.unwrap_or(usize::MAX);
        let to_read = buf.len().min(self.available()).min(limit);
        buf[..to_read].copy_from_slice(&self.buffer[self.read_pos..self.read_pos + to_read]);
        self.read_pos += to_read;

        // Reset buffer if fully consumed
        if self.read_pos >= self.buffer.len() {
            self.buffer.clear();
            self.read_pos = 0;
        }

        trace!("loopback read {} bytes", to_read);
        Ok(to_read)
    }

    fn write(&mut self, buf: &[u8]) -> Result<()> {
        if !self.output {
            return Err(Error::Unsupported(Direction::Output));
        }
        if !self.open {
            return Err(Error::Closed);
        }
        self.stats.write_calls += 1;
        self.buffer.extend_from_slice(buf);
        self.written.extend_from_slice(buf);
        trace!("loopback wrote {} bytes", buf.len());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stats.flush_calls += 1;
        Ok(())
    }

    fn has_input(&self) -> bool {
        self.input
    }

    fn has_output(&self) -> bool {
        self.output
    }
}
