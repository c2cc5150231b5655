//! Write-side staging buffer.

use log::trace;

use crate::buffer::RingBuffer;
use crate::error::{Error, Result};
use crate::transport::Transport;

/// Accumulates writes and hands them to the sink transport in batches.
///
/// Bytes reach the sink only when the buffer would overflow, on
/// [`flush`](Self::flush), or on [`close`](Self::close).
#[derive(Debug)]
pub struct OutputBuffer {
    ring: RingBuffer,
    writable: bool,
}

impl OutputBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: RingBuffer::with_capacity(capacity),
            writable: true,
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Bytes accepted but not yet written to the sink.
    pub fn pending(&self) -> usize {
        self.ring.len()
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Stages `data`, draining to the sink first if it would not fit.
    ///
    /// Writes of at least `capacity` bytes go straight to the sink once the
    /// pending bytes ahead of them are out.
    pub fn write<T: Transport + ?Sized>(&mut self, sink: &mut T, data: &[u8]) -> Result<()> {
        if !self.writable {
            return Err(Error::Closed);
        }

        if data.len() > self.ring.remaining() {
            self.drain(sink)?;
        }

        if data.len() >= self.ring.capacity() {
            sink.write(data)?;
            trace!("direct write of {} bytes", data.len());
        } else {
            self.ring.write(data);
        }
        Ok(())
    }

    /// Writes every pending byte to the sink, then flushes the sink.
    pub fn flush<T: Transport + ?Sized>(&mut self, sink: &mut T) -> Result<()> {
        if !self.writable {
            return Err(Error::Closed);
        }
        self.drain(sink)?;
        sink.flush()
    }

    /// Flushes, then refuses further writes.
    ///
    /// The buffer is marked closed even if the flush fails.
    pub fn close<T: Transport + ?Sized>(&mut self, sink: &mut T) -> Result<()> {
        if !self.writable {
            return Ok(());
        }
        let result = self.flush(sink);
        self.ring.clear();
        self.writable = false;
        result
    }

    fn drain<T: Transport + ?Sized>(&mut self, sink: &mut T) -> Result<()> {
        while !self.ring.is_empty() {
            let n = {
                let (chunk, _) = self.ring.as_slices();
                sink.write(chunk)?;
                chunk.len()
            };
            self.ring.skip(n);
            trace!("drained {} bytes from output buffer", n);
        }
        Ok(())
    }
}
