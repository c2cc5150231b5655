//! Read-side staging buffer.

use log::trace;

use crate::buffer::RingBuffer;
use crate::error::{Error, Result};
use crate::transport::Transport;

/// Batches small reads into capacity-sized reads on the source transport.
///
/// The buffer does not own its source; every call that may touch the
/// endpoint takes it as an argument.
#[derive(Debug)]
pub struct InputBuffer {
    ring: RingBuffer,
    readable: bool,
}

impl InputBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: RingBuffer::with_capacity(capacity),
            readable: true,
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Bytes fetched from the source but not yet handed out.
    pub fn buffered(&self) -> usize {
        self.ring.len()
    }

    pub fn is_readable(&self) -> bool {
        self.readable
    }

    /// Reads into `buf`, returning how many bytes were copied.
    ///
    /// Buffered bytes are served first without touching the source. When the
    /// buffer is empty a single read is issued on the source, so the result
    /// may be shorter than `buf`. Zero means end of stream.
    pub fn read<T: Transport + ?Sized>(&mut self, source: &mut T, buf: &mut [u8]) -> Result<usize> {
        if !self.readable {
            return Err(Error::Closed);
        }
        if buf.is_empty() {
            return Ok(0);
        }

        if self.ring.is_empty() {
            // Large reads skip the staging copy.
            if buf.len() >= self.ring.capacity() {
                let n = source.read(buf)?;
                trace!("direct read of {} bytes", n);
                return Ok(n);
            }
            if self.fill(source)? == 0 {
                return Ok(0);
            }
        }

        Ok(self.ring.read(buf))
    }

    /// Returns the buffered bytes, reading from the source if none are held.
    pub fn fill_buf<T: Transport + ?Sized>(&mut self, source: &mut T) -> Result<&[u8]> {
        if !self.readable {
            return Err(Error::Closed);
        }
        if self.ring.is_empty() {
            self.fill(source)?;
        }
        Ok(self.ring.as_slices().0)
    }

    /// Marks `amt` bytes returned by [`fill_buf`](Self::fill_buf) as consumed.
    pub fn consume(&mut self, amt: usize) {
        self.ring.skip(amt);
    }

    /// Drops anything still buffered and refuses further reads.
    pub fn close(&mut self) {
        if self.ring.len() > 0 {
            trace!("discarding {} unread bytes", self.ring.len());
        }
        self.ring.clear();
        self.readable = false;
    }

    fn fill<T: Transport + ?Sized>(&mut self, source: &mut T) -> Result<usize> {
        let (space, _) = self.ring.as_mut_slices();
        let n = source.read(space)?;
        self.ring.advance_write(n);
        trace!("filled input buffer with {} bytes", n);
        Ok(n)
    }
}
