//! Ring buffer backing both staging buffers.
//!
//! Capacity is chosen at run time and never changes afterwards.

/// A fixed-capacity ring buffer for FIFO byte staging.
#[derive(Debug)]
pub struct RingBuffer {
    /// The underlying storage.
    buffer: Box<[u8]>,

    /// Read position (head).
    head: usize,

    /// Write position (tail).
    tail: usize,

    /// Current number of bytes in buffer.
    len: usize,
}

impl RingBuffer {
    /// Creates an empty ring buffer holding at most `capacity` bytes.
    ///
    /// `capacity` must be non-zero; callers go through
    /// [`BufferConfig::validate`](crate::BufferConfig::validate) first.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            buffer: vec![0u8; capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of bytes that can still be written.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    /// Copies as much of `data` as fits, returning the number of bytes taken.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let to_write = core::cmp::min(data.len(), self.remaining());
        if to_write == 0 {
            return 0;
        }

        let cap = self.capacity();
        let first_chunk = core::cmp::min(to_write, cap - self.tail);
        self.buffer[self.tail..self.tail + first_chunk].copy_from_slice(&data[..first_chunk]);

        if to_write > first_chunk {
            let second_chunk = to_write - first_chunk;
            self.buffer[..second_chunk].copy_from_slice(&data[first_chunk..to_write]);
        }

        self.tail = (self.tail + to_write) % cap;
        self.len += to_write;

        to_write
    }

    /// Moves up to `buf.len()` bytes out of the buffer.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = self.peek(buf);
        self.skip(n)
    }

    /// Copies buffered bytes without consuming them.
    pub fn peek(&self, buf: &mut [u8]) -> usize {
        let to_read = core::cmp::min(buf.len(), self.len);
        if to_read == 0 {
            return 0;
        }

        let first_chunk = core::cmp::min(to_read, self.capacity() - self.head);
        buf[..first_chunk].copy_from_slice(&self.buffer[self.head..self.head + first_chunk]);

        if to_read > first_chunk {
            let second_chunk = to_read - first_chunk;
            buf[first_chunk..to_read].copy_from_slice(&self.buffer[..second_chunk]);
        }

        to_read
    }

    /// Consumes bytes without copying them out.
    pub fn skip(&mut self, count: usize) -> usize {
        let to_skip = core::cmp::min(count, self.len);
        if to_skip == 0 {
            return 0;
        }
        self.head = (self.head + to_skip) % self.capacity();
        self.len -= to_skip;
        if self.len == 0 {
            // Keep the next fill contiguous.
            self.head = 0;
            self.tail = 0;
        }
        to_skip
    }

    /// Returns the buffered bytes as up to two slices, oldest first.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        if self.len == 0 {
            return (&[], &[]);
        }

        let cap = self.capacity();
        if self.head + self.len <= cap {
            (&self.buffer[self.head..self.head + self.len], &[])
        } else {
            let second_len = self.len - (cap - self.head);
            (&self.buffer[self.head..], &self.buffer[..second_len])
        }
    }

    /// Returns the free space as up to two slices, in write order.
    pub fn as_mut_slices(&mut self) -> (&mut [u8], &mut [u8]) {
        let available = self.remaining();
        if available == 0 {
            return (&mut [], &mut []);
        }

        let cap = self.capacity();
        let tail = self.tail;
        if tail + available <= cap {
            (&mut self.buffer[tail..tail + available], &mut [])
        } else {
            let second_len = available - (cap - tail);
            let (front, back) = self.buffer.split_at_mut(tail);
            (back, &mut front[..second_len])
        }
    }

    /// Commits `count` bytes written through [`as_mut_slices`](Self::as_mut_slices).
    pub fn advance_write(&mut self, count: usize) {
        debug_assert!(count <= self.remaining());
        self.tail = (self.tail + count) % self.capacity();
        self.len += count;
    }
}
