use crate::error::{Error, Result};
use crate::DEFAULT_BUFFER_SIZE;

/// Buffer sizes for a [`BufferedTransport`](crate::BufferedTransport).
///
/// Fixed once the transport is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    pub read_capacity: usize,
    pub write_capacity: usize,
}

impl BufferConfig {
    pub fn new() -> Self {
        Self {
            read_capacity: DEFAULT_BUFFER_SIZE,
            write_capacity: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Sets both buffer capacities.
    pub fn with_capacity(mut self, size: usize) -> Self {
        self.read_capacity = size;
        self.write_capacity = size;
        self
    }

    pub fn with_read_capacity(mut self, size: usize) -> Self {
        self.read_capacity = size;
        self
    }

    pub fn with_write_capacity(mut self, size: usize) -> Self {
        self.write_capacity = size;
        self
    }

    /// Rejects zero-sized buffers.
    pub fn validate(&self) -> Result<()> {
        if self.read_capacity == 0 {
            return Err(Error::InvalidCapacity(self.read_capacity));
        }
        if self.write_capacity == 0 {
            return Err(Error::InvalidCapacity(self.write_capacity));
        }
        Ok(())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new()
    }
}
