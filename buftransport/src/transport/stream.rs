use std::io::{self, Read, Write};

use log::debug;

use crate::error::{Direction, Error, Result};
use crate::transport::Transport;

/// Transport over an optional `std::io` reader and writer.
///
/// Typical use is the two halves of a socket, e.g. a `TcpStream` and its
/// `try_clone()`. The streams arrive already connected, so the transport
/// starts open. `close` flushes the writer and drops both streams; the
/// transport cannot be reopened afterwards.
#[derive(Debug)]
pub struct StreamTransport<R, W> {
    input: Option<R>,
    output: Option<W>,
    open: bool,
}

impl<R: Read, W: Write> StreamTransport<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Some(input),
            output: Some(output),
            open: true,
        }
    }

    /// Returns a reference to the input stream, if still held.
    pub fn input(&self) -> Option<&R> {
        self.input.as_ref()
    }

    /// Returns a reference to the output stream, if still held.
    pub fn output(&self) -> Option<&W> {
        self.output.as_ref()
    }
}

impl<R: Read> StreamTransport<R, io::Sink> {
    /// A read-only transport.
    pub fn reader(input: R) -> Self {
        Self {
            input: Some(input),
            output: None,
            open: true,
        }
    }
}

impl<W: Write> StreamTransport<io::Empty, W> {
    /// A write-only transport.
    pub fn writer(output: W) -> Self {
        Self {
            input: None,
            output: Some(output),
            open: true,
        }
    }
}

impl<R: Read, W: Write> Transport for StreamTransport<R, W> {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self) -> Result<()> {
        if self.input.is_none() && self.output.is_none() {
            return Err(Error::Closed);
        }
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        let result = match self.output.as_mut() {
            Some(output) => output.flush().map_err(Error::from),
            None => Ok(()),
        };
        self.input = None;
        self.output = None;
        self.open = false;
        debug!("stream transport closed");
        result
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.open {
            return Err(Error::Closed);
        }
        let input = self
            .input
            .as_mut()
            .ok_or(Error::Unsupported(Direction::Input))?;
        Ok(input.read(buf)?)
    }

    fn write(&mut self, buf: &[u8]) -> Result<()> {
        if !self.open {
            return Err(Error::Closed);
        }
        let output = self
            .output
            .as_mut()
            .ok_or(Error::Unsupported(Direction::Output))?;
        output.write_all(buf)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.output.as_mut() {
            Some(output) if self.open => Ok(output.flush()?),
            _ => Ok(()),
        }
    }

    fn has_input(&self) -> bool {
        self.input.is_some()
    }

    fn has_output(&self) -> bool {
        self.output.is_some()
    }
}
