//! Staging buffers for the buffered transport.
//!
//! - RingBuffer: fixed-capacity circular byte store
//! - InputBuffer: read-side staging over a transport's input endpoint
//! - OutputBuffer: write-side staging over a transport's output endpoint

mod input;
mod output;
mod ring;

pub use input::InputBuffer;
pub use output::OutputBuffer;
pub use ring::RingBuffer;
