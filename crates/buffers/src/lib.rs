//! Binary buffer utilities for emb-pack.
//!
//! This crate provides the byte-level reading and writing primitives the
//! embroidery codecs are built on.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking.
//!   Every read is bounds-checked and returns a [`BufferError`] on overrun,
//!   because the input is an untrusted file.
//! - [`Writer`] - Writes binary data to an auto-growing buffer, with in-place
//!   patching of previously written offset fields.
//!
//! # Example
//!
//! ```
//! use emb_buffers::{Reader, Writer};
//!
//! // Write some data
//! let mut writer = Writer::new();
//! writer.u8(0x2A);
//! writer.u16_le(0x0203);
//! writer.ascii("LA:demo");
//! let data = writer.flush();
//!
//! // Read it back
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8()?, 0x2A);
//! assert_eq!(reader.u16_le()?, 0x0203);
//! assert_eq!(reader.ascii(7)?, "LA:demo");
//! # Ok::<(), emb_buffers::BufferError>(())
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
        }
    }
}

impl std::error::Error for BufferError {}
