//! Tajima DST stitch file encoding/decoding.
//!
//! DST is a headerful, relative-move format: a fixed 512-byte ASCII
//! metadata block followed by 3-byte bit-packed displacement records.

pub mod constants;
mod decoder;
mod encoder;
mod error;

pub use decoder::DstDecoder;
pub use encoder::DstEncoder;
pub use error::DstError;
