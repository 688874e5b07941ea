//! Pattern codecs.
//!
//! One codec per machine format behind the shared [`PatternCodec`] trait,
//! a [`Codecs`] registry holding one of each, and [`decode_bytes`] for the
//! common case of decoding a file of unknown format.

mod dst;
mod pes;
mod registry;
mod types;

pub use dst::DstPatternCodec;
pub use pes::PesPatternCodec;
pub use registry::Codecs;
pub use types::{CodecError, PatternCodec};

use crate::report::Decoded;

/// Decodes file bytes of any supported format, sniffing the signature.
pub fn decode_bytes(data: &[u8]) -> Result<Decoded, CodecError> {
    Codecs::new().decode(data)
}
