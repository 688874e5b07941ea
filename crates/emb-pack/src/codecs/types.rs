//! Shared codec surface.

use thiserror::Error;

use crate::constants::EmbFormat;
use crate::dst::DstError;
use crate::pattern::Pattern;
use crate::pes::PesError;
use crate::report::Decoded;

/// Errors from any pattern codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("DST codec error: {0}")]
    Dst(#[from] DstError),
    #[error("PES codec error: {0}")]
    Pes(#[from] PesError),
    #[error("unrecognized embroidery format")]
    UnrecognizedFormat,
}

/// A machine-format codec for embroidery patterns.
///
/// Encoding produces complete file bytes; decoding accepts them and returns
/// the pattern together with any non-fatal warnings.
pub trait PatternCodec {
    /// Codec name, e.g. `"dst"`.
    fn id(&self) -> &'static str;

    /// The format this codec handles.
    fn format(&self) -> EmbFormat;

    /// Encodes a pattern into file bytes.
    fn encode(&mut self, pattern: &Pattern) -> Result<Vec<u8>, CodecError>;

    /// Decodes file bytes into a pattern.
    fn decode(&mut self, data: &[u8]) -> Result<Decoded, CodecError>;
}
