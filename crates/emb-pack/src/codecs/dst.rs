//! DST codec.

use super::types::{CodecError, PatternCodec};
use crate::constants::EmbFormat;
use crate::dst::{DstDecoder, DstEncoder};
use crate::pattern::Pattern;
use crate::report::Decoded;

/// [`PatternCodec`] over the DST encoder/decoder pair.
pub struct DstPatternCodec {
    pub encoder: DstEncoder,
    pub decoder: DstDecoder,
}

impl DstPatternCodec {
    pub fn new() -> Self {
        Self {
            encoder: DstEncoder::new(),
            decoder: DstDecoder::new(),
        }
    }

    pub fn encode(&mut self, pattern: &Pattern) -> Result<Vec<u8>, CodecError> {
        Ok(self.encoder.encode(pattern))
    }

    pub fn decode(&mut self, data: &[u8]) -> Result<Decoded, CodecError> {
        Ok(self.decoder.decode(data)?)
    }
}

impl Default for DstPatternCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternCodec for DstPatternCodec {
    fn id(&self) -> &'static str {
        "dst"
    }

    fn format(&self) -> EmbFormat {
        EmbFormat::Dst
    }

    fn encode(&mut self, pattern: &Pattern) -> Result<Vec<u8>, CodecError> {
        DstPatternCodec::encode(self, pattern)
    }

    fn decode(&mut self, data: &[u8]) -> Result<Decoded, CodecError> {
        DstPatternCodec::decode(self, data)
    }
}
