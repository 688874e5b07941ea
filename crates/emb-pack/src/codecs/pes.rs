//! PES codec.

use super::types::{CodecError, PatternCodec};
use crate::constants::EmbFormat;
use crate::pattern::Pattern;
use crate::pes::{PesDecoder, PesEncoder};
use crate::report::Decoded;

/// [`PatternCodec`] over the PES encoder/decoder pair.
///
/// Encodes version 6 by default; set the encoder's `version` field for
/// version 1 output. Decoding accepts versions 1 and 6 plus bare `#PEC0001`
/// files.
pub struct PesPatternCodec {
    pub encoder: PesEncoder,
    pub decoder: PesDecoder,
}

impl PesPatternCodec {
    pub fn new() -> Self {
        Self {
            encoder: PesEncoder::new(),
            decoder: PesDecoder::new(),
        }
    }

    pub fn encode(&mut self, pattern: &Pattern) -> Result<Vec<u8>, CodecError> {
        Ok(self.encoder.encode(pattern)?)
    }

    pub fn decode(&mut self, data: &[u8]) -> Result<Decoded, CodecError> {
        Ok(self.decoder.decode(data)?)
    }
}

impl Default for PesPatternCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternCodec for PesPatternCodec {
    fn id(&self) -> &'static str {
        "pes"
    }

    fn format(&self) -> EmbFormat {
        EmbFormat::Pes
    }

    fn encode(&mut self, pattern: &Pattern) -> Result<Vec<u8>, CodecError> {
        PesPatternCodec::encode(self, pattern)
    }

    fn decode(&mut self, data: &[u8]) -> Result<Decoded, CodecError> {
        PesPatternCodec::decode(self, data)
    }
}
