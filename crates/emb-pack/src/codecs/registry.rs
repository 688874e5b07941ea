//! Codec registry.

use super::dst::DstPatternCodec;
use super::pes::PesPatternCodec;
use super::types::CodecError;
use crate::constants::EmbFormat;
use crate::report::Decoded;

/// One codec per supported format, ready to use.
pub struct Codecs {
    pub dst: DstPatternCodec,
    pub pes: PesPatternCodec,
}

impl Codecs {
    pub fn new() -> Self {
        Self {
            dst: DstPatternCodec::new(),
            pes: PesPatternCodec::new(),
        }
    }

    /// Decodes file bytes of any supported format, sniffing the signature.
    ///
    /// Bare PEC files route through the PES codec, which owns that decode
    /// path.
    pub fn decode(&mut self, data: &[u8]) -> Result<Decoded, CodecError> {
        match EmbFormat::sniff(data) {
            Some(EmbFormat::Dst) => self.dst.decode(data),
            Some(EmbFormat::Pes | EmbFormat::Pec) => self.pes.decode(data),
            None => Err(CodecError::UnrecognizedFormat),
        }
    }
}

impl Default for Codecs {
    fn default() -> Self {
        Self::new()
    }
}
