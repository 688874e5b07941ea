//! Top-level constants for emb-pack.

use crate::dst;
use crate::pes;

/// Embroidery file format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbFormat {
    Dst = 0,
    Pes = 1,
    /// A bare PEC stream outside its PES container.
    Pec = 2,
}

impl EmbFormat {
    /// Sniffs the format from leading bytes.
    ///
    /// PES and PEC carry magic signatures. DST has none; its files are
    /// recognized by the label field every writer emits first, plus the
    /// mandatory header size.
    pub fn sniff(bytes: &[u8]) -> Option<EmbFormat> {
        if bytes.starts_with(pes::constants::PES_MAGIC) {
            return Some(EmbFormat::Pes);
        }
        if bytes.starts_with(pes::constants::PEC_MAGIC) {
            return Some(EmbFormat::Pec);
        }
        if bytes.starts_with(b"LA:") && bytes.len() >= dst::constants::HEADER_SIZE {
            return Some(EmbFormat::Dst);
        }
        None
    }
}
