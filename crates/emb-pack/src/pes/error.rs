//! PES/PEC family error type.

use emb_buffers::BufferError;
use thiserror::Error;

/// Errors shared by the PES container and its embedded PEC section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PesError {
    #[error("invalid PES: cannot encode a pattern with zero stitches")]
    EmptyPattern,
    #[error("invalid PES: {0} color blocks exceed the format limit of 255")]
    TooManyColors(usize),
    #[error("invalid PES: displacement ({dx}, {dy}) does not fit the stitch code")]
    CoordinateOutOfRange { dx: i64, dy: i64 },
    #[error("invalid PES: color change {index} runs past the {palette_len} palette threads")]
    PaletteIndexOutOfBounds { index: usize, palette_len: usize },
    #[error("unsupported PES version {0:?}")]
    UnsupportedVersion(String),
    #[error("invalid PES: unexpected end of input")]
    UnexpectedEof,
}

impl From<BufferError> for PesError {
    fn from(_: BufferError) -> Self {
        PesError::UnexpectedEof
    }
}
