//! DST decoder error type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DstError {
    #[error("invalid DST: header shorter than 512 bytes (got {0})")]
    HeaderTooShort(usize),
    /// A record that is truncated, carries an unrecognized flag
    /// combination, or selects a mode this codec does not support.
    /// Always fatal: DST has no way to resynchronize mid-stream.
    #[error("invalid DST: corrupt record at offset {0}")]
    CorruptRecord(usize),
}
