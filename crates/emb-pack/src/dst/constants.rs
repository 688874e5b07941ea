//! DST wire constants.

/// Fixed size of the ASCII metadata header.
pub const HEADER_SIZE: usize = 512;

/// Size of one stitch record.
pub const RECORD_SIZE: usize = 3;

/// Width of the design label field.
pub const LABEL_SIZE: usize = 16;

/// Largest displacement one record can carry per axis
/// (81 + 27 + 9 + 3 + 1).
pub const MAX_DELTA: i32 = 121;

/// End-of-text byte terminating the readable header portion.
pub const HEADER_EOT: u8 = 0x1A;

// Flag field of the third record byte. The low two bits are set in every
// well-formed record; bits 2-5 belong to the displacement code.
pub const BASE_BITS: u8 = 0b0000_0011;
pub const FLAG_MASK: u8 = 0b1100_0011;
pub const FLAG_STITCH: u8 = 0b0000_0011;
pub const FLAG_JUMP: u8 = 0b1000_0011;
pub const FLAG_COLOR_CHANGE: u8 = 0b1100_0011;
pub const FLAG_SEQUIN: u8 = 0b0100_0011;
pub const FLAG_END: u8 = 0b1111_0011;
