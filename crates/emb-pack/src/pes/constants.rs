//! PES/PEC wire constants.

/// Family prefix shared by every PES container version.
pub const PES_MAGIC: &[u8] = b"#PES";
/// Version 1 signature.
pub const PES_V1_MAGIC: &[u8] = b"#PES0001";
/// Version 6 signature.
pub const PES_V6_MAGIC: &[u8] = b"#PES0060";
/// Signature of a bare PEC file (a PEC section with nothing around it).
pub const PEC_MAGIC: &[u8] = b"#PEC0001";

/// Size of the fixed PEC label/palette header.
pub const PEC_HEADER_SIZE: usize = 512;
/// Label width inside the PEC header.
pub const PEC_LABEL_SIZE: usize = 16;
/// The header counts palette entries with a single byte holding `n - 1`.
pub const MAX_COLOR_BLOCKS: usize = 255;

/// Thumbnail icon geometry: 48x38 pixels, one bit per pixel.
pub const ICON_WIDTH: usize = 48;
pub const ICON_HEIGHT: usize = 38;
pub const ICON_STRIDE: usize = ICON_WIDTH / 8;
pub const ICON_BYTES: usize = ICON_STRIDE * ICON_HEIGHT;

/// High bit of a stitch byte selects the two-byte long form.
pub const FLAG_LONG: u8 = 0x80;
/// Long-form flag bits, carried in the high byte of the 16-bit code.
pub const JUMP_CODE: u8 = 0x10;
pub const TRIM_CODE: u8 = 0x20;
/// Two-byte sentinel announcing a color change, followed by one index byte.
pub const COLOR_SENTINEL: [u8; 2] = [0xFE, 0xB0];
/// Terminator byte closing the stitch stream.
pub const STREAM_END: u8 = 0xFF;

/// Short form carries one signed 7-bit value per axis.
pub const SHORT_MIN: i64 = -63;
pub const SHORT_MAX: i64 = 62;
/// Long form carries a signed 12-bit value per axis.
pub const LONG_MIN: i64 = -2048;
pub const LONG_MAX: i64 = 2047;

/// Thread type word written into version 6 thread records.
pub const V6_THREAD_TYPE: u32 = 0x0A;
/// Identity transform written into the version 6 header.
pub const AFFINE_IDENTITY: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Container version selector for [`PesEncoder`](super::PesEncoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PesVersion {
    /// `#PES0001`, a thin wrapper that stores nothing but the PEC section.
    V1,
    /// `#PES0060`, which adds metadata strings and a true-color thread table.
    V6,
}
