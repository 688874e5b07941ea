//! Tajima DST stitch file decoder.

use emb_buffers::Reader;

use crate::command::CommandKind;
use crate::pattern::Pattern;
use crate::report::{Decoded, DecodeWarning};

use super::constants::{
    BASE_BITS, FLAG_COLOR_CHANGE, FLAG_END, FLAG_JUMP, FLAG_MASK, FLAG_STITCH, HEADER_SIZE,
    RECORD_SIZE,
};
use super::error::DstError;

/// Tajima DST decoder.
///
/// Reads the fixed 512-byte header for informational fields, then decodes
/// the 3-byte displacement records into absolute-coordinate commands. The
/// header is not authoritative: declared stitch and color counts are
/// checked against the decoded stream and a mismatch is reported as a
/// warning next to the pattern, never as an error.
pub struct DstDecoder;

impl Default for DstDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DstDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&mut self, data: &[u8]) -> Result<Decoded, DstError> {
        if data.len() < HEADER_SIZE {
            return Err(DstError::HeaderTooShort(data.len()));
        }
        let mut reader = Reader::new(data);
        let header = reader
            .buf(HEADER_SIZE)
            .map_err(|_| DstError::HeaderTooShort(data.len()))?;
        let declared_stitches = parse_count(header, b"ST:");
        let declared_color_changes = parse_count(header, b"CO:");

        let mut pattern = Pattern::new();
        let mut x = 0i32;
        let mut y = 0i32;
        let mut records = 0u32;
        let mut color_changes = 0u32;
        loop {
            let offset = reader.x;
            if reader.size() == 0 {
                // Stream ended without an explicit end record; the program
                // still terminates here.
                pattern.add_stitch(x, y, CommandKind::End);
                break;
            }
            let record = reader
                .buf(RECORD_SIZE)
                .map_err(|_| DstError::CorruptRecord(offset))?;
            let (b0, b1, b2) = (record[0], record[1], record[2]);
            if b2 & FLAG_END == FLAG_END {
                pattern.add_stitch(x, y, CommandKind::End);
                break;
            }
            if b2 & BASE_BITS != BASE_BITS {
                return Err(DstError::CorruptRecord(offset));
            }
            // A hostile stream can walk past the i32 range; pin the
            // position at the edge rather than wrap.
            x = x.saturating_add(decode_dx(b0, b1, b2));
            y = y.saturating_add(decode_dy(b0, b1, b2));
            let kind = match b2 & FLAG_MASK {
                FLAG_STITCH => CommandKind::Stitch,
                FLAG_JUMP => CommandKind::Jump,
                FLAG_COLOR_CHANGE => CommandKind::ColorChange,
                // The remaining combination is the sequin toggle, a mode
                // this codec cannot represent.
                _ => return Err(DstError::CorruptRecord(offset)),
            };
            records += 1;
            if kind == CommandKind::ColorChange {
                color_changes += 1;
            }
            pattern.add_stitch(x, y, kind);
        }

        let mut warnings = Vec::new();
        if let Some(declared) = declared_stitches {
            if declared != records {
                warnings.push(DecodeWarning::HeaderMismatch {
                    field: "ST",
                    declared,
                    actual: records,
                });
            }
        }
        if let Some(declared) = declared_color_changes {
            if declared != color_changes {
                warnings.push(DecodeWarning::HeaderMismatch {
                    field: "CO",
                    declared,
                    actual: color_changes,
                });
            }
        }
        Ok(Decoded::with_warnings(pattern, warnings))
    }
}

/// Extracts a numeric header field such as `ST:` or `CO:`.
///
/// Header fields are `\r`-terminated; an absent or unparseable field yields
/// `None` and skips the consistency check rather than failing the decode.
fn parse_count(header: &[u8], tag: &[u8]) -> Option<u32> {
    header.split(|&b| b == b'\r').find_map(|chunk| {
        let rest = chunk.strip_prefix(tag)?;
        std::str::from_utf8(rest).ok()?.trim().parse().ok()
    })
}

#[inline]
fn bit(byte: u8, n: u8) -> i32 {
    ((byte >> n) & 1) as i32
}

fn decode_dx(b0: u8, b1: u8, b2: u8) -> i32 {
    let mut x = 0;
    x += bit(b2, 2) * 81;
    x -= bit(b2, 3) * 81;
    x += bit(b1, 2) * 27;
    x -= bit(b1, 3) * 27;
    x += bit(b0, 2) * 9;
    x -= bit(b0, 3) * 9;
    x += bit(b1, 0) * 3;
    x -= bit(b1, 1) * 3;
    x += bit(b0, 0);
    x -= bit(b0, 1);
    x
}

fn decode_dy(b0: u8, b1: u8, b2: u8) -> i32 {
    let mut y = 0;
    y += bit(b2, 5) * 81;
    y -= bit(b2, 4) * 81;
    y += bit(b1, 5) * 27;
    y -= bit(b1, 4) * 27;
    y += bit(b0, 5) * 9;
    y -= bit(b0, 4) * 9;
    y += bit(b1, 7) * 3;
    y -= bit(b1, 6) * 3;
    y += bit(b0, 7);
    y -= bit(b0, 6);
    // The wire y axis is inverted relative to the model's.
    -y
}
