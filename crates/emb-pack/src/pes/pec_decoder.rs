//! PEC section reader.
//!
//! Walks the fixed header offsets, maps palette bytes to threads, then
//! replays the stitch stream. Truncation anywhere is fatal; disagreements
//! between the header and the stream are reported as warnings.

use std::collections::{HashMap, VecDeque};

use emb_buffers::Reader;

use super::catalog;
use super::constants::{
    COLOR_SENTINEL, FLAG_LONG, JUMP_CODE, PEC_HEADER_SIZE, STREAM_END, TRIM_CODE,
};
use super::error::PesError;
use crate::command::CommandKind;
use crate::pattern::Pattern;
use crate::report::{Decoded, DecodeWarning};
use crate::thread::Thread;

/// Decodes a PEC section starting at the reader's current position.
///
/// `chart` is the true-color thread table of the surrounding container, if
/// any; an empty chart falls back to the fixed catalog.
pub(super) fn read_pec(reader: &mut Reader, chart: Vec<Thread>) -> Result<Decoded, PesError> {
    let base = reader.x;
    reader.seek(base + 48);
    let color_changes = reader.u8()? as usize;
    let color_bytes = reader.buf(color_changes + 1)?.to_vec();
    let mapped = map_colors(&color_bytes, chart);
    reader.skip(0x1D0 - color_changes);
    let declared_length = reader.u24_le()?;
    reader.skip(0x0F);

    let stream = read_stitches(reader, &mapped)?;
    let mut pattern = stream.pattern;
    let mut palette = stream.palette;
    let consumed = stream.blocks_seen.min(mapped.len());
    palette.extend(mapped[consumed..].iter().cloned());
    pattern.replace_palette(palette);

    let mut warnings = Vec::new();
    if stream.blocks_seen > mapped.len() {
        warnings.push(DecodeWarning::HeaderMismatch {
            field: "colors",
            declared: mapped.len() as u32,
            actual: stream.blocks_seen as u32,
        });
    }
    let actual_length = (reader.x - base - PEC_HEADER_SIZE) as u32;
    if declared_length != actual_length {
        warnings.push(DecodeWarning::HeaderMismatch {
            field: "length",
            declared: declared_length,
            actual: actual_length,
        });
    }
    Ok(Decoded::with_warnings(pattern, warnings))
}

/// Turns header palette bytes into threads.
///
/// Three modes, in order: no chart means every byte is a catalog lookup; a
/// chart at least as long as the byte list maps positionally; a shorter
/// chart is handed out first-come per distinct catalog index, falling back
/// to the catalog once exhausted.
fn map_colors(color_bytes: &[u8], chart: Vec<Thread>) -> Vec<Thread> {
    if chart.is_empty() {
        return color_bytes.iter().map(|&b| catalog::thread(b)).collect();
    }
    if chart.len() >= color_bytes.len() {
        let mut chart = chart;
        chart.truncate(color_bytes.len());
        return chart;
    }
    let mut spare: VecDeque<Thread> = chart.into();
    let mut table: HashMap<u8, Thread> = HashMap::new();
    color_bytes
        .iter()
        .map(|&byte| {
            let key = byte % catalog::SIZE;
            table
                .entry(key)
                .or_insert_with(|| spare.pop_front().unwrap_or_else(|| catalog::thread(key)))
                .clone()
        })
        .collect()
}

struct StitchStream {
    pattern: Pattern,
    palette: Vec<Thread>,
    blocks_seen: usize,
}

/// Replays stitch bytes until the terminator.
///
/// A color sentinel normally advances to the next mapped thread; when the
/// next thread repeats the current color it is read back as a stop, since
/// that is how stops were spelled on the way out.
fn read_stitches(reader: &mut Reader, mapped: &[Thread]) -> Result<StitchStream, PesError> {
    let mut pattern = Pattern::new();
    let mut palette: Vec<Thread> = mapped.first().cloned().into_iter().collect();
    let mut block = 0usize;
    let mut x = 0i32;
    let mut y = 0i32;
    loop {
        let val1 = reader.u8()?;
        if val1 == STREAM_END {
            pattern.add_stitch(x, y, CommandKind::End);
            break;
        }
        let val2 = reader.u8()?;
        if val1 == COLOR_SENTINEL[0] && val2 == COLOR_SENTINEL[1] {
            reader.skip(1);
            let next = block + 1;
            let kind = if next < mapped.len() && mapped[next].color == mapped[block].color {
                CommandKind::Stop
            } else {
                if next < mapped.len() {
                    palette.push(mapped[next].clone());
                }
                CommandKind::ColorChange
            };
            pattern.add_stitch(x, y, kind);
            block = next;
            continue;
        }
        let mut jump = false;
        let mut trim = false;
        let (dx, y_head) = if val1 & FLAG_LONG != 0 {
            trim |= val1 & TRIM_CODE != 0;
            jump |= val1 & JUMP_CODE != 0;
            let code = u16::from(val1) << 8 | u16::from(val2);
            (signed12(code), None)
        } else {
            (signed7(val1), Some(val2))
        };
        let y_head = match y_head {
            Some(byte) => byte,
            None => reader.u8()?,
        };
        let dy = if y_head & FLAG_LONG != 0 {
            trim |= y_head & TRIM_CODE != 0;
            jump |= y_head & JUMP_CODE != 0;
            let code = u16::from(y_head) << 8 | u16::from(reader.u8()?);
            signed12(code)
        } else {
            signed7(y_head)
        };
        // A hostile stream can walk past the i32 range; pin the position
        // at the edge rather than wrap.
        x = x.saturating_add(dx);
        y = y.saturating_add(dy);
        let kind = if trim {
            CommandKind::Trim
        } else if jump {
            CommandKind::Jump
        } else {
            CommandKind::Stitch
        };
        pattern.add_stitch(x, y, kind);
    }
    Ok(StitchStream {
        pattern,
        palette,
        blocks_seen: block + 1,
    })
}

fn signed7(byte: u8) -> i32 {
    if byte > 63 {
        i32::from(byte) - 128
    } else {
        i32::from(byte)
    }
}

fn signed12(code: u16) -> i32 {
    let value = i32::from(code & 0x0FFF);
    if value & 0x800 != 0 {
        value - 0x1000
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn threads(colors: &[(u8, u8, u8)]) -> Vec<Thread> {
        colors
            .iter()
            .map(|&(r, g, b)| Thread::new(Color::new(r, g, b)))
            .collect()
    }

    #[test]
    fn test_signed7() {
        assert_eq!(signed7(0x00), 0);
        assert_eq!(signed7(0x3F), 63);
        assert_eq!(signed7(0x40), -64);
        assert_eq!(signed7(0x7F), -1);
        assert_eq!(signed7(0x7E), -2);
    }

    #[test]
    fn test_signed12() {
        assert_eq!(signed12(0x8000), 0);
        assert_eq!(signed12(0x87FF), 2047);
        assert_eq!(signed12(0x8800), -2048);
        assert_eq!(signed12(0x8FFD), -3);
        assert_eq!(signed12(0x912C), 300);
    }

    #[test]
    fn test_short_and_long_moves() {
        // (3, -2) short; then a long jump of (300, -3).
        let data = [0x03, 0x7E, 0x91, 0x2C, 0x9F, 0xFD, STREAM_END];
        let mut reader = Reader::new(&data);
        let stream = read_stitches(&mut reader, &threads(&[(0, 0, 0)])).unwrap();
        let rows = stream.pattern.stitches();
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].x, rows[0].y, rows[0].command), (3, -2, CommandKind::Stitch));
        assert_eq!((rows[1].x, rows[1].y, rows[1].command), (303, -5, CommandKind::Jump));
        assert_eq!(rows[2].command, CommandKind::End);
    }

    #[test]
    fn test_trim_flag_wins_over_jump() {
        let data = [0xB0, 0x05, 0xA0, 0x00, STREAM_END];
        let mut reader = Reader::new(&data);
        let stream = read_stitches(&mut reader, &threads(&[(0, 0, 0)])).unwrap();
        assert_eq!(stream.pattern.stitches()[0].command, CommandKind::Trim);
    }

    #[test]
    fn test_color_sentinel_advances_palette() {
        let data = [0x01, 0x01, 0xFE, 0xB0, 0x02, 0x01, 0x01, STREAM_END];
        let mut reader = Reader::new(&data);
        let mapped = threads(&[(255, 0, 0), (0, 0, 255)]);
        let stream = read_stitches(&mut reader, &mapped).unwrap();
        assert_eq!(stream.blocks_seen, 2);
        assert_eq!(stream.palette.len(), 2);
        assert_eq!(stream.pattern.stitches()[1].command, CommandKind::ColorChange);
    }

    #[test]
    fn test_repeated_color_reads_back_as_stop() {
        let data = [0x01, 0x01, 0xFE, 0xB0, 0x02, 0x01, 0x01, STREAM_END];
        let mut reader = Reader::new(&data);
        let mapped = threads(&[(255, 0, 0), (255, 0, 0)]);
        let stream = read_stitches(&mut reader, &mapped).unwrap();
        assert_eq!(stream.pattern.stitches()[1].command, CommandKind::Stop);
        // The duplicate does not appear twice in the palette.
        assert_eq!(stream.palette.len(), 1);
    }

    #[test]
    fn test_sentinels_beyond_palette_stay_color_changes() {
        let data = [
            0xFE, 0xB0, 0x02, 0xFE, 0xB0, 0x01, 0xFE, 0xB0, 0x02, STREAM_END,
        ];
        let mut reader = Reader::new(&data);
        let stream = read_stitches(&mut reader, &threads(&[(255, 0, 0)])).unwrap();
        assert_eq!(stream.blocks_seen, 4);
        assert_eq!(stream.palette.len(), 1);
        let kinds: Vec<_> = stream.pattern.stitches().iter().map(|s| s.command).collect();
        assert_eq!(
            kinds,
            vec![
                CommandKind::ColorChange,
                CommandKind::ColorChange,
                CommandKind::ColorChange,
                CommandKind::End
            ]
        );
    }

    #[test]
    fn test_truncated_stream_fails() {
        let data = [0x01, 0x01, 0x05];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            read_stitches(&mut reader, &threads(&[(0, 0, 0)])),
            Err(PesError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_positions_saturate_at_the_coordinate_ceiling() {
        // Enough +2047 steps to walk x past any i32 position.
        let steps = 1_050_000usize;
        let mut data = Vec::with_capacity(4 * steps + 1);
        for _ in 0..steps {
            data.extend_from_slice(&[0x87, 0xFF, 0x80, 0x00]);
        }
        data.push(STREAM_END);
        let mut reader = Reader::new(&data);
        let stream = read_stitches(&mut reader, &threads(&[(0, 0, 0)])).unwrap();
        let rows = stream.pattern.stitches();
        assert_eq!(rows.len(), steps + 1);
        assert_eq!(rows[steps - 1].x, i32::MAX);
        assert_eq!(rows[steps - 1].y, 0);
    }

    #[test]
    fn test_map_colors_catalog_mode() {
        let mapped = map_colors(&[5, 20], Vec::new());
        assert_eq!(mapped[0].color, Color::new(237, 23, 31));
        assert_eq!(mapped[1].color, Color::new(0, 0, 0));
        assert_eq!(mapped[0].catalog_number, "5");
    }

    #[test]
    fn test_map_colors_positional_mode() {
        let chart = threads(&[(1, 2, 3), (4, 5, 6)]);
        let mapped = map_colors(&[60, 61], chart);
        assert_eq!(mapped[0].color, Color::new(1, 2, 3));
        assert_eq!(mapped[1].color, Color::new(4, 5, 6));
    }

    #[test]
    fn test_map_colors_tabled_mode() {
        // Four bytes, two chart threads: distinct indices draw from the
        // chart in order, repeats reuse the table, overflow hits the catalog.
        let chart = threads(&[(1, 2, 3), (4, 5, 6)]);
        let mapped = map_colors(&[7, 7, 9, 11], chart);
        assert_eq!(mapped[0].color, Color::new(1, 2, 3));
        assert_eq!(mapped[1].color, Color::new(1, 2, 3));
        assert_eq!(mapped[2].color, Color::new(4, 5, 6));
        assert_eq!(mapped[3].color, catalog::thread(11).color);
    }
}
