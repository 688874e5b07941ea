//! PEC section writer.
//!
//! The PEC section is the machine-facing payload of every PES container: a
//! 512-byte label/palette header, a stitch block with a backpatched length,
//! and one thumbnail icon per color block. Stitches are relative moves, one
//! or two bytes per axis.

use emb_buffers::Writer;

use super::catalog;
use super::constants::{
    COLOR_SENTINEL, FLAG_LONG, ICON_HEIGHT, ICON_STRIDE, JUMP_CODE, LONG_MAX, LONG_MIN,
    MAX_COLOR_BLOCKS, PEC_HEADER_SIZE, PEC_LABEL_SIZE, SHORT_MAX, SHORT_MIN, STREAM_END,
    TRIM_CODE,
};
use super::error::PesError;
use super::graphics;
use crate::command::CommandKind;
use crate::pattern::Pattern;
use crate::thread::Thread;

/// The palette as the wire sees it: one entry per color block.
///
/// A color change advances through the pattern palette; a stop repeats the
/// current thread, which is how PEC spells "pause without changing thread".
/// Palette threads never reached by the program are kept at the tail so a
/// decode gets the full palette back.
pub(super) fn emission_palette(pattern: &Pattern) -> Result<Vec<Thread>, PesError> {
    let threads = pattern.threads();
    if threads.is_empty() {
        return Err(PesError::PaletteIndexOutOfBounds {
            index: 0,
            palette_len: 0,
        });
    }
    let mut cursor = 0usize;
    let mut emission = vec![threads[0].clone()];
    for row in pattern.stitches() {
        match row.command {
            CommandKind::ColorChange => {
                cursor += 1;
                let thread = threads.get(cursor).ok_or(PesError::PaletteIndexOutOfBounds {
                    index: cursor,
                    palette_len: threads.len(),
                })?;
                emission.push(thread.clone());
            }
            CommandKind::Stop => emission.push(threads[cursor].clone()),
            CommandKind::End => break,
            _ => {}
        }
    }
    emission.extend(threads[cursor + 1..].iter().cloned());
    Ok(emission)
}

/// Writes the whole PEC section at the writer's current position.
pub(super) fn write_pec(
    writer: &mut Writer,
    pattern: &Pattern,
    emission: &[Thread],
    label: &str,
) -> Result<(), PesError> {
    debug_assert!(!emission.is_empty() && emission.len() <= MAX_COLOR_BLOCKS);
    write_header(writer, emission, label);
    write_stitch_block(writer, pattern)?;
    write_graphics(writer, pattern, emission);
    Ok(())
}

fn write_header(writer: &mut Writer, emission: &[Thread], label: &str) {
    let label: String = label
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(PEC_LABEL_SIZE)
        .collect();
    writer.ascii(&format!("LA:{label:<16}\r"));
    writer.pad(0x20, 12);
    writer.u8(0xFF);
    writer.u8(0x00);
    writer.u8(ICON_STRIDE as u8);
    writer.u8(ICON_HEIGHT as u8);
    writer.pad(0x20, 12);
    writer.u8((emission.len() - 1) as u8);
    for thread in emission {
        writer.u8(catalog::nearest_index(thread.color));
    }
    writer.pad(0x20, PEC_HEADER_SIZE - 49 - emission.len());
}

fn write_stitch_block(writer: &mut Writer, pattern: &Pattern) -> Result<(), PesError> {
    let bounds = pattern.bounds();
    let width = bounds.width();
    let height = bounds.height();
    if width > i64::from(u16::MAX) || height > i64::from(u16::MAX) {
        return Err(PesError::CoordinateOutOfRange {
            dx: width,
            dy: height,
        });
    }

    let block_at = writer.tell();
    writer.u8(0x00);
    writer.u8(0x00);
    let length_at = writer.tell();
    writer.u24_le(0);
    writer.u8(0x31);
    writer.u8(0xFF);
    writer.u8(0xF0);
    writer.u16_le(width as u16);
    writer.u16_le(height as u16);
    writer.u16_le(0x1E0);
    writer.u16_le(0x1B0);
    writer.u16_be(0x9000 | bounds.min_x.wrapping_neg() as u16);
    writer.u16_be(0x9000 | bounds.min_y.wrapping_neg() as u16);
    write_stitches(writer, pattern)?;
    writer.set_u24_le(length_at, (writer.tell() - block_at) as u32)?;
    Ok(())
}

fn write_stitches(writer: &mut Writer, pattern: &Pattern) -> Result<(), PesError> {
    let mut px = 0i32;
    let mut py = 0i32;
    let mut color_two = true;
    for row in pattern.stitches() {
        // A delta between two i32 coordinates needs 33 bits.
        let dx = i64::from(row.x) - i64::from(px);
        let dy = i64::from(row.y) - i64::from(py);
        match row.command {
            CommandKind::Stitch => {
                if (SHORT_MIN..=SHORT_MAX).contains(&dx) && (SHORT_MIN..=SHORT_MAX).contains(&dy)
                {
                    writer.u8((dx & 0x7F) as u8);
                    writer.u8((dy & 0x7F) as u8);
                } else {
                    check_range(dx, dy)?;
                    write_long(writer, dx, 0);
                    write_long(writer, dy, 0);
                }
            }
            CommandKind::Jump => {
                check_range(dx, dy)?;
                write_long(writer, dx, JUMP_CODE);
                write_long(writer, dy, JUMP_CODE);
            }
            CommandKind::Trim => {
                check_range(dx, dy)?;
                write_long(writer, dx, TRIM_CODE);
                write_long(writer, dy, TRIM_CODE);
            }
            CommandKind::ColorChange | CommandKind::Stop => {
                if dx != 0 || dy != 0 {
                    check_range(dx, dy)?;
                    write_long(writer, dx, JUMP_CODE);
                    write_long(writer, dy, JUMP_CODE);
                }
                writer.buf(&COLOR_SENTINEL);
                writer.u8(if color_two { 0x02 } else { 0x01 });
                color_two = !color_two;
            }
            CommandKind::End => break,
        }
        px = row.x;
        py = row.y;
    }
    writer.u8(STREAM_END);
    Ok(())
}

fn check_range(dx: i64, dy: i64) -> Result<(), PesError> {
    if !(LONG_MIN..=LONG_MAX).contains(&dx) || !(LONG_MIN..=LONG_MAX).contains(&dy) {
        return Err(PesError::CoordinateOutOfRange { dx, dy });
    }
    Ok(())
}

/// Emits one axis in the two-byte long form, big end first.
fn write_long(writer: &mut Writer, delta: i64, flag: u8) {
    let value = (delta as u16 & 0x0FFF) | u16::from(FLAG_LONG) << 8 | u16::from(flag) << 8;
    writer.u16_be(value);
}

/// One icon for the whole design, then one per palette entry.
fn write_graphics(writer: &mut Writer, pattern: &Pattern, emission: &[Thread]) {
    let bounds = pattern.bounds();
    let mut all = Vec::new();
    let mut blocks: Vec<Vec<(i32, i32)>> = vec![Vec::new()];
    for row in pattern.stitches() {
        match row.command {
            CommandKind::Stitch => {
                all.push((row.x, row.y));
                if let Some(block) = blocks.last_mut() {
                    block.push((row.x, row.y));
                }
            }
            CommandKind::ColorChange | CommandKind::Stop => blocks.push(Vec::new()),
            CommandKind::End => break,
            _ => {}
        }
    }
    writer.buf(&graphics::render_icon(&all, bounds));
    for k in 0..emission.len() {
        let points = blocks.get(k).map(Vec::as_slice).unwrap_or(&[]);
        writer.buf(&graphics::render_icon(points, bounds));
    }
}
