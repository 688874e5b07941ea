//! Tajima DST stitch file encoder.

use emb_buffers::Writer;

use crate::command::CommandKind;
use crate::pattern::Pattern;

use super::constants::{BASE_BITS, FLAG_END, HEADER_EOT, HEADER_SIZE, LABEL_SIZE, MAX_DELTA};

/// Wire record kinds. Stop has no record of its own in DST; machines pause
/// on the color-change record, so both commands emit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireKind {
    Stitch,
    Jump,
    ColorChange,
}

/// Tajima DST encoder.
///
/// DST is relative: every record moves the needle by at most ±121 units
/// per axis. Longer moves are split into runs of records, a trim becomes
/// the conventional three-jump triangle, and the stream always ends with a
/// single end record. The 512-byte header is derived from the finished
/// record list, so it is computed first and never backpatched.
pub struct DstEncoder {
    pub writer: Writer,
    /// Design label for the `LA:` header field, ASCII, at most 16 chars.
    pub label: String,
}

impl Default for DstEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DstEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
            label: "Untitled".to_owned(),
        }
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            writer: Writer::new(),
            label: label.into(),
        }
    }

    pub fn encode(&mut self, pattern: &Pattern) -> Vec<u8> {
        self.writer.reset();
        let records = wire_records(pattern);
        let color_changes = records
            .iter()
            .filter(|r| r.2 == WireKind::ColorChange)
            .count();
        self.write_header(pattern, records.len(), color_changes);
        for (dx, dy, kind) in records {
            write_record(&mut self.writer, dx, dy, kind);
        }
        self.writer.buf(&[0, 0, FLAG_END]);
        self.writer.flush()
    }

    fn write_header(&mut self, pattern: &Pattern, stitches: usize, color_changes: usize) {
        let bounds = pattern.bounds();
        // The label field is fixed-width ASCII; anything else would corrupt
        // the header framing.
        let label: String = self
            .label
            .chars()
            .filter(|c| c.is_ascii_graphic() || *c == ' ')
            .take(LABEL_SIZE)
            .collect();
        let w = &mut self.writer;
        w.ascii(&format!("LA:{label:<16}\r"));
        w.ascii(&format!("ST:{stitches:7}\r"));
        w.ascii(&format!("CO:{color_changes:3}\r"));
        w.ascii(&format!("+X:{:5}\r", bounds.max_x.unsigned_abs()));
        w.ascii(&format!("-X:{:5}\r", bounds.min_x.unsigned_abs()));
        w.ascii(&format!("+Y:{:5}\r", bounds.max_y.unsigned_abs()));
        w.ascii(&format!("-Y:{:5}\r", bounds.min_y.unsigned_abs()));
        let (ax, ay) = match pattern.stitches().last() {
            Some(last) => (i64::from(last.x), -i64::from(last.y)),
            None => (0, 0),
        };
        write_signed_field(w, "AX", ax);
        write_signed_field(w, "AY", ay);
        w.ascii("MX:+    0\r");
        w.ascii("MY:+    0\r");
        w.ascii("PD:******\r");
        w.u8(HEADER_EOT);
        let written = w.tell();
        if written < HEADER_SIZE {
            w.pad(0x20, HEADER_SIZE - written);
        }
    }
}

fn write_signed_field(w: &mut Writer, tag: &str, value: i64) {
    let sign = if value < 0 { '-' } else { '+' };
    w.ascii(&format!("{tag}:{sign}{:5}\r", value.unsigned_abs()));
}

/// Flattens the stitch program into wire records, splitting moves the
/// 3-byte code cannot carry in one step.
fn wire_records(pattern: &Pattern) -> Vec<(i32, i32, WireKind)> {
    let mut records = Vec::with_capacity(pattern.stitches().len());
    let mut px = 0i32;
    let mut py = 0i32;
    for stitch in pattern.stitches() {
        let mut dx = i64::from(stitch.x) - i64::from(px);
        let mut dy = i64::from(stitch.y) - i64::from(py);
        match stitch.command {
            CommandKind::Stitch => {
                // Long stitches subdivide into real stitches; turning them
                // into jumps would change what gets sewn.
                split_move(&mut records, &mut dx, &mut dy, WireKind::Stitch);
                records.push((dx as i32, dy as i32, WireKind::Stitch));
            }
            CommandKind::Jump => {
                split_move(&mut records, &mut dx, &mut dy, WireKind::Jump);
                records.push((dx as i32, dy as i32, WireKind::Jump));
            }
            CommandKind::ColorChange | CommandKind::Stop => {
                split_move(&mut records, &mut dx, &mut dy, WireKind::Jump);
                records.push((dx as i32, dy as i32, WireKind::ColorChange));
            }
            CommandKind::Trim => {
                // Move to the trim point first, then the three-jump
                // triangle that Tajima machines read as a trim.
                split_move(&mut records, &mut dx, &mut dy, WireKind::Jump);
                if dx != 0 || dy != 0 {
                    records.push((dx as i32, dy as i32, WireKind::Jump));
                }
                records.push((2, 2, WireKind::Jump));
                records.push((-4, -4, WireKind::Jump));
                records.push((2, 2, WireKind::Jump));
            }
            CommandKind::End => break,
        }
        px = stitch.x;
        py = stitch.y;
    }
    records
}

/// Emits clamped steps until the remaining displacement fits one record.
fn split_move(records: &mut Vec<(i32, i32, WireKind)>, dx: &mut i64, dy: &mut i64, kind: WireKind) {
    let limit = i64::from(MAX_DELTA);
    while dx.abs() > limit || dy.abs() > limit {
        let step_x = (*dx).clamp(-limit, limit);
        let step_y = (*dy).clamp(-limit, limit);
        records.push((step_x as i32, step_y as i32, kind));
        *dx -= step_x;
        *dy -= step_y;
    }
}

fn write_record(writer: &mut Writer, dx: i32, dy: i32, kind: WireKind) {
    let mut b0 = 0u8;
    let mut b1 = 0u8;
    let mut b2 = match kind {
        WireKind::Stitch => 0u8,
        WireKind::Jump => 0b1000_0000,
        WireKind::ColorChange => 0b1100_0000,
    };
    let mut x = dx;
    // Into wire space: y grows downward there.
    let mut y = -dy;

    if x > 40 {
        x -= 81;
        b2 |= 1 << 2;
    }
    if x < -40 {
        x += 81;
        b2 |= 1 << 3;
    }
    if x > 13 {
        x -= 27;
        b1 |= 1 << 2;
    }
    if x < -13 {
        x += 27;
        b1 |= 1 << 3;
    }
    if x > 4 {
        x -= 9;
        b0 |= 1 << 2;
    }
    if x < -4 {
        x += 9;
        b0 |= 1 << 3;
    }
    if x > 1 {
        x -= 3;
        b1 |= 1 << 0;
    }
    if x < -1 {
        x += 3;
        b1 |= 1 << 1;
    }
    if x > 0 {
        x -= 1;
        b0 |= 1 << 0;
    }
    if x < 0 {
        x += 1;
        b0 |= 1 << 1;
    }

    if y > 40 {
        y -= 81;
        b2 |= 1 << 5;
    }
    if y < -40 {
        y += 81;
        b2 |= 1 << 4;
    }
    if y > 13 {
        y -= 27;
        b1 |= 1 << 5;
    }
    if y < -13 {
        y += 27;
        b1 |= 1 << 4;
    }
    if y > 4 {
        y -= 9;
        b0 |= 1 << 5;
    }
    if y < -4 {
        y += 9;
        b0 |= 1 << 4;
    }
    if y > 1 {
        y -= 3;
        b1 |= 1 << 7;
    }
    if y < -1 {
        y += 3;
        b1 |= 1 << 6;
    }
    if y > 0 {
        y -= 1;
        b0 |= 1 << 7;
    }
    if y < 0 {
        y += 1;
        b0 |= 1 << 6;
    }

    debug_assert!(x == 0 && y == 0, "displacement exceeds one record");
    b2 |= BASE_BITS;
    writer.buf(&[b0, b1, b2]);
}
