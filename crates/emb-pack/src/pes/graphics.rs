//! PEC thumbnail icons.
//!
//! Every PEC section carries `n + 1` monochrome 48x38 icons after the stitch
//! block: one for the whole design, then one per palette entry. Machines show
//! them on the color-change screen. Each icon is a hoop-shaped frame with the
//! needle-down points of its color block plotted inside.

use super::constants::{ICON_BYTES, ICON_HEIGHT, ICON_STRIDE, ICON_WIDTH};
use crate::pattern::Bounds;

/// Sets one pixel. Bits run LSB-first within each stride byte.
fn set_pixel(frame: &mut [u8; ICON_BYTES], x: usize, y: usize) {
    frame[y * ICON_STRIDE + x / 8] |= 1 << (x % 8);
}

/// The empty frame: a one-pixel border inset from the icon edge.
pub fn blank_frame() -> [u8; ICON_BYTES] {
    let mut frame = [0u8; ICON_BYTES];
    for x in 4..=43 {
        set_pixel(&mut frame, x, 2);
        set_pixel(&mut frame, x, 35);
    }
    for y in 3..=34 {
        set_pixel(&mut frame, 3, y);
        set_pixel(&mut frame, 44, y);
    }
    frame
}

/// Renders the frame with `points` scaled to fit and centered inside it.
pub fn render_icon(points: &[(i32, i32)], bounds: Bounds) -> [u8; ICON_BYTES] {
    let mut frame = blank_frame();
    let width = bounds.width().max(1) as f64;
    let height = bounds.height().max(1) as f64;
    let scale = (39.0 / width).min(31.0 / height);
    let off_x = (39.0 - width * scale) / 2.0;
    let off_y = (31.0 - height * scale) / 2.0;
    for &(x, y) in points {
        let dx = (i64::from(x) - i64::from(bounds.min_x)) as f64;
        let dy = (i64::from(y) - i64::from(bounds.min_y)) as f64;
        let px = (4.0 + off_x + dx * scale).round() as i64;
        let py = (3.0 + off_y + dy * scale).round() as i64;
        let px = px.clamp(0, ICON_WIDTH as i64 - 1) as usize;
        let py = py.clamp(0, ICON_HEIGHT as i64 - 1) as usize;
        set_pixel(&mut frame, px, py);
    }
    frame
}
