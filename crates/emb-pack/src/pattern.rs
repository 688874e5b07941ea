//! The embroidery pattern model.

use crate::codecs::{self, CodecError};
use crate::color::Color;
use crate::command::CommandKind;
use crate::design::{Design, DesignCommand, DesignError, DesignStitch};
use crate::report::Decoded;
use crate::thread::Thread;

/// One row of a stitch program: an absolute coordinate in 0.1 mm units and
/// the command performed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stitch {
    pub x: i32,
    pub y: i32,
    pub command: CommandKind,
}

/// Axis-aligned extents of a stitch program, in 0.1 mm units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Horizontal span. The corners are `i32`, so the span needs `i64`.
    pub fn width(&self) -> i64 {
        i64::from(self.max_x) - i64::from(self.min_x)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.max_y) - i64::from(self.min_y)
    }

    fn extend(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// An embroidery design: an ordered stitch program plus the thread palette
/// its color changes walk through.
///
/// The bounding box is derived state, maintained on every append; it is
/// never accepted from outside, so it cannot disagree with the program.
/// An empty program reports zero bounds.
///
/// # Example
///
/// ```
/// use emb_pack::{Color, CommandKind, Pattern, Thread};
///
/// let mut pattern = Pattern::new();
/// pattern.add_thread(Thread::new(Color::new(237, 23, 31)));
/// pattern.add_stitch(0, 0, CommandKind::Stitch);
/// pattern.add_stitch(30, -10, CommandKind::Stitch);
/// assert_eq!(pattern.count_stitches(), 2);
/// assert_eq!(pattern.bounds().width(), 30);
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    stitches: Vec<Stitch>,
    threads: Vec<Thread>,
    bounds: Option<Bounds>,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Self {
            stitches: Vec::new(),
            threads: Vec::new(),
            bounds: None,
        }
    }

    /// Builds a pattern from a structured payload.
    ///
    /// The palette starts as the payload's `threads`; `hex_colors` then
    /// overlay it positionally, and entries past the end of the thread list
    /// append as new threads, so a payload may define its palette through
    /// either field or both. A malformed hex string fails the whole
    /// construction.
    pub fn from_scratch(design: &Design) -> Result<Pattern, DesignError> {
        let mut pattern = Pattern::new();
        for color in &design.threads {
            pattern.add_thread(Thread::new(*color));
        }
        for (i, hex) in design.hex_colors.iter().enumerate() {
            let color = Color::from_hex(hex)?;
            if i < pattern.threads.len() {
                pattern.threads[i].color = color;
            } else {
                pattern.add_thread(Thread::new(color));
            }
        }
        for stitch in &design.stitches {
            pattern.add_stitch(stitch.x, stitch.y, stitch.command.kind());
        }
        Ok(pattern)
    }

    /// Decodes a pattern from raw file bytes, sniffing the format.
    ///
    /// Returns the pattern together with any non-fatal decode warnings.
    pub fn from_decoded_bytes(bytes: &[u8]) -> Result<Decoded, CodecError> {
        codecs::decode_bytes(bytes)
    }

    /// Appends a thread to the palette.
    ///
    /// No dedup and no ceiling here; format limits are enforced at encode
    /// time, where the format is known.
    pub fn add_thread(&mut self, thread: Thread) {
        self.threads.push(thread);
    }

    /// Appends a command at an absolute coordinate.
    pub fn add_stitch(&mut self, x: i32, y: i32, command: CommandKind) {
        match &mut self.bounds {
            Some(bounds) => bounds.extend(x, y),
            None => {
                self.bounds = Some(Bounds {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                })
            }
        }
        self.stitches.push(Stitch { x, y, command });
    }

    /// Swaps the whole palette atomically.
    ///
    /// Color-change commands are positional and are not rewritten; encoders
    /// re-validate the program against the new palette before emitting.
    pub fn replace_palette(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
    }

    /// Overwrites thread colors positionally.
    ///
    /// Colors past the end of the palette are ignored; thread metadata is
    /// kept. This is the recolor operation: same program, new colors.
    pub fn recolor(&mut self, colors: &[Color]) {
        for (thread, color) in self.threads.iter_mut().zip(colors) {
            thread.color = *color;
        }
    }

    /// The stitch program.
    pub fn stitches(&self) -> &[Stitch] {
        &self.stitches
    }

    /// The thread palette, in color-change order.
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Extents over every command coordinate in the program.
    pub fn bounds(&self) -> Bounds {
        self.bounds.unwrap_or_default()
    }

    /// Number of needle-down commands.
    pub fn count_stitches(&self) -> usize {
        self.stitches.iter().filter(|s| s.command.is_stitch()).count()
    }

    /// Number of color-change commands.
    pub fn count_color_changes(&self) -> usize {
        self.stitches
            .iter()
            .filter(|s| s.command == CommandKind::ColorChange)
            .count()
    }

    /// Exposes the pattern as the structured payload shape.
    ///
    /// End-of-program rows are dropped; terminators belong to the codecs,
    /// not the payload.
    pub fn to_design(&self) -> Design {
        let stitches = self
            .stitches
            .iter()
            .filter_map(|s| {
                DesignCommand::from_kind(s.command).map(|command| DesignStitch {
                    x: s.x,
                    y: s.y,
                    command,
                })
            })
            .collect();
        let threads: Vec<Color> = self.threads.iter().map(|t| t.color).collect();
        let hex_colors = threads.iter().map(|c| c.to_hex()).collect();
        Design {
            stitches,
            threads,
            hex_colors,
        }
    }
}
