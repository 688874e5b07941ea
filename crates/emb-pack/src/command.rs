//! Stitch program commands.

/// The action a stitch program row performs at its coordinate.
///
/// A pattern is an ordered list of these; encoders translate them into
/// format-specific opcodes and decoders translate back. `End` marks the end
/// of a stitch program; decoders record it, but encoders terminate their
/// output exactly once whether or not the pattern carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Needle down at the coordinate.
    Stitch,
    /// Move without stitching.
    Jump,
    /// Cut the thread.
    Trim,
    /// Switch to the next thread in the palette.
    ColorChange,
    /// Halt the machine until the operator resumes.
    Stop,
    /// End of the stitch program.
    End,
}

impl CommandKind {
    /// True for commands that put the needle down.
    #[inline]
    pub fn is_stitch(&self) -> bool {
        matches!(self, CommandKind::Stitch)
    }
}
