//! Structured design payloads.
//!
//! This is the typed boundary shape callers hand in to build a pattern
//! from scratch, and the shape [`Pattern::to_design`](crate::Pattern::to_design)
//! exposes for re-serialization. Unknown fields and unknown command strings
//! are rejected; nothing defaults silently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Color, ColorError};
use crate::command::CommandKind;

/// Error type for building a pattern from a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesignError {
    #[error("color error: {0}")]
    Color(#[from] ColorError),
}

/// Command vocabulary of the structured payload.
///
/// End-of-program is deliberately absent: terminators are emitted by the
/// encoders exactly once and are not part of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesignCommand {
    Stitch,
    Jump,
    Stop,
    Trim,
    ColorChange,
}

impl DesignCommand {
    /// The model command this payload command stands for.
    pub fn kind(self) -> CommandKind {
        match self {
            DesignCommand::Stitch => CommandKind::Stitch,
            DesignCommand::Jump => CommandKind::Jump,
            DesignCommand::Stop => CommandKind::Stop,
            DesignCommand::Trim => CommandKind::Trim,
            DesignCommand::ColorChange => CommandKind::ColorChange,
        }
    }

    /// The payload command for a model command, `None` for commands the
    /// payload does not carry.
    pub fn from_kind(kind: CommandKind) -> Option<Self> {
        match kind {
            CommandKind::Stitch => Some(DesignCommand::Stitch),
            CommandKind::Jump => Some(DesignCommand::Jump),
            CommandKind::Stop => Some(DesignCommand::Stop),
            CommandKind::Trim => Some(DesignCommand::Trim),
            CommandKind::ColorChange => Some(DesignCommand::ColorChange),
            CommandKind::End => None,
        }
    }
}

/// One payload stitch row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignStitch {
    pub x: i32,
    pub y: i32,
    pub command: DesignCommand,
}

/// The structured payload: an ordered stitch list, a thread color list, and
/// a hex color list that overlays it (see
/// [`Pattern::from_scratch`](crate::Pattern::from_scratch)).
///
/// All three lists default to empty so a payload can carry only the parts
/// it has.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Design {
    #[serde(default)]
    pub stitches: Vec<DesignStitch>,
    #[serde(default)]
    pub threads: Vec<Color>,
    #[serde(default)]
    pub hex_colors: Vec<String>,
}
