//! Decode results and non-fatal warnings.

use crate::pattern::Pattern;

/// A non-fatal observation made while decoding.
///
/// Warnings ride alongside a successfully decoded pattern; they never
/// replace it. Fatal conditions are errors, not warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// A declared header field disagrees with what the stitch stream
    /// actually contained. The stream wins.
    HeaderMismatch {
        field: &'static str,
        declared: u32,
        actual: u32,
    },
}

impl std::fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeWarning::HeaderMismatch {
                field,
                declared,
                actual,
            } => write!(
                f,
                "header field {field} declares {declared} but stream contains {actual}"
            ),
        }
    }
}

/// A decoded pattern plus anything worth reporting about the file.
#[derive(Debug)]
pub struct Decoded {
    pub pattern: Pattern,
    pub warnings: Vec<DecodeWarning>,
}

impl Decoded {
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(pattern: Pattern, warnings: Vec<DecodeWarning>) -> Self {
        Self { pattern, warnings }
    }
}
