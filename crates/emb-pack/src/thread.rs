//! Thread palette entries.

use crate::color::Color;

/// A palette entry: a color plus the catalog metadata PES version 6 headers
/// carry per thread.
///
/// Palette order is meaningful: the n-th color change in a stitch program
/// selects the n-th thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub color: Color,
    /// Human-readable color name, e.g. "Prussian Blue".
    pub description: String,
    pub brand: String,
    /// Manufacturer catalog number, stored as text in PES headers.
    pub catalog_number: String,
    /// Thread chart this entry belongs to, if any.
    pub chart: Option<String>,
}

impl Thread {
    /// Creates a thread with the given color and empty metadata.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            description: String::new(),
            brand: String::new(),
            catalog_number: String::new(),
            chart: None,
        }
    }
}

impl From<Color> for Thread {
    fn from(color: Color) -> Self {
        Thread::new(color)
    }
}
