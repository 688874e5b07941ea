//! PES (Brother) embroidery format.
//!
//! A PES file is a version-tagged container around a PEC section, the part
//! the machine actually runs: label, palette, relative stitch stream, and
//! thumbnail icons. Version 1 is just that wrapper; version 6 adds metadata
//! strings and a true-color thread table, so decoding one recovers exact
//! palette colors instead of the nearest entries of the fixed 64-color
//! catalog. Bare `#PEC0001` files are accepted on decode as well.

pub mod catalog;
pub mod constants;
mod decoder;
mod encoder;
mod error;
mod graphics;
mod pec_decoder;
mod pec_encoder;

pub use constants::PesVersion;
pub use decoder::PesDecoder;
pub use encoder::PesEncoder;
pub use error::PesError;
