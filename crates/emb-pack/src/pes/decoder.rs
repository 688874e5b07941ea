//! PES container decoder.

use emb_buffers::Reader;

use super::constants::{PEC_MAGIC, PES_V1_MAGIC, PES_V6_MAGIC};
use super::error::PesError;
use super::pec_decoder;
use crate::color::Color;
use crate::report::Decoded;
use crate::thread::Thread;

/// Decodes PES files, and bare PEC files saved with the `#PEC0001`
/// signature.
///
/// Only the signature and the PEC pointer are trusted; unknown header
/// content between them is skipped, so files from editors that embed object
/// sections still decode. An unknown signature is refused.
pub struct PesDecoder;

impl PesDecoder {
    pub fn new() -> Self {
        PesDecoder
    }

    pub fn decode(&mut self, data: &[u8]) -> Result<Decoded, PesError> {
        let mut reader = Reader::new(data);
        let magic = reader.buf(8)?;
        if magic == PES_V1_MAGIC {
            return decode_v1(&mut reader);
        }
        if magic == PES_V6_MAGIC {
            return decode_v6(&mut reader);
        }
        if magic == PEC_MAGIC {
            return pec_decoder::read_pec(&mut reader, Vec::new());
        }
        Err(PesError::UnsupportedVersion(
            String::from_utf8_lossy(magic).into_owned(),
        ))
    }
}

impl Default for PesDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Version 1 holds nothing we need besides the PEC pointer.
fn decode_v1(reader: &mut Reader) -> Result<Decoded, PesError> {
    let pec_at = reader.u32_le()? as usize;
    reader.seek(pec_at);
    pec_decoder::read_pec(reader, Vec::new())
}

/// Version 6: walk the metadata strings to reach the thread table, then
/// jump to the PEC section through the header pointer.
fn decode_v6(reader: &mut Reader) -> Result<Decoded, PesError> {
    let pec_at = reader.u32_le()? as usize;
    reader.skip(4); // hoop word and subversion tag
    for _ in 0..5 {
        read_string_8(reader)?; // name, category, author, keywords, comments
    }
    reader.skip(36); // editor settings
    let image_len = reader.u16_le()? as usize;
    reader.skip(image_len);
    reader.skip(24); // affine transform
    let fills = reader.u16_le()?;
    let motifs = reader.u16_le()?;
    let feathers = reader.u16_le()?;
    let mut chart = Vec::new();
    // Fill, motif and feather sections have no fixed size; if any are
    // present the thread table cannot be located, so decode without it.
    if fills == 0 && motifs == 0 && feathers == 0 {
        let count = reader.u16_le()? as usize;
        chart.reserve(count);
        for _ in 0..count {
            chart.push(read_thread(reader)?);
        }
    }
    reader.seek(pec_at);
    pec_decoder::read_pec(reader, chart)
}

fn read_thread(reader: &mut Reader) -> Result<Thread, PesError> {
    let catalog_number = read_string_8(reader)?;
    let r = reader.u8()?;
    let g = reader.u8()?;
    let b = reader.u8()?;
    reader.skip(5); // reserved byte and thread type word
    let description = read_string_8(reader)?;
    let brand = read_string_8(reader)?;
    let chart = read_string_8(reader)?;
    Ok(Thread {
        color: Color::new(r, g, b),
        description,
        brand,
        catalog_number,
        chart: if chart.is_empty() { None } else { Some(chart) },
    })
}

fn read_string_8(reader: &mut Reader) -> Result<String, PesError> {
    let len = reader.u8()? as usize;
    Ok(reader.ascii(len)?.to_owned())
}
