//! PES container encoder.

use emb_buffers::Writer;

use super::constants::{
    AFFINE_IDENTITY, MAX_COLOR_BLOCKS, PES_V1_MAGIC, PES_V6_MAGIC, PesVersion, V6_THREAD_TYPE,
};
use super::error::PesError;
use super::pec_encoder;
use crate::pattern::Pattern;
use crate::thread::Thread;

/// Encodes a [`Pattern`] into a PES file.
///
/// Version 1 stores nothing but the PEC section; version 6 adds a metadata
/// header and a true-color thread table in front of it, so palettes survive
/// a round trip exactly instead of snapping to the 64-color catalog.
///
/// Validation happens before the first byte is written: on error the writer
/// is left clean and no output is produced.
pub struct PesEncoder {
    pub writer: Writer,
    pub version: PesVersion,
    /// Design name, written into the header and the PEC label.
    pub label: String,
}

impl PesEncoder {
    pub fn new() -> Self {
        Self::with_version(PesVersion::V6)
    }

    pub fn with_version(version: PesVersion) -> Self {
        Self {
            writer: Writer::new(),
            version,
            label: "Untitled".to_owned(),
        }
    }

    pub fn with_label(version: PesVersion, label: &str) -> Self {
        Self {
            writer: Writer::new(),
            version,
            label: label.to_owned(),
        }
    }

    /// Encodes the pattern, returning the complete file bytes.
    pub fn encode(&mut self, pattern: &Pattern) -> Result<Vec<u8>, PesError> {
        self.writer.reset();
        match self.encode_document(pattern) {
            Ok(()) => Ok(self.writer.flush()),
            Err(err) => {
                self.writer.reset();
                Err(err)
            }
        }
    }

    fn encode_document(&mut self, pattern: &Pattern) -> Result<(), PesError> {
        if pattern.count_stitches() == 0 {
            return Err(PesError::EmptyPattern);
        }
        let emission = pec_encoder::emission_palette(pattern)?;
        if emission.len() > MAX_COLOR_BLOCKS {
            return Err(PesError::TooManyColors(emission.len()));
        }
        let offset_at = match self.version {
            PesVersion::V1 => write_v1_header(&mut self.writer),
            PesVersion::V6 => write_v6_header(&mut self.writer, &emission, &self.label),
        };
        let pec_at = self.writer.tell();
        self.writer.set_u32_le(offset_at, pec_at as u32)?;
        pec_encoder::write_pec(&mut self.writer, pattern, &emission, &self.label)?;
        Ok(())
    }
}

impl Default for PesEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// The version 1 header: signature, PEC pointer, and five header words.
fn write_v1_header(writer: &mut Writer) -> usize {
    writer.buf(PES_V1_MAGIC);
    let offset_at = writer.tell();
    writer.u32_le(0);
    writer.u16_le(0x01);
    writer.u16_le(0x01);
    writer.u16_le(0x00);
    writer.u16_le(0x00);
    writer.u16_le(0x00);
    offset_at
}

/// The version 6 header: metadata strings, editor settings, and the
/// true-color thread table. Readers locate the PEC section through the
/// patched offset, so the settings block can stay zeroed.
fn write_v6_header(writer: &mut Writer, emission: &[Thread], label: &str) -> usize {
    writer.buf(PES_V6_MAGIC);
    let offset_at = writer.tell();
    writer.u32_le(0);
    writer.u16_le(0x01);
    writer.ascii("02");
    write_string_8(writer, label);
    for _ in 0..4 {
        write_string_8(writer, ""); // category, author, keywords, comments
    }
    for _ in 0..18 {
        writer.u16_le(0);
    }
    write_string_16(writer, ""); // background image path
    for value in AFFINE_IDENTITY {
        writer.f32_le(value);
    }
    writer.u16_le(0); // programmable fills
    writer.u16_le(0); // motifs
    writer.u16_le(0); // feather patterns
    writer.u16_le(emission.len() as u16);
    for thread in emission {
        write_thread(writer, thread);
    }
    writer.u16_le(0); // object sections: none
    writer.u16_le(0);
    offset_at
}

fn write_thread(writer: &mut Writer, thread: &Thread) {
    write_string_8(writer, &thread.catalog_number);
    writer.u8(thread.color.r);
    writer.u8(thread.color.g);
    writer.u8(thread.color.b);
    writer.u8(0x00);
    writer.u32_le(V6_THREAD_TYPE);
    write_string_8(writer, &thread.description);
    write_string_8(writer, &thread.brand);
    write_string_8(writer, thread.chart.as_deref().unwrap_or(""));
}

/// A string with a one-byte length prefix, clipped at 255 bytes.
fn write_string_8(writer: &mut Writer, value: &str) {
    let bytes = value.as_bytes();
    let len = bytes.len().min(255);
    writer.u8(len as u8);
    writer.buf(&bytes[..len]);
}

/// A string with a two-byte length prefix.
fn write_string_16(writer: &mut Writer, value: &str) {
    let bytes = value.as_bytes();
    let len = bytes.len().min(usize::from(u16::MAX));
    writer.u16_le(len as u16);
    writer.buf(&bytes[..len]);
}
