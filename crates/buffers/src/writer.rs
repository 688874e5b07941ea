//! Binary buffer writer with an auto-growing backing buffer.

use crate::BufferError;

/// A binary buffer writer that appends data to a growable buffer.
///
/// The writer tracks two positions: `x0`, where the current document
/// started, and `x`, the append cursor. [`flush`](Writer::flush) returns
/// the bytes between them and starts the next document; [`reset`](Writer::reset)
/// discards a partially written document instead. Encoders rely on this to
/// never hand out partial output: write everything, then flush once.
///
/// Offset fields that are only known after later bytes are written (section
/// lengths, pointers to an embedded section) are written as placeholders and
/// patched with the `set_*` methods, whose positions are relative to the
/// current document start, the same base [`tell`](Writer::tell) reports.
pub struct Writer {
    /// The backing buffer.
    pub uint8: Vec<u8>,
    /// Start of the current document.
    pub x0: usize,
    /// Append cursor.
    pub x: usize,
}

impl Writer {
    /// Creates a new writer with the default allocation size.
    pub fn new() -> Self {
        Self::with_alloc_size(4096)
    }

    /// Creates a new writer with the given initial allocation size.
    pub fn with_alloc_size(size: usize) -> Self {
        Self {
            uint8: vec![0; size],
            x0: 0,
            x: 0,
        }
    }

    /// Ensures at least `capacity` more bytes can be written.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let needed = self.x + capacity;
        if needed > self.uint8.len() {
            let grown = (self.uint8.len() * 2).max(needed);
            self.uint8.resize(grown, 0);
        }
    }

    /// Returns the number of bytes written into the current document.
    #[inline]
    pub fn tell(&self) -> usize {
        self.x - self.x0
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, byte: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = byte;
        self.x += 1;
    }

    /// Writes an unsigned 16-bit integer (little-endian).
    #[inline]
    pub fn u16_le(&mut self, value: u16) {
        self.buf(&value.to_le_bytes());
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16_be(&mut self, value: u16) {
        self.buf(&value.to_be_bytes());
    }

    /// Writes the low 24 bits of a `u32` (little-endian).
    #[inline]
    pub fn u24_le(&mut self, value: u32) {
        let b = value.to_le_bytes();
        self.buf(&b[..3]);
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self, value: u32) {
        self.buf(&value.to_le_bytes());
    }

    /// Writes a 32-bit floating point number (little-endian).
    #[inline]
    pub fn f32_le(&mut self, value: f32) {
        self.buf(&value.to_le_bytes());
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, data: &[u8]) {
        self.ensure_capacity(data.len());
        self.uint8[self.x..self.x + data.len()].copy_from_slice(data);
        self.x += data.len();
    }

    /// Writes the bytes of an ASCII string.
    pub fn ascii(&mut self, str: &str) {
        self.buf(str.as_bytes());
    }

    /// Writes `count` copies of `byte`.
    pub fn pad(&mut self, byte: u8, count: usize) {
        self.ensure_capacity(count);
        for _ in 0..count {
            self.uint8[self.x] = byte;
            self.x += 1;
        }
    }

    /// Patches a single byte at a document-relative position.
    pub fn set_u8(&mut self, at: usize, byte: u8) -> Result<(), BufferError> {
        self.check_patch(at, 1)?;
        self.uint8[self.x0 + at] = byte;
        Ok(())
    }

    /// Patches the low 24 bits of a `u32` (little-endian) at a
    /// document-relative position.
    pub fn set_u24_le(&mut self, at: usize, value: u32) -> Result<(), BufferError> {
        self.check_patch(at, 3)?;
        let b = value.to_le_bytes();
        self.uint8[self.x0 + at..self.x0 + at + 3].copy_from_slice(&b[..3]);
        Ok(())
    }

    /// Patches an unsigned 32-bit integer (little-endian) at a
    /// document-relative position.
    pub fn set_u32_le(&mut self, at: usize, value: u32) -> Result<(), BufferError> {
        self.check_patch(at, 4)?;
        self.uint8[self.x0 + at..self.x0 + at + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Returns the current document and starts the next one.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        out
    }

    /// Discards the current document.
    pub fn reset(&mut self) {
        self.x = self.x0;
    }

    #[inline]
    fn check_patch(&self, at: usize, size: usize) -> Result<(), BufferError> {
        if at + size > self.tell() {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(())
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
