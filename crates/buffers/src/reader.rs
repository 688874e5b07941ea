//! Binary buffer reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position and provides bounds-checked
/// methods for reading the integer widths embroidery files use. Multi-byte
/// reads are little-endian unless the method name says otherwise, matching
/// the file formats this crate serves.
///
/// # Example
///
/// ```
/// use emb_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8()?, 0x01);
/// assert_eq!(reader.u16_le()?, 0x0302);
/// # Ok::<(), emb_buffers::BufferError>(())
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len().saturating_sub(self.x)
    }

    /// Moves the cursor to an absolute position.
    ///
    /// Seeking past the end is not an error; the next read is.
    pub fn seek(&mut self, pos: usize) {
        self.x = pos;
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) {
        self.x += length;
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.want(1)?;
        Ok(self.uint8[self.x])
    }

    /// Returns a subslice of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.want(size)?;
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        Ok(bin)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.want(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 16-bit integer (little-endian).
    #[inline]
    pub fn u16_le(&mut self) -> Result<u16, BufferError> {
        self.want(2)?;
        let val = u16::from_le_bytes([self.uint8[self.x], self.uint8[self.x + 1]]);
        self.x += 2;
        Ok(val)
    }

    /// Reads an unsigned 24-bit integer (little-endian) into a `u32`.
    #[inline]
    pub fn u24_le(&mut self) -> Result<u32, BufferError> {
        self.want(3)?;
        let x = self.x;
        let val = (self.uint8[x] as u32)
            | ((self.uint8[x + 1] as u32) << 8)
            | ((self.uint8[x + 2] as u32) << 16);
        self.x += 3;
        Ok(val)
    }

    /// Reads an unsigned 32-bit integer (little-endian).
    #[inline]
    pub fn u32_le(&mut self) -> Result<u32, BufferError> {
        self.want(4)?;
        let val = u32::from_le_bytes([
            self.uint8[self.x],
            self.uint8[self.x + 1],
            self.uint8[self.x + 2],
            self.uint8[self.x + 3],
        ]);
        self.x += 4;
        Ok(val)
    }

    /// Reads an ASCII string of the given length.
    ///
    /// Non-UTF-8 header text reads as an empty string rather than failing;
    /// header labels are informational.
    pub fn ascii(&mut self, length: usize) -> Result<&'a str, BufferError> {
        self.want(length)?;
        let start = self.x;
        self.x += length;
        Ok(str::from_utf8(&self.uint8[start..self.x]).unwrap_or(""))
    }

    #[inline]
    fn want(&self, size: usize) -> Result<(), BufferError> {
        if self.size() < size {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(())
    }
}
