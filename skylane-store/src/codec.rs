/// Writes the fields of one record into a fixed-width buffer.
///
/// Records are laid out as a fixed sequence of fields: little-endian
/// integers and NUL-padded text slots of a declared byte width. An encode
/// and its decode must walk the same fields in the same order.
pub struct FieldWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FieldWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Write `value` into a `width`-byte slot, NUL-padding the remainder.
    pub fn text(&mut self, width: usize, value: &str) {
        let bytes = value.as_bytes();
        debug_assert!(bytes.len() <= width, "text exceeds field width");
        let len = bytes.len().min(width);
        let slot = &mut self.buf[self.pos..self.pos + width];
        slot[..len].copy_from_slice(&bytes[..len]);
        slot[len..].fill(0);
        self.pos += width;
    }

    pub fn byte(&mut self, value: u8) {
        self.buf[self.pos] = value;
        self.pos += 1;
    }

    pub fn u32(&mut self, value: u32) {
        self.buf[self.pos..self.pos + 4].copy_from_slice(&value.to_le_bytes());
        self.pos += 4;
    }

    pub fn f64(&mut self, value: f64) {
        self.buf[self.pos..self.pos + 8].copy_from_slice(&value.to_le_bytes());
        self.pos += 8;
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.pos
    }
}

/// Reads record fields back out of a fixed-width buffer.
pub struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Read a `width`-byte text slot up to its first NUL.
    pub fn text(&mut self, width: usize) -> String {
        let slot = &self.buf[self.pos..self.pos + width];
        self.pos += width;
        let end = slot.iter().position(|&b| b == 0).unwrap_or(width);
        String::from_utf8_lossy(&slot[..end]).into_owned()
    }

    pub fn byte(&mut self) -> u8 {
        let value = self.buf[self.pos];
        self.pos += 1;
        value
    }

    pub fn u32(&mut self) -> u32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.buf[self.pos..self.pos + 4]);
        self.pos += 4;
        u32::from_le_bytes(raw)
    }

    pub fn f64(&mut self) -> f64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.buf[self.pos..self.pos + 8]);
        self.pos += 8;
        f64::from_le_bytes(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_roundtrip() {
        let mut buf = [0u8; 23];
        let mut writer = FieldWriter::new(&mut buf);
        writer.text(10, "Marseille");
        writer.byte(42);
        writer.u32(7_000_123);
        writer.f64(199.99);
        assert_eq!(writer.written(), 23);

        let mut reader = FieldReader::new(&buf);
        assert_eq!(reader.text(10), "Marseille");
        assert_eq!(reader.byte(), 42);
        assert_eq!(reader.u32(), 7_000_123);
        assert_eq!(reader.f64(), 199.99);
    }

    #[test]
    fn test_text_slot_is_nul_padded() {
        let mut buf = [0xffu8; 8];
        FieldWriter::new(&mut buf).text(8, "abc");
        assert_eq!(&buf, b"abc\0\0\0\0\0");
    }

    #[test]
    fn test_full_width_text_reads_back() {
        let mut buf = [0u8; 3];
        FieldWriter::new(&mut buf).text(3, "abc");
        assert_eq!(FieldReader::new(&buf).text(3), "abc");
    }
}
