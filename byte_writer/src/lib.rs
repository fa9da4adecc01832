//! Little-endian byte buffer used to lay out binary containers by hand.
//!
//! Offsets of fields that are only known later (chain pointers, lengths) can be
//! reserved with a placeholder and patched with the `replace_with_*` family.

pub struct ByteWriter {
    pub data: Vec<u8>,
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWriter {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn get_offset(&self) -> usize {
        self.data.len()
    }

    pub fn append_u32(&mut self, i: u32) {
        self.data.extend(i.to_le_bytes());
    }

    pub fn append_u16(&mut self, i: u16) {
        self.data.extend(i.to_le_bytes());
    }

    pub fn append_i16(&mut self, i: i16) {
        self.data.extend(i.to_le_bytes());
    }

    pub fn append_u8(&mut self, i: u8) {
        self.data.push(i);
    }

    pub fn append_u8_slice(&mut self, i: &[u8]) {
        self.data.extend_from_slice(i);
    }

    /// Appends `count` copies of `value`.
    pub fn append_repeated(&mut self, value: u8, count: usize) {
        self.data.resize(self.data.len() + count, value);
    }

    /// Zero fills up to `offset`. Does nothing if the buffer is already that long.
    pub fn pad_to(&mut self, offset: usize) {
        if self.data.len() < offset {
            self.data.resize(offset, 0);
        }
    }

    pub fn replace(&mut self, start: usize, slice: &[u8]) {
        self.data[start..(start + slice.len())].copy_from_slice(slice);
    }

    pub fn replace_with_u32(&mut self, start: usize, val: u32) {
        self.replace(start, &val.to_le_bytes());
    }
}

#[cfg(test)]
mod test {
    use super::ByteWriter;

    #[test]
    fn little_endian_layout() {
        let mut writer = ByteWriter::new();

        writer.append_u32(0x0403_0201);
        writer.append_i16(-2);
        writer.append_u8(7);

        assert_eq!(writer.data, [1, 2, 3, 4, 0xfe, 0xff, 7]);
        assert_eq!(writer.get_offset(), 7);
    }

    #[test]
    fn pad_and_patch() {
        let mut writer = ByteWriter::new();

        writer.append_u32(0);
        writer.pad_to(8);
        writer.pad_to(4);
        writer.replace_with_u32(0, 512);

        assert_eq!(writer.data.len(), 8);
        assert_eq!(&writer.data[..4], &512u32.to_le_bytes());
    }
}
