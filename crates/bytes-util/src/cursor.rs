use std::io::Cursor;

use bytes::Bytes;

/// Small helpers for working with a `Cursor<Bytes>` the way the rest of this workspace
/// reads framed payloads: carve off the remainder without copying.
pub trait BytesCursorExt {
    /// Return everything from the current position to the end of the buffer, advancing
    /// the cursor to the end.
    fn extract_remaining(&mut self) -> Bytes;
}

impl BytesCursorExt for Cursor<Bytes> {
    fn extract_remaining(&mut self) -> Bytes {
        let pos = self.position() as usize;
        let end = self.get_ref().len();
        let out = self.get_ref().slice(pos..end);
        self.set_position(end as u64);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_remaining() {
        let mut cursor = Cursor::new(Bytes::from_static(b"hello world"));
        cursor.set_position(6);
        assert_eq!(cursor.extract_remaining(), Bytes::from_static(b"world"));
    }
}
