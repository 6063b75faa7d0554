use std::borrow::Cow;

use byteorder::{BigEndian, ByteOrder};
use num_traits::FromPrimitive;

use crate::errors::Amf0Error;
use crate::marker::Amf0Marker;
use crate::value::Amf0Value;

/// A cursor-based AMF0 decoder over a borrowed byte slice.
pub struct Amf0Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Amf0Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn has_remaining(&self) -> bool {
        self.pos < self.data.len()
    }

    fn peek_u8(&self) -> Result<u8, Amf0Error> {
        self.data.get(self.pos).copied().ok_or(Amf0Error::UnexpectedEof)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Amf0Error> {
        if self.pos + len > self.data.len() {
            return Err(Amf0Error::UnexpectedEof);
        }
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn read_marker(&mut self) -> Result<Amf0Marker, Amf0Error> {
        let byte = self.take(1)?[0];
        Amf0Marker::from_u8(byte).ok_or(Amf0Error::UnknownMarker(byte))
    }

    fn read_utf8_short(&mut self) -> Result<Cow<'a, str>, Amf0Error> {
        let len = BigEndian::read_u16(self.take(2)?) as usize;
        let bytes = self.take(len)?;
        Ok(Cow::Borrowed(std::str::from_utf8(bytes)?))
    }

    fn read_utf8_long(&mut self) -> Result<Cow<'a, str>, Amf0Error> {
        let len = BigEndian::read_u32(self.take(4)?) as usize;
        let bytes = self.take(len)?;
        Ok(Cow::Borrowed(std::str::from_utf8(bytes)?))
    }

    fn read_object_entries(&mut self) -> Result<Vec<(Cow<'a, str>, Amf0Value<'a>)>, Amf0Error> {
        let mut entries = Vec::new();
        loop {
            // Peek for the 0x0000 0x09 terminator: a zero-length key followed by ObjectEnd.
            let key_len = BigEndian::read_u16(self.data.get(self.pos..self.pos + 2).ok_or(Amf0Error::UnexpectedEof)?);
            if key_len == 0 {
                let marker_pos = self.pos + 2;
                let marker = *self.data.get(marker_pos).ok_or(Amf0Error::UnterminatedObject)?;
                if marker == Amf0Marker::ObjectEnd as u8 {
                    self.pos = marker_pos + 1;
                    break;
                }
            }

            let key = self.read_utf8_short()?;
            let value = self.decode()?;
            entries.push((key, value));
        }
        Ok(entries)
    }

    /// Decode the next value regardless of its marker.
    pub fn decode(&mut self) -> Result<Amf0Value<'a>, Amf0Error> {
        match self.read_marker()? {
            Amf0Marker::Number => Ok(Amf0Value::Number(BigEndian::read_f64(self.take(8)?))),
            Amf0Marker::Boolean => Ok(Amf0Value::Boolean(self.take(1)?[0] != 0)),
            Amf0Marker::String => Ok(Amf0Value::String(self.read_utf8_short()?)),
            Amf0Marker::Object => Ok(Amf0Value::Object(self.read_object_entries()?)),
            Amf0Marker::Null => Ok(Amf0Value::Null),
            Amf0Marker::Undefined => Ok(Amf0Value::Undefined),
            Amf0Marker::EcmaArray => {
                let _count = BigEndian::read_u32(self.take(4)?);
                Ok(Amf0Value::EcmaArray(self.read_object_entries()?))
            }
            Amf0Marker::StrictArray => {
                let count = BigEndian::read_u32(self.take(4)?);
                let mut values = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    values.push(self.decode()?);
                }
                Ok(Amf0Value::StrictArray(values))
            }
            Amf0Marker::LongString => Ok(Amf0Value::String(self.read_utf8_long()?)),
            Amf0Marker::Reference | Amf0Marker::Date | Amf0Marker::ObjectEnd => {
                Err(Amf0Error::UnknownMarker(self.data[self.pos - 1]))
            }
        }
    }

    /// Decode the next value, requiring it to carry the given marker. On mismatch, the
    /// cursor is left untouched so the caller can retry with a different expected marker.
    pub fn decode_with_type(&mut self, expected: Amf0Marker) -> Result<Amf0Value<'a>, Amf0Error> {
        let actual_byte = self.peek_u8()?;
        let actual = Amf0Marker::from_u8(actual_byte).ok_or(Amf0Error::UnknownMarker(actual_byte))?;
        if actual != expected {
            return Err(Amf0Error::UnexpectedType { expected, actual });
        }
        self.decode()
    }

    /// Decode every remaining value in the buffer.
    pub fn decode_all(&mut self) -> Result<Vec<Amf0Value<'a>>, Amf0Error> {
        let mut out = Vec::new();
        while self.has_remaining() {
            out.push(self.decode()?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Amf0Encoder;

    #[test]
    fn test_round_trip_string_and_number() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_string(&mut buf, "connect").unwrap();
        Amf0Encoder::encode_number(&mut buf, 3.0).unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        assert_eq!(decoder.decode().unwrap(), Amf0Value::String("connect".into()));
        assert_eq!(decoder.decode().unwrap(), Amf0Value::Number(3.0));
        assert!(!decoder.has_remaining());
    }

    #[test]
    fn test_round_trip_object() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_object(
            &mut buf,
            &[("app".into(), Amf0Value::String("live".into())), ("duration".into(), Amf0Value::Number(0.0))],
        )
        .unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        let value = decoder.decode_with_type(Amf0Marker::Object).unwrap();
        match value {
            Amf0Value::Object(entries) => {
                assert_eq!(entries[0].0, "app");
                assert_eq!(entries[0].1, Amf0Value::String("live".into()));
                assert_eq!(entries[1].1, Amf0Value::Number(0.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_decode_with_type_mismatch_leaves_cursor() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_null(&mut buf).unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        assert!(decoder.decode_with_type(Amf0Marker::Object).is_err());
        // cursor untouched, so a retry with the right marker still works
        assert_eq!(decoder.decode_with_type(Amf0Marker::Null).unwrap(), Amf0Value::Null);
    }
}
