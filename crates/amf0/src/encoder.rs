use std::io;

use byteorder::{BigEndian, WriteBytesExt};

use crate::errors::Amf0Error;
use crate::marker::Amf0Marker;
use crate::value::Amf0Value;

/// Stateless AMF0 encoding functions, writing directly onto an `io::Write`.
pub struct Amf0Encoder;

impl Amf0Encoder {
    pub fn encode_number(writer: &mut impl io::Write, value: f64) -> Result<(), Amf0Error> {
        writer.write_u8(Amf0Marker::Number as u8)?;
        writer.write_f64::<BigEndian>(value)?;
        Ok(())
    }

    pub fn encode_boolean(writer: &mut impl io::Write, value: bool) -> Result<(), Amf0Error> {
        writer.write_u8(Amf0Marker::Boolean as u8)?;
        writer.write_u8(value as u8)?;
        Ok(())
    }

    pub fn encode_string(writer: &mut impl io::Write, value: &str) -> Result<(), Amf0Error> {
        writer.write_u8(Amf0Marker::String as u8)?;
        Self::write_utf8_short(writer, value)
    }

    pub fn encode_null(writer: &mut impl io::Write) -> Result<(), Amf0Error> {
        writer.write_u8(Amf0Marker::Null as u8)?;
        Ok(())
    }

    pub fn encode_undefined(writer: &mut impl io::Write) -> Result<(), Amf0Error> {
        writer.write_u8(Amf0Marker::Undefined as u8)?;
        Ok(())
    }

    pub fn encode_object(writer: &mut impl io::Write, entries: &[(std::borrow::Cow<'_, str>, Amf0Value<'_>)]) -> Result<(), Amf0Error> {
        writer.write_u8(Amf0Marker::Object as u8)?;
        Self::write_entries(writer, entries)?;
        Self::write_object_end(writer)
    }

    pub fn encode_ecma_array(writer: &mut impl io::Write, entries: &[(std::borrow::Cow<'_, str>, Amf0Value<'_>)]) -> Result<(), Amf0Error> {
        writer.write_u8(Amf0Marker::EcmaArray as u8)?;
        writer.write_u32::<BigEndian>(entries.len() as u32)?;
        Self::write_entries(writer, entries)?;
        Self::write_object_end(writer)
    }

    /// Encode any [`Amf0Value`], dispatching on its variant. Used both for top-level
    /// values and recursively for object/array members.
    pub fn encode_value(writer: &mut impl io::Write, value: &Amf0Value<'_>) -> Result<(), Amf0Error> {
        match value {
            Amf0Value::Number(n) => Self::encode_number(writer, *n),
            Amf0Value::Boolean(b) => Self::encode_boolean(writer, *b),
            Amf0Value::String(s) => Self::encode_string(writer, s),
            Amf0Value::Object(entries) => Self::encode_object(writer, entries),
            Amf0Value::Null => Self::encode_null(writer),
            Amf0Value::Undefined => Self::encode_undefined(writer),
            Amf0Value::EcmaArray(entries) => Self::encode_ecma_array(writer, entries),
            Amf0Value::StrictArray(values) => {
                writer.write_u8(Amf0Marker::StrictArray as u8)?;
                writer.write_u32::<BigEndian>(values.len() as u32)?;
                for v in values {
                    Self::encode_value(writer, v)?;
                }
                Ok(())
            }
        }
    }

    fn write_entries(writer: &mut impl io::Write, entries: &[(std::borrow::Cow<'_, str>, Amf0Value<'_>)]) -> Result<(), Amf0Error> {
        for (key, value) in entries {
            Self::write_utf8_short(writer, key)?;
            Self::encode_value(writer, value)?;
        }
        Ok(())
    }

    fn write_object_end(writer: &mut impl io::Write) -> Result<(), Amf0Error> {
        writer.write_u16::<BigEndian>(0)?;
        writer.write_u8(Amf0Marker::ObjectEnd as u8)?;
        Ok(())
    }

    fn write_utf8_short(writer: &mut impl io::Write, value: &str) -> Result<(), Amf0Error> {
        writer.write_u16::<BigEndian>(value.len() as u16)?;
        writer.write_all(value.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_string() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_string(&mut buf, "ok").unwrap();
        assert_eq!(buf, vec![0x02, 0x00, 0x02, b'o', b'k']);
    }

    #[test]
    fn test_encode_number() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_number(&mut buf, 1.0).unwrap();
        assert_eq!(buf[0], 0x00);
        assert_eq!(buf.len(), 9);
    }

    #[test]
    fn test_encode_object_terminator() {
        let mut buf = Vec::new();
        Amf0Encoder::encode_object(&mut buf, &[]).unwrap();
        assert_eq!(buf, vec![0x03, 0x00, 0x00, 0x09]);
    }
}
