use std::borrow::Cow;

use amf0::{Amf0Encoder, Amf0Value};

use super::define::NetStreamCommand;
use crate::command_messages::errors::CommandError;

impl NetStreamCommand<'_> {
    pub fn write(&self, buf: &mut Vec<u8>, transaction_id: f64) -> Result<(), CommandError> {
        match self {
            Self::Publish { stream_name, publish_type } => {
                Amf0Encoder::encode_string(buf, "publish")?;
                Amf0Encoder::encode_number(buf, transaction_id)?;
                Amf0Encoder::encode_null(buf)?;
                Amf0Encoder::encode_value(buf, &Amf0Value::String(stream_name.clone()))?;
                Amf0Encoder::encode_value(buf, &Amf0Value::String(publish_type.clone()))?;
                Ok(())
            }
            Self::FcUnpublish { stream_name } => {
                Amf0Encoder::encode_string(buf, "FCUnpublish")?;
                Amf0Encoder::encode_number(buf, transaction_id)?;
                Amf0Encoder::encode_null(buf)?;
                Amf0Encoder::encode_value(buf, &Amf0Value::String(stream_name.clone()))?;
                Ok(())
            }
            Self::DeleteStream { stream_id } => {
                Amf0Encoder::encode_string(buf, "deleteStream")?;
                Amf0Encoder::encode_number(buf, transaction_id)?;
                Amf0Encoder::encode_null(buf)?;
                Amf0Encoder::encode_number(buf, *stream_id)?;
                Ok(())
            }
            Self::CloseStream => {
                Amf0Encoder::encode_string(buf, "closeStream")?;
                Amf0Encoder::encode_number(buf, transaction_id)?;
                Amf0Encoder::encode_null(buf)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use amf0::Amf0Decoder;

    use super::*;

    #[test]
    fn test_write_publish() {
        let command = NetStreamCommand::Publish {
            stream_name: Cow::Borrowed("mystream"),
            publish_type: Cow::Borrowed("live"),
        };

        let mut buf = Vec::new();
        command.write(&mut buf, 4.0).unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        assert_eq!(decoder.decode().unwrap(), Amf0Value::String("publish".into()));
        assert_eq!(decoder.decode().unwrap(), Amf0Value::Number(4.0));
        assert_eq!(decoder.decode().unwrap(), Amf0Value::Null);
        assert_eq!(decoder.decode().unwrap(), Amf0Value::String("mystream".into()));
        assert_eq!(decoder.decode().unwrap(), Amf0Value::String("live".into()));
    }

    #[test]
    fn test_write_delete_stream() {
        let command = NetStreamCommand::DeleteStream { stream_id: 1.0 };

        let mut buf = Vec::new();
        command.write(&mut buf, 5.0).unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        assert_eq!(decoder.decode().unwrap(), Amf0Value::String("deleteStream".into()));
        assert_eq!(decoder.decode().unwrap(), Amf0Value::Number(5.0));
        assert_eq!(decoder.decode().unwrap(), Amf0Value::Null);
        assert_eq!(decoder.decode().unwrap(), Amf0Value::Number(1.0));
    }
}
