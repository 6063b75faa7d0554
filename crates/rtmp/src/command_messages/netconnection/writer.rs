use std::borrow::Cow;

use amf0::{Amf0Encoder, Amf0Value};

use super::define::NetConnectionCommand;
use crate::command_messages::errors::CommandError;

impl NetConnectionCommand<'_> {
    pub fn write(&self, buf: &mut Vec<u8>, transaction_id: f64) -> Result<(), CommandError> {
        match self {
            Self::Connect { app, tc_url, flash_ver } => {
                Amf0Encoder::encode_string(buf, "connect")?;
                Amf0Encoder::encode_number(buf, transaction_id)?;
                Amf0Encoder::encode_object(
                    buf,
                    &[
                        (Cow::Borrowed("app"), Amf0Value::String(app.clone())),
                        (Cow::Borrowed("type"), Amf0Value::String(Cow::Borrowed("nonprivate"))),
                        (Cow::Borrowed("flashVer"), Amf0Value::String(flash_ver.clone())),
                        (Cow::Borrowed("tcUrl"), Amf0Value::String(tc_url.clone())),
                    ],
                )?;
                Ok(())
            }
            Self::CreateStream => {
                Amf0Encoder::encode_string(buf, "createStream")?;
                Amf0Encoder::encode_number(buf, transaction_id)?;
                Amf0Encoder::encode_null(buf)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amf0::Amf0Decoder;

    #[test]
    fn test_write_connect() {
        let command = NetConnectionCommand::Connect {
            app: "live".into(),
            tc_url: "rtmp://example.com/live".into(),
            flash_ver: "FMLE/3.0".into(),
        };

        let mut buf = Vec::new();
        command.write(&mut buf, 1.0).unwrap();

        let mut decoder = Amf0Decoder::new(&buf);
        assert_eq!(decoder.decode().unwrap(), Amf0Value::String("connect".into()));
        assert_eq!(decoder.decode().unwrap(), Amf0Value::Number(1.0));
        let object = decoder.decode().unwrap();
        assert_eq!(object.get("app"), Some(&Amf0Value::String("live".into())));
    }
}
