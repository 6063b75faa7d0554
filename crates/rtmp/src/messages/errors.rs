use std::fmt;

use amf0::Amf0Error;

use crate::protocol_control_messages::ProtocolControlMessageError;

#[derive(Debug)]
pub enum MessageError {
    Amf0(Amf0Error),
    ProtocolControlMessage(ProtocolControlMessageError),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amf0(err) => write!(f, "amf0 error: {err}"),
            Self::ProtocolControlMessage(err) => write!(f, "protocol control message error: {err}"),
        }
    }
}

impl std::error::Error for MessageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Amf0(err) => Some(err),
            Self::ProtocolControlMessage(err) => Some(err),
        }
    }
}

impl From<Amf0Error> for MessageError {
    fn from(value: Amf0Error) -> Self {
        Self::Amf0(value)
    }
}

impl From<ProtocolControlMessageError> for MessageError {
    fn from(value: ProtocolControlMessageError) -> Self {
        Self::ProtocolControlMessage(value)
    }
}
