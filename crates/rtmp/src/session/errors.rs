use std::fmt;

use amf0::Amf0Error;
use flv::FlvError;

use crate::chunk::ChunkWriteError;
use crate::command_messages::CommandError;

#[derive(Debug)]
pub enum SessionError {
    ChunkWrite(ChunkWriteError),
    Command(CommandError),
    Amf0(Amf0Error),
    Flv(FlvError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChunkWrite(err) => write!(f, "chunk write error: {err}"),
            Self::Command(err) => write!(f, "command error: {err}"),
            Self::Amf0(err) => write!(f, "amf0 error: {err}"),
            Self::Flv(err) => write!(f, "flv mux error: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ChunkWrite(err) => Some(err),
            Self::Command(err) => Some(err),
            Self::Amf0(err) => Some(err),
            Self::Flv(err) => Some(err),
        }
    }
}

impl From<ChunkWriteError> for SessionError {
    fn from(value: ChunkWriteError) -> Self {
        Self::ChunkWrite(value)
    }
}

impl From<CommandError> for SessionError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}

impl From<Amf0Error> for SessionError {
    fn from(value: Amf0Error) -> Self {
        Self::Amf0(value)
    }
}

impl From<FlvError> for SessionError {
    fn from(value: FlvError) -> Self {
        Self::Flv(value)
    }
}
