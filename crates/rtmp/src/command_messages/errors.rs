use std::fmt;

use amf0::Amf0Error;

use crate::chunk::ChunkWriteError;

#[derive(Debug)]
pub enum CommandError {
    Amf0(Amf0Error),
    ChunkWrite(ChunkWriteError),
    NoAppName,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amf0(err) => write!(f, "amf0 error: {err}"),
            Self::ChunkWrite(err) => write!(f, "chunk write error: {err}"),
            Self::NoAppName => write!(f, "no app name provided"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Amf0(err) => Some(err),
            Self::ChunkWrite(err) => Some(err),
            Self::NoAppName => None,
        }
    }
}

impl From<Amf0Error> for CommandError {
    fn from(value: Amf0Error) -> Self {
        Self::Amf0(value)
    }
}

impl From<ChunkWriteError> for CommandError {
    fn from(value: ChunkWriteError) -> Self {
        Self::ChunkWrite(value)
    }
}
