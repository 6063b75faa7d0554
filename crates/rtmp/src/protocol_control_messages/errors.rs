use std::fmt;

use crate::chunk::ChunkWriteError;

#[derive(Debug)]
pub enum ProtocolControlMessageError {
    ChunkWrite(ChunkWriteError),
    NotEnoughData,
}

impl fmt::Display for ProtocolControlMessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChunkWrite(err) => write!(f, "chunk write error: {err}"),
            Self::NotEnoughData => write!(f, "not enough data"),
        }
    }
}

impl std::error::Error for ProtocolControlMessageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ChunkWrite(err) => Some(err),
            Self::NotEnoughData => None,
        }
    }
}

impl From<ChunkWriteError> for ProtocolControlMessageError {
    fn from(value: ChunkWriteError) -> Self {
        Self::ChunkWrite(value)
    }
}
