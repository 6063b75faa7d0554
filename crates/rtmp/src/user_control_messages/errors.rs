use std::fmt;

use crate::chunk::ChunkWriteError;

#[derive(Debug)]
pub enum EventMessagesError {
    ChunkWrite(ChunkWriteError),
}

impl fmt::Display for EventMessagesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChunkWrite(err) => write!(f, "chunk write error: {err}"),
        }
    }
}

impl std::error::Error for EventMessagesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ChunkWrite(err) => Some(err),
        }
    }
}

impl From<ChunkWriteError> for EventMessagesError {
    fn from(value: ChunkWriteError) -> Self {
        Self::ChunkWrite(value)
    }
}
