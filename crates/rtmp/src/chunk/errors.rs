use std::fmt;
use std::io;

/// Errors produced while writing chunks to a sink.
#[derive(Debug)]
pub enum ChunkWriteError {
    Io(io::Error),
    UnknownReadState,
}

impl fmt::Display for ChunkWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::UnknownReadState => write!(f, "unknown read state"),
        }
    }
}

impl std::error::Error for ChunkWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::UnknownReadState => None,
        }
    }
}

impl From<io::Error> for ChunkWriteError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Errors produced while decoding chunks from an inbound byte buffer.
#[derive(Debug)]
pub enum ChunkReadError {
    Io(io::Error),
    UnknownReadState,
    MissingPreviousChunkHeader { chunk_stream_id: u32 },
    ChunkSizeTooLarge { size: usize },
    UnknownMessageType { type_id: u8 },
}

impl fmt::Display for ChunkReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::UnknownReadState => write!(f, "unknown read state"),
            Self::MissingPreviousChunkHeader { chunk_stream_id } => {
                write!(f, "missing previous chunk header for chunk stream id {chunk_stream_id}")
            }
            Self::ChunkSizeTooLarge { size } => write!(f, "chunk size too large: {size}"),
            Self::UnknownMessageType { type_id } => write!(f, "unknown message type: {type_id}"),
        }
    }
}

impl std::error::Error for ChunkReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ChunkReadError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
