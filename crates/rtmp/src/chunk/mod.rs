//! The RTMP chunk stream: splitting messages into chunks on the way out,
//! and reassembling chunks into messages on the way in.

mod decoder;
mod define;
mod encoder;
mod errors;

pub use decoder::ChunkDecoder;
pub use define::{
    AUDIO_CHUNK_STREAM_ID, Chunk, ChunkBasicHeader, ChunkMessageHeader, ChunkType, CHUNK_SIZE, COMMAND_CHUNK_STREAM_ID,
    CONTROL_CHUNK_STREAM_ID, DATA_CHUNK_STREAM_ID, INIT_CHUNK_SIZE, MAX_CHUNK_SIZE, VIDEO_CHUNK_STREAM_ID,
};
pub use encoder::ChunkEncoder;
pub use errors::{ChunkReadError, ChunkWriteError};
