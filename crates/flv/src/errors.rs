use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlvError {
    #[error("not enough data: need at least {needed} bytes, have {have}")]
    NotEnoughData { needed: usize, have: usize },
    #[error("unknown video frame type: {0}")]
    UnknownFrameType(u8),
    #[error("unknown avc packet type: {0}")]
    UnknownAvcPacketType(u8),
    #[error("unknown hevc packet type: {0}")]
    UnknownHevcPacketType(u8),
    #[error("unsupported extended video fourcc: {0:?}")]
    UnsupportedFourCc([u8; 4]),
    #[error("unsupported audio format byte: {0:#x}")]
    UnsupportedAudioFormat(u8),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
