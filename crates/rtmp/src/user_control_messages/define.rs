#[derive(Debug, Clone, Copy, PartialEq, Eq, num_derive::FromPrimitive)]
#[repr(u16)]
pub enum EventType {
    StreamBegin = 0,
    StreamEof = 1,
    StreamDry = 2,
    SetBufferLength = 3,
    StreamIsRecorded = 4,
    PingRequest = 6,
    PingResponse = 7,
}

/// Sent by a peer once a stream id has begun delivering data. Only relevant here when
/// observed from the connection side; this publisher never originates it itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMessageStreamBegin {
    pub stream_id: u32,
}
