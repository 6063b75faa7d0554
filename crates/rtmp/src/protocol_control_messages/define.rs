/// 5.4.1 Set Chunk Size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolControlMessageSetChunkSize {
    pub chunk_size: u32,
}

/// 5.4.3 Window Acknowledgement Size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolControlMessageWindowAcknowledgementSize {
    pub acknowledgement_window_size: u32,
}

/// 5.4.4 Set Peer Bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolControlMessageSetPeerBandwidth {
    pub acknowledgement_window_size: u32,
    pub limit_type: ProtocolControlMessageSetPeerBandwidthLimitType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, num_derive::FromPrimitive)]
#[repr(u8)]
pub enum ProtocolControlMessageSetPeerBandwidthLimitType {
    Hard = 0,
    Soft = 1,
    Dynamic = 2,
}
