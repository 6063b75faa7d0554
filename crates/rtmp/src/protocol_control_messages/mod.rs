//! Protocol control messages: chunk size negotiation and bandwidth signalling.

mod define;
mod errors;
mod reader;
mod writer;

pub use define::{
    ProtocolControlMessageSetChunkSize, ProtocolControlMessageSetPeerBandwidth,
    ProtocolControlMessageSetPeerBandwidthLimitType, ProtocolControlMessageWindowAcknowledgementSize,
};
pub use errors::ProtocolControlMessageError;
