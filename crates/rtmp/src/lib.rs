//! A pure Rust RTMP publisher: chunk-stream codec, message model, and a stream state
//! machine that packages encoded audio/video into FLV tags and drives a single outbound
//! `publish`.
//!
//! This crate only implements the client/publisher side of RTMP — connecting out,
//! announcing a stream, and pushing media. It does not implement the handshake, playback
//! (subscribing), or server-side session handling.

pub mod chunk;
pub mod command_messages;
pub mod config;
pub mod events;
pub mod messages;
pub mod protocol_control_messages;
pub mod session;
pub mod timestamp;
pub mod user_control_messages;

pub use config::PublishConfig;
pub use session::{CodecFormat, PublishHandle, PublishSession, ReadyState, VideoFormat, spawn};
