//! FLV tag framing for the media payloads carried inside RTMP audio/video messages:
//! AAC audio tags, and AVC/HEVC video tags (including the "extended video" HEVC header).

mod audio;
mod errors;
mod video;

pub use audio::{AacPacketType, AudioTag, AAC_CONTROL_BYTE};
pub use errors::FlvError;
pub use video::{AvcPacketType, HevcPacketType, VideoFrameType, VideoTag, VideoTagBody, HEVC_FOURCC};
