use std::borrow::Cow;

use bytes::Bytes;

/// Where the publish session is in its lifecycle.
///
/// See the module doc on [`super::stream::PublishSession`] for the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Initialized,
    Open,
    Publish,
    Publishing,
}

/// The codec family of an encoded video access unit passed to
/// [`super::stream::PublishSession::on_encoded_video`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFormat {
    Avc,
    Hevc,
}

/// A decoder configuration record to announce via
/// [`super::stream::PublishSession::on_codec_format`], sent once per codec per publish.
#[derive(Debug, Clone)]
pub enum CodecFormat {
    Aac(Bytes),
    Avc(Bytes),
    Hevc(Bytes),
}

/// A `publish(name)` call queued up while the session hasn't reached [`ReadyState::Open`]
/// yet. Re-stamped with a fresh transaction id and flushed once `connect` succeeds.
#[derive(Debug, Clone)]
pub struct QueuedPublish {
    pub stream_name: String,
    pub publish_type: Cow<'static, str>,
}

/// The `onMetaData` payload sent once, right after `NetStream.Publish.Start`.
#[derive(Debug, Clone, Default)]
pub struct StreamMetadata {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub framerate: Option<f64>,
    /// `7` for AVC; the HEVC FourCC read as a big-endian u32 for HEVC.
    pub videocodecid: Option<f64>,
    pub videodatarate: Option<f64>,
    pub audiodatarate: Option<f64>,
    pub audiosamplerate: Option<f64>,
}
