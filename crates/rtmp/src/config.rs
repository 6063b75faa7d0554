use std::borrow::Cow;

use crate::chunk::CHUNK_SIZE;

/// Static configuration for a [`crate::session::PublishSession`].
///
/// Everything here is known before `connect` is ever sent; none of it changes once the
/// session exists.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// The RTMP application name, e.g. `"live"` in `rtmp://host/live/stream_key`.
    pub app: String,
    /// The `tcUrl` advertised in the `connect` command.
    pub tc_url: String,
    /// The client identification string advertised in `connect`. Defaults to the same
    /// FMLE-style string publishers traditionally use so servers don't special-case us.
    pub flash_ver: Cow<'static, str>,
    /// Outbound chunk size to request via `SetChunkSize` once the connection is open.
    pub chunk_size: usize,
    /// Default composition-time offset applied to video frames whose presentation
    /// timestamp differs from their decode timestamp (seconds).
    pub composition_time_offset: f64,
}

impl PublishConfig {
    pub fn new(app: impl Into<String>, tc_url: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            tc_url: tc_url.into(),
            flash_ver: Cow::Borrowed("FMLE/3.0 (compatible; rtmp-publisher)"),
            chunk_size: CHUNK_SIZE,
            composition_time_offset: 3.0 / 30.0,
        }
    }
}
