//! Rebases wall-clock media timestamps (seconds, floating point) onto the RTMP stream's
//! own zero point, and turns them into the integer millisecond deltas the chunk message
//! header actually carries.

/// Which per-channel timestamp state a frame advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaChannel {
    Audio,
    Video,
}

#[derive(Debug, Clone, Copy)]
struct ChannelState {
    started: bool,
    prev_rebased: f64,
    /// Fractional millisecond carried over from the last emitted delta, so integer
    /// truncation doesn't accumulate drift over a long-running stream.
    acc: f64,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            started: false,
            prev_rebased: 0.0,
            acc: 0.0,
        }
    }
}

/// Tracks the publish session's base timestamp and per-channel emission state.
///
/// A fresh `TimestampRebaser` is created every time the stream re-enters `Publishing`;
/// [`Self::reset`] restores that state without allocating a new one.
#[derive(Debug, Default)]
pub struct TimestampRebaser {
    base: Option<f64>,
    audio: ChannelState,
    video: ChannelState,
}

impl TimestampRebaser {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn channel_mut(&mut self, channel: MediaChannel) -> &mut ChannelState {
        match channel {
            MediaChannel::Audio => &mut self.audio,
            MediaChannel::Video => &mut self.video,
        }
    }

    fn rebase_seconds(&mut self, pts: f64) -> f64 {
        let base = *self.base.get_or_insert(pts);
        pts - base
    }

    /// Accepts a frame's presentation timestamp for `channel`, returning the integer
    /// millisecond delta to write into the next chunk's timestamp field, or `None` if the
    /// frame predates the stream's base (or its own channel) and should be dropped.
    pub fn accept(&mut self, channel: MediaChannel, pts: f64) -> Option<u32> {
        let rebased = self.rebase_seconds(pts);
        if rebased < 0.0 {
            return None;
        }

        let state = self.channel_mut(channel);

        if !state.started {
            state.started = true;
            state.prev_rebased = rebased;
            state.acc = 0.0;
            return Some(0);
        }

        let delta_ms = (rebased - state.prev_rebased) * 1000.0;
        if delta_ms < 0.0 {
            return None;
        }

        state.prev_rebased = rebased;
        state.acc += delta_ms;
        let send = state.acc.floor();
        state.acc -= send;

        Some(send as u32)
    }

    /// Accepts a video access unit with independent decode and presentation timestamps,
    /// returning the RTMP timestamp delta (from `dts`, as for [`Self::accept`]) alongside
    /// the signed composition time offset to encode in the tag.
    pub fn accept_video(&mut self, dts: f64, pts: f64, composition_offset: f64) -> Option<(u32, i32)> {
        let base_before = self.base;
        let delta = self.accept(MediaChannel::Video, dts)?;

        let base = base_before.unwrap_or_else(|| self.base.expect("base set by accept()"));
        let dts_rebased = dts - base;
        let pts_rebased = pts - base;
        let composition_ms = ((pts_rebased - dts_rebased + composition_offset) * 1000.0).round() as i32;

        Some((delta, composition_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut rebaser = TimestampRebaser::default();
        assert_eq!(rebaser.accept(MediaChannel::Video, 10.0), Some(0));
    }

    #[test]
    fn test_monotonic_deltas_track_elapsed_time() {
        let mut rebaser = TimestampRebaser::default();
        assert_eq!(rebaser.accept(MediaChannel::Video, 0.0), Some(0));
        assert_eq!(rebaser.accept(MediaChannel::Video, 0.0333), Some(33));
        assert_eq!(rebaser.accept(MediaChannel::Video, 0.0666), Some(33));
        assert_eq!(rebaser.accept(MediaChannel::Video, 0.1), Some(34));
    }

    #[test]
    fn test_frame_before_base_is_dropped() {
        let mut rebaser = TimestampRebaser::default();
        assert_eq!(rebaser.accept(MediaChannel::Video, 5.0), Some(0));
        assert_eq!(rebaser.accept(MediaChannel::Video, 4.0), None);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut rebaser = TimestampRebaser::default();
        assert_eq!(rebaser.accept(MediaChannel::Video, 1.0), Some(0));
        assert_eq!(rebaser.accept(MediaChannel::Audio, 1.0), Some(0));
        assert_eq!(rebaser.accept(MediaChannel::Audio, 1.023), Some(23));
        assert_eq!(rebaser.accept(MediaChannel::Video, 1.033), Some(33));
    }

    #[test]
    fn test_composition_time_offset() {
        let mut rebaser = TimestampRebaser::default();
        // dts == pts: no B-frame reordering, offset is just the configured default
        let (delta, cts) = rebaser.accept_video(0.0, 0.0, 3.0 / 30.0).unwrap();
        assert_eq!(delta, 0);
        assert_eq!(cts, 100);
    }
}
