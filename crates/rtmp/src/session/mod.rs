//! The publish session: a single serial "stream queue" task that owns all mutable
//! publish state and funnels every state change, frame, and socket write through itself.
//!
//! This is "one task per outbound publish" rather than "one task per accepted
//! connection", with socket writes delegated to [`tokio::task::spawn_blocking`] so the
//! stream task itself never stalls on I/O.

mod define;
mod errors;
mod stream;

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use amf0::Amf0Value;
use bytes::Bytes;
use flv::VideoFrameType;
use tokio::sync::mpsc;

pub use define::{CodecFormat, QueuedPublish, ReadyState, StreamMetadata, VideoFormat};
pub use errors::SessionError;
pub use stream::PublishSession;

use crate::config::PublishConfig;
use crate::events::{ListenerId, OwnerId, StatusEvent, StreamEvent};

enum Command {
    Connect,
    Publish(String),
    Close,
    SetMetadata(StreamMetadata),
    EncodedAudio {
        data: Bytes,
        pts: f64,
    },
    EncodedVideo {
        format: VideoFormat,
        frame_type: VideoFrameType,
        dts: f64,
        pts: f64,
        data: Bytes,
    },
    CodecFormat(CodecFormat),
    IncomingCommand {
        command_name: Amf0Value<'static>,
        command_object: Amf0Value<'static>,
        others: Vec<Amf0Value<'static>>,
    },
    On {
        event: StreamEvent,
        owner: OwnerId,
        callback: Box<dyn FnMut(&StatusEvent) + Send>,
    },
    Off {
        event: StreamEvent,
        listener: ListenerId,
        owner: OwnerId,
    },
}

/// A cheap, cloneable handle to a running publish session. Every method enqueues work onto
/// the stream queue and returns immediately; none of them block on I/O.
#[derive(Clone)]
pub struct PublishHandle {
    commands: mpsc::UnboundedSender<Command>,
    bytes_written: Arc<AtomicI64>,
}

impl PublishHandle {
    pub fn connect(&self) {
        let _ = self.commands.send(Command::Connect);
    }

    pub fn publish(&self, stream_name: impl Into<String>) {
        let _ = self.commands.send(Command::Publish(stream_name.into()));
    }

    pub fn close(&self) {
        let _ = self.commands.send(Command::Close);
    }

    pub fn set_metadata(&self, metadata: StreamMetadata) {
        let _ = self.commands.send(Command::SetMetadata(metadata));
    }

    pub fn on_encoded_audio(&self, data: Bytes, pts: f64) {
        let _ = self.commands.send(Command::EncodedAudio { data, pts });
    }

    pub fn on_encoded_video(&self, format: VideoFormat, frame_type: VideoFrameType, dts: f64, pts: f64, data: Bytes) {
        let _ = self.commands.send(Command::EncodedVideo {
            format,
            frame_type,
            dts,
            pts,
            data,
        });
    }

    pub fn on_codec_format(&self, format: CodecFormat) {
        let _ = self.commands.send(Command::CodecFormat(format));
    }

    /// Feeds a decoded inbound command (from the caller's own chunk-read loop) into the
    /// state machine.
    pub fn on_command(&self, command_name: Amf0Value<'static>, command_object: Amf0Value<'static>, others: Vec<Amf0Value<'static>>) {
        let _ = self.commands.send(Command::IncomingCommand {
            command_name,
            command_object,
            others,
        });
    }

    pub fn on_event(&self, event: StreamEvent, owner: OwnerId, callback: impl FnMut(&StatusEvent) + Send + 'static) {
        let _ = self.commands.send(Command::On {
            event,
            owner,
            callback: Box::new(callback),
        });
    }

    pub fn off_event(&self, event: StreamEvent, listener: ListenerId, owner: OwnerId) {
        let _ = self.commands.send(Command::Off { event, listener, owner });
    }

    /// Cumulative bytes successfully written to the socket. Safe to read from any thread.
    pub fn byte_count(&self) -> i64 {
        self.bytes_written.load(Ordering::Relaxed)
    }
}

/// Spawns the stream queue task for `writer` and returns a handle to it.
///
/// `writer` is typically a `std::io::Write` wrapping a TCP stream's blocking half; every
/// write happens inside `spawn_blocking` so the async stream queue task never stalls.
pub fn spawn<W>(config: PublishConfig, mut writer: W) -> PublishHandle
where
    W: Write + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Command>();
    let bytes_written = Arc::new(AtomicI64::new(0));
    let handle = PublishHandle {
        commands: tx,
        bytes_written: bytes_written.clone(),
    };

    tokio::spawn(async move {
        let mut session = PublishSession::new(config);

        while let Some(command) = rx.recv().await {
            let result = match command {
                Command::Connect => session.connect(),
                Command::Publish(name) => session.publish(name),
                Command::Close => session.close(),
                Command::SetMetadata(metadata) => {
                    session.set_metadata(metadata);
                    Ok(())
                }
                Command::EncodedAudio { data, pts } => session.on_encoded_audio(data, pts),
                Command::EncodedVideo {
                    format,
                    frame_type,
                    dts,
                    pts,
                    data,
                } => session.on_encoded_video(format, frame_type, dts, pts, data),
                Command::CodecFormat(format) => session.on_codec_format(format),
                Command::IncomingCommand {
                    command_name,
                    command_object,
                    others,
                } => session.on_command(&command_name, &command_object, &others),
                Command::On { event, owner, callback } => {
                    session.on_event(event, owner, callback);
                    Ok(())
                }
                Command::Off { event, listener, owner } => {
                    session.off_event(event, listener, owner);
                    Ok(())
                }
            };

            if let Err(err) = result {
                tracing::error!(%err, "publish session error");
                continue;
            }

            let outbox = session.take_outbox();
            if outbox.is_empty() {
                continue;
            }

            let bytes_written = bytes_written.clone();
            let write_result = tokio::task::spawn_blocking(move || -> std::io::Result<(W, usize)> {
                writer.write_all(&outbox)?;
                Ok((writer, outbox.len()))
            })
            .await;

            match write_result {
                Ok(Ok((w, n))) => {
                    writer = w;
                    bytes_written.fetch_add(n as i64, Ordering::Relaxed);
                }
                Ok(Err(err)) => {
                    tracing::error!(%err, "publish session socket write failed");
                    break;
                }
                Err(err) => {
                    tracing::error!(%err, "publish session writer task panicked");
                    break;
                }
            }
        }
    });

    handle
}
