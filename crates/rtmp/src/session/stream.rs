use std::borrow::Cow;

use amf0::{Amf0Encoder, Amf0Value};
use bytes::Bytes;
use flv::{AacPacketType, AudioTag, AvcPacketType, HevcPacketType, VideoFrameType, VideoTag, VideoTagBody};

use super::define::{CodecFormat, QueuedPublish, ReadyState, StreamMetadata, VideoFormat};
use super::errors::SessionError;
use crate::chunk::{AUDIO_CHUNK_STREAM_ID, Chunk, ChunkEncoder, DATA_CHUNK_STREAM_ID, VIDEO_CHUNK_STREAM_ID};
use crate::command_messages::{Command, CommandType, NetConnectionCommand, NetStreamCommand};
use crate::config::PublishConfig;
use crate::events::{EventDispatcher, ListenerId, OwnerId, StatusEvent, StreamEvent};
use crate::messages::MessageTypeId;
use crate::timestamp::{MediaChannel, TimestampRebaser};

/// Drives a single outbound RTMP publish: `connect`, `createStream`, `publish`, muxing
/// encoded audio/video into FLV tags and shipping them as RTMP messages, then tearing the
/// session down on request.
///
/// ```text
/// Initialized --connect_success--> Open --publish(name) / queue flush--> Publish
///     --NetStream.Publish.Start--> Publishing --close() / error--> Initialized
/// ```
///
/// `PublishSession` is synchronous and owns no socket: callers feed it inbound status
/// messages and encoded frames, then drain [`Self::take_outbox`] for bytes to actually put
/// on the wire. [`super::spawn`] is the async task that does exactly that over a real
/// connection, as the single stream-queue this crate's concurrency model is built on.
pub struct PublishSession {
    config: PublishConfig,
    state: ReadyState,
    encoder: ChunkEncoder,
    rebaser: TimestampRebaser,
    dispatcher: EventDispatcher,
    outbox: Vec<u8>,
    stream_id: u32,
    stream_name: Option<String>,
    next_transaction_id: f64,
    queued_publish: Option<QueuedPublish>,
    sent_video_header: bool,
    sent_audio_header: bool,
    metadata_sent: bool,
    metadata: StreamMetadata,
    /// Handler names already sent at least once as an AMF0 data message this publish — the
    /// first send of a name gets a fresh Type-0 chunk header, later sends of the same name
    /// compress via the encoder's own per-csid Type-1/2 selection.
    data_channels_sent: std::collections::HashSet<String>,
}

impl PublishSession {
    pub fn new(config: PublishConfig) -> Self {
        let mut encoder = ChunkEncoder::default();
        encoder.set_chunk_size(config.chunk_size);

        Self {
            config,
            state: ReadyState::Initialized,
            encoder,
            rebaser: TimestampRebaser::default(),
            dispatcher: EventDispatcher::new(),
            outbox: Vec::new(),
            stream_id: 0,
            stream_name: None,
            next_transaction_id: 1.0,
            queued_publish: None,
            sent_video_header: false,
            sent_audio_header: false,
            metadata_sent: false,
            metadata: StreamMetadata::default(),
            data_channels_sent: std::collections::HashSet::new(),
        }
    }

    pub fn state(&self) -> ReadyState {
        self.state
    }

    /// Set the metadata this session will announce via `onMetaData` once publishing
    /// starts. Has no effect if the metadata has already been sent.
    pub fn set_metadata(&mut self, metadata: StreamMetadata) {
        self.metadata = metadata;
    }

    pub fn on_event(&mut self, event: StreamEvent, owner: OwnerId, callback: impl FnMut(&StatusEvent) + Send + 'static) -> ListenerId {
        self.dispatcher.on(event, owner, callback)
    }

    pub fn off_event(&mut self, event: StreamEvent, listener: ListenerId, owner: OwnerId) {
        self.dispatcher.off(event, listener, owner);
    }

    /// Bytes queued for the wire since the last call. The caller owns actually writing
    /// them to the socket.
    pub fn take_outbox(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outbox)
    }

    fn next_transaction_id(&mut self) -> f64 {
        let id = self.next_transaction_id;
        self.next_transaction_id += 1.0;
        id
    }

    fn write_command(&mut self, net_command: CommandType<'_>, msg_stream_id: u32) -> Result<(), SessionError> {
        let command = Command {
            transaction_id: self.next_transaction_id(),
            net_command,
        };
        command.write(&mut self.encoder, &mut self.outbox, msg_stream_id)?;
        Ok(())
    }

    /// Begins the session by sending `connect`. The stream stays `Initialized` until the
    /// peer replies with `NetConnection.Connect.Success` (see [`Self::on_status`]).
    pub fn connect(&mut self) -> Result<(), SessionError> {
        self.write_command(
            CommandType::NetConnection(NetConnectionCommand::Connect {
                app: Cow::Owned(self.config.app.clone()),
                tc_url: Cow::Owned(self.config.tc_url.clone()),
                flash_ver: self.config.flash_ver.clone(),
            }),
            0,
        )
    }

    /// Requests that `stream_name` be published once the session is ready. Queued if the
    /// connection hasn't opened (and a stream id been assigned) yet; flushed automatically
    /// by [`Self::on_status`] once it has.
    pub fn publish(&mut self, stream_name: impl Into<String>) -> Result<(), SessionError> {
        let queued = QueuedPublish {
            stream_name: stream_name.into(),
            publish_type: Cow::Borrowed("live"),
        };

        if self.state == ReadyState::Initialized || self.stream_id == 0 {
            self.queued_publish = Some(queued);
            Ok(())
        } else {
            self.send_publish(queued)
        }
    }

    fn send_publish(&mut self, queued: QueuedPublish) -> Result<(), SessionError> {
        self.stream_name = Some(queued.stream_name.clone());
        self.write_command(
            CommandType::NetStream(NetStreamCommand::Publish {
                stream_name: Cow::Owned(queued.stream_name),
                publish_type: queued.publish_type,
            }),
            self.stream_id,
        )?;
        self.state = ReadyState::Publish;
        Ok(())
    }

    /// Tears the session down: unpublishes, deletes the stream, and returns to
    /// `Initialized`. Safe to call from any state.
    pub fn close(&mut self) -> Result<(), SessionError> {
        if matches!(self.state, ReadyState::Publish | ReadyState::Publishing) {
            let stream_name = self.stream_name.clone().unwrap_or_default();
            let stream_id = self.stream_id;

            self.write_command(
                CommandType::NetStream(NetStreamCommand::FcUnpublish {
                    stream_name: Cow::Owned(stream_name),
                }),
                stream_id,
            )?;
            self.write_command(
                CommandType::NetStream(NetStreamCommand::DeleteStream { stream_id: stream_id as f64 }),
                stream_id,
            )?;
            self.write_command(CommandType::NetStream(NetStreamCommand::CloseStream), stream_id)?;
        }

        self.state = ReadyState::Initialized;
        self.queued_publish = None;
        self.stream_id = 0;
        self.stream_name = None;
        self.rebaser.reset();
        self.sent_video_header = false;
        self.sent_audio_header = false;
        self.metadata_sent = false;
        self.data_channels_sent.clear();

        Ok(())
    }

    /// Feeds a decoded `_result`/`onStatus` command into the state machine. `others` is the
    /// tail of positional arguments after `command_object` — for `createStream`'s `_result`
    /// this is where the server-assigned stream id lives.
    pub fn on_command(
        &mut self,
        command_name: &Amf0Value<'_>,
        command_object: &Amf0Value<'_>,
        others: &[Amf0Value<'_>],
    ) -> Result<(), SessionError> {
        let Some(name) = command_name.as_str() else {
            return Ok(());
        };

        match name {
            "_result" => {
                if let Some(code) = command_object.get("code").and_then(Amf0Value::as_str) {
                    if code == "NetConnection.Connect.Success" && self.state == ReadyState::Initialized {
                        self.state = ReadyState::Open;
                        self.emit_status(command_object, code);
                        self.write_command(CommandType::NetConnection(NetConnectionCommand::CreateStream), 0)?;
                        return Ok(());
                    }
                }

                if self.stream_id == 0 {
                    if let Some(id) = others.first().and_then(Amf0Value::as_number) {
                        self.stream_id = id as u32;
                        if let Some(queued) = self.queued_publish.take() {
                            self.send_publish(queued)?;
                        }
                    }
                }
            }
            "onStatus" => {
                if let Some(code) = command_object.get("code").and_then(Amf0Value::as_str) {
                    self.emit_status(command_object, code);

                    if code == "NetStream.Publish.Start" && self.state == ReadyState::Publish {
                        self.state = ReadyState::Publishing;
                        self.rebaser.reset();
                        self.send_metadata()?;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn emit_status(&mut self, command_object: &Amf0Value<'_>, code: &str) {
        let level = match command_object.get("level").and_then(Amf0Value::as_str) {
            Some("error") => crate::command_messages::CommandResultLevel::Error,
            Some("warning") => crate::command_messages::CommandResultLevel::Warning,
            _ => crate::command_messages::CommandResultLevel::Status,
        };

        let description = command_object
            .get("description")
            .and_then(Amf0Value::as_str)
            .map(str::to_string);

        self.dispatcher.dispatch(
            StreamEvent::RtmpStatus,
            &StatusEvent {
                level,
                code: code.to_string(),
                description,
            },
        );
    }

    fn send_metadata(&mut self) -> Result<(), SessionError> {
        if self.metadata_sent {
            return Ok(());
        }

        let mut entries: Vec<(Cow<'_, str>, Amf0Value<'_>)> = Vec::new();
        if let Some(v) = self.metadata.width {
            entries.push((Cow::Borrowed("width"), Amf0Value::Number(v)));
        }
        if let Some(v) = self.metadata.height {
            entries.push((Cow::Borrowed("height"), Amf0Value::Number(v)));
        }
        if let Some(v) = self.metadata.framerate {
            entries.push((Cow::Borrowed("framerate"), Amf0Value::Number(v)));
        }
        if let Some(v) = self.metadata.videocodecid {
            entries.push((Cow::Borrowed("videocodecid"), Amf0Value::Number(v)));
        }
        if let Some(v) = self.metadata.videodatarate {
            entries.push((Cow::Borrowed("videodatarate"), Amf0Value::Number(v)));
        }
        entries.push((Cow::Borrowed("audiocodecid"), Amf0Value::Number(10.0)));
        if let Some(v) = self.metadata.audiodatarate {
            entries.push((Cow::Borrowed("audiodatarate"), Amf0Value::Number(v)));
        }
        if let Some(v) = self.metadata.audiosamplerate {
            entries.push((Cow::Borrowed("audiosamplerate"), Amf0Value::Number(v)));
        }

        let mut payload = Vec::new();
        Amf0Encoder::encode_string(&mut payload, "@setDataFrame")?;
        Amf0Encoder::encode_string(&mut payload, "onMetaData")?;
        Amf0Encoder::encode_ecma_array(&mut payload, &entries)?;

        // First send of this handler name gets its own Type-0 header, independent of
        // whatever else may have gone out on the data chunk stream before it.
        if self.data_channels_sent.insert("onMetaData".to_string()) {
            self.encoder.reset_chunk_stream(DATA_CHUNK_STREAM_ID);
        }

        self.encoder.write_chunk(
            &mut self.outbox,
            Chunk::new(DATA_CHUNK_STREAM_ID, 0, MessageTypeId::DataAMF0, self.stream_id, Bytes::from(payload)),
        )?;

        self.metadata_sent = true;
        Ok(())
    }

    /// Accepts a raw AAC frame. `pts` is in seconds.
    pub fn on_encoded_audio(&mut self, data: Bytes, pts: f64) -> Result<(), SessionError> {
        if self.state != ReadyState::Publishing {
            return Ok(());
        }

        let Some(delta) = self.rebaser.accept(MediaChannel::Audio, pts) else {
            return Ok(());
        };

        let tag = AudioTag {
            packet_type: AacPacketType::Raw,
            data,
        };
        self.write_media_tag(AUDIO_CHUNK_STREAM_ID, MessageTypeId::Audio, delta, |buf| tag.mux(buf).map_err(SessionError::from))
    }

    /// Emits the AAC/AVC/HEVC sequence header (decoder configuration) immediately, without
    /// going through the timestamp rebaser — sequence headers carry no presentation time.
    /// A no-op if this codec's header has already been sent this publish.
    pub fn on_codec_format(&mut self, format: CodecFormat) -> Result<(), SessionError> {
        if self.state != ReadyState::Publishing {
            return Ok(());
        }

        match format {
            CodecFormat::Aac(config_record) => {
                if self.sent_audio_header {
                    return Ok(());
                }
                self.sent_audio_header = true;

                let tag = AudioTag {
                    packet_type: AacPacketType::SequenceHeader,
                    data: config_record,
                };
                self.write_media_tag(AUDIO_CHUNK_STREAM_ID, MessageTypeId::Audio, 0, |buf| {
                    tag.mux(buf).map_err(SessionError::from)
                })
            }
            CodecFormat::Avc(config_record) => {
                if self.sent_video_header {
                    return Ok(());
                }
                self.sent_video_header = true;

                let tag = VideoTag {
                    frame_type: VideoFrameType::Key,
                    body: VideoTagBody::Avc {
                        packet_type: AvcPacketType::SequenceHeader,
                        composition_time: 0,
                        data: config_record,
                    },
                };
                self.write_media_tag(VIDEO_CHUNK_STREAM_ID, MessageTypeId::Video, 0, |buf| {
                    tag.mux(buf).map_err(SessionError::from)
                })
            }
            CodecFormat::Hevc(config_record) => {
                if self.sent_video_header {
                    return Ok(());
                }
                self.sent_video_header = true;

                let tag = VideoTag {
                    frame_type: VideoFrameType::Key,
                    body: VideoTagBody::Hevc {
                        packet_type: HevcPacketType::SequenceStart,
                        composition_time: 0,
                        data: config_record,
                    },
                };
                self.write_media_tag(VIDEO_CHUNK_STREAM_ID, MessageTypeId::Video, 0, |buf| {
                    tag.mux(buf).map_err(SessionError::from)
                })
            }
        }
    }

    /// Accepts an encoded access unit. `dts`/`pts` are in seconds; they differ only when the
    /// encoder reorders frames (B-frames).
    pub fn on_encoded_video(&mut self, format: VideoFormat, frame_type: VideoFrameType, dts: f64, pts: f64, data: Bytes) -> Result<(), SessionError> {
        if self.state != ReadyState::Publishing {
            return Ok(());
        }

        let Some((delta, composition_time)) = self.rebaser.accept_video(dts, pts, self.config.composition_time_offset) else {
            return Ok(());
        };

        let tag = match format {
            VideoFormat::Avc => VideoTag {
                frame_type,
                body: VideoTagBody::Avc {
                    packet_type: AvcPacketType::Nalu,
                    composition_time,
                    data,
                },
            },
            VideoFormat::Hevc => VideoTag {
                frame_type,
                body: VideoTagBody::Hevc {
                    packet_type: HevcPacketType::CodedFrames,
                    composition_time,
                    data,
                },
            },
        };

        self.write_media_tag(VIDEO_CHUNK_STREAM_ID, MessageTypeId::Video, delta, |buf| tag.mux(buf).map_err(SessionError::from))
    }

    fn write_media_tag(
        &mut self,
        csid: u32,
        msg_type_id: MessageTypeId,
        timestamp: u32,
        mux: impl FnOnce(&mut Vec<u8>) -> Result<(), SessionError>,
    ) -> Result<(), SessionError> {
        let mut payload = Vec::new();
        mux(&mut payload)?;

        self.encoder.write_chunk(
            &mut self.outbox,
            Chunk::new(csid, timestamp, msg_type_id, self.stream_id, Bytes::from(payload)),
        )?;

        Ok(())
    }
}
