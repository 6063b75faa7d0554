use bytes::Bytes;

use super::{Command, CommandError, CommandType};
use crate::chunk::{COMMAND_CHUNK_STREAM_ID, Chunk, ChunkEncoder, ChunkWriteError};
use crate::messages::MessageTypeId;

impl Command<'_> {
    fn write_amf0_chunk(
        encoder: &mut ChunkEncoder,
        writer: &mut impl std::io::Write,
        msg_stream_id: u32,
        payload: Bytes,
    ) -> Result<(), ChunkWriteError> {
        encoder.write_chunk(
            writer,
            Chunk::new(COMMAND_CHUNK_STREAM_ID, 0, MessageTypeId::CommandAMF0, msg_stream_id, payload),
        )
    }

    // The only AMF encoding we emit is AMF0, regardless of what the peer advertises in
    // objectEncoding.
    // - OBS does not support AMF3 (https://github.com/obsproject/obs-studio/blob/1be1f51635ac85b3ad768a88b3265b192bd0bf18/plugins/obs-outputs/librtmp/rtmp.c#L1737)
    // - Ffmpeg does not support AMF3 either (https://github.com/FFmpeg/FFmpeg/blob/c125860892e931d9b10f88ace73c91484815c3a8/libavformat/rtmpproto.c#L569)
    // - NginxRTMP does not support AMF3 (https://github.com/arut/nginx-rtmp-module/issues/313)
    // - SRS does not support AMF3 (https://github.com/ossrs/srs/blob/dcd02fe69cdbd7f401a7b8d139d95b522deb55b1/trunk/src/protocol/srs_protocol_rtmp_stack.cpp#L599)
    // However, the new enhanced-rtmp-v1 spec from YouTube does encourage the use of AMF3 over AMF0 (https://github.com/veovera/enhanced-rtmp)
    // We will eventually support this spec but for now we will stick to AMF0
    ///
    /// `msg_stream_id` is 0 for `NetConnection` calls (`connect`, `createStream`) and the
    /// server-assigned stream id for `NetStream` calls made after `createStream` resolves.
    pub fn write(self, encoder: &mut ChunkEncoder, writer: &mut impl std::io::Write, msg_stream_id: u32) -> Result<(), CommandError> {
        let mut buf = Vec::new();

        match self.net_command {
            CommandType::NetConnection(command) => {
                command.write(&mut buf, self.transaction_id)?;
            }
            CommandType::NetStream(command) => {
                command.write(&mut buf, self.transaction_id)?;
            }
        }

        Self::write_amf0_chunk(encoder, writer, msg_stream_id, Bytes::from(buf))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use amf0::{Amf0Decoder, Amf0Value};

    use super::*;
    use crate::command_messages::netconnection::NetConnectionCommand;

    #[test]
    fn test_write_command() {
        let command = Command {
            transaction_id: 1.0,
            net_command: CommandType::NetConnection(NetConnectionCommand::Connect {
                app: Cow::Borrowed("live"),
                tc_url: Cow::Borrowed("rtmp://example.com/live"),
                flash_ver: Cow::Borrowed("FMLE/3.0"),
            }),
        };

        let mut io = Vec::new();
        let mut encoder = ChunkEncoder::default();
        command.write(&mut encoder, &mut io, 0).unwrap();

        // skip the chunk headers (basic header + 11-byte message header for a Type0 chunk)
        let mut decoder = Amf0Decoder::new(&io[12..]);
        assert_eq!(decoder.decode().unwrap(), Amf0Value::String("connect".into()));
    }
}
