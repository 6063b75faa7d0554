use std::collections::HashMap;
use std::io;

use byteorder::{BigEndian, WriteBytesExt};

use super::define::{Chunk, ChunkMessageHeader, ChunkType, INIT_CHUNK_SIZE};
use super::errors::ChunkWriteError;

/// Encodes [`Chunk`]s onto a byte sink, fragmenting payloads larger than the
/// configured chunk size into continuation chunks.
///
/// Tracks the last header written per chunk-stream-id so that messages after the
/// first on a given csid compress down to a Type-1 (or Type-2, when length and
/// type id also repeat) header instead of always paying for a full Type-0 one.
pub struct ChunkEncoder {
    chunk_size: usize,
    contexts: HashMap<u32, ChunkMessageHeader>,
}

impl Default for ChunkEncoder {
    fn default() -> Self {
        Self {
            chunk_size: INIT_CHUNK_SIZE,
            contexts: HashMap::new(),
        }
    }
}

impl ChunkEncoder {
    /// Set the outbound chunk size. Takes effect on the next call to [`Self::write_chunk`].
    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_size = chunk_size;
    }

    /// Forget the cached previous header for `csid`, forcing the next [`Self::write_chunk`]
    /// call on this chunk stream to use a full Type-0 header. Used to give a logical
    /// sub-channel sharing a csid (e.g. a named data-message handler) its own "first send"
    /// regardless of whatever else has been written to that csid.
    pub fn reset_chunk_stream(&mut self, csid: u32) {
        self.contexts.remove(&csid);
    }

    #[inline]
    fn write_basic_header(io: &mut impl io::Write, fmt: ChunkType, csid: u32) -> Result<(), ChunkWriteError> {
        let fmt = fmt as u8;

        if csid >= 64 + 255 {
            io.write_u8((fmt << 6) | 1)?;
            let csid = csid - 64;
            io.write_u8((csid % 256) as u8)?;
            io.write_u8((csid / 256) as u8)?;
        } else if csid >= 64 {
            io.write_u8(fmt << 6)?;
            io.write_u8((csid - 64) as u8)?;
        } else {
            io.write_u8((fmt << 6) | csid as u8)?;
        }

        Ok(())
    }

    /// Picks the cheapest chunk-header type for `header` given the last header sent on this
    /// csid: Type 0 if the csid is new or the message stream id changed (Type 1/2/3 can't
    /// carry a stream id); Type 2 if length and type id also repeat (only the timestamp
    /// moved); Type 1 otherwise.
    fn select_chunk_type(prev: Option<&ChunkMessageHeader>, header: &ChunkMessageHeader) -> ChunkType {
        match prev {
            None => ChunkType::Type0,
            Some(prev) if prev.msg_stream_id != header.msg_stream_id => ChunkType::Type0,
            Some(prev) if prev.msg_length == header.msg_length && prev.msg_type_id == header.msg_type_id => ChunkType::Type2,
            Some(_) => ChunkType::Type1,
        }
    }

    /// Writes the message header for `chunk_type` and returns whether the timestamp/delta
    /// field required the extended 4-byte form.
    #[inline]
    fn write_message_header(
        io: &mut impl io::Write,
        chunk_type: ChunkType,
        field_value: u32,
        header: &ChunkMessageHeader,
    ) -> Result<bool, ChunkWriteError> {
        io.write_u24::<BigEndian>(field_value.min(0xFFFFFF))?;

        match chunk_type {
            ChunkType::Type0 => {
                io.write_u24::<BigEndian>(header.msg_length)?;
                io.write_u8(header.msg_type_id as u8)?;
                io.write_u32::<byteorder::LittleEndian>(header.msg_stream_id)?;
            }
            ChunkType::Type1 => {
                io.write_u24::<BigEndian>(header.msg_length)?;
                io.write_u8(header.msg_type_id as u8)?;
            }
            ChunkType::Type2 => {}
            ChunkType::Type3 => unreachable!("Type3 is only used for continuation chunks"),
        }

        let extended = field_value >= 0xFFFFFF;
        if extended {
            Self::write_extended_timestamp(io, field_value)?;
        }

        Ok(extended)
    }

    #[inline]
    fn write_extended_timestamp(io: &mut impl io::Write, timestamp: u32) -> Result<(), ChunkWriteError> {
        io.write_u32::<BigEndian>(timestamp)?;
        Ok(())
    }

    /// Write a chunk, selecting the cheapest header type for this csid and splitting the
    /// payload into a leading chunk plus Type-3 continuation chunks as needed.
    pub fn write_chunk(&mut self, io: &mut impl io::Write, mut chunk_info: Chunk) -> Result<(), ChunkWriteError> {
        let csid = chunk_info.basic_header.chunk_stream_id;
        let header = chunk_info.message_header.clone();
        let prev = self.contexts.get(&csid);

        let chunk_type = Self::select_chunk_type(prev, &header);
        let field_value = match chunk_type {
            ChunkType::Type0 => header.timestamp,
            _ => header.timestamp.wrapping_sub(prev.expect("non-Type0 selection implies a previous header").timestamp),
        };

        Self::write_basic_header(io, chunk_type, csid)?;
        let extended = Self::write_message_header(io, chunk_type, field_value, &header)?;

        while !chunk_info.payload.is_empty() {
            let take = chunk_info.payload.len().min(self.chunk_size);
            let piece = chunk_info.payload.split_to(take);
            io.write_all(&piece[..])?;

            if !chunk_info.payload.is_empty() {
                Self::write_basic_header(io, ChunkType::Type3, csid)?;

                if extended {
                    Self::write_extended_timestamp(io, field_value)?;
                }
            }
        }

        self.contexts.insert(csid, header);

        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use std::io;

    use bytes::Bytes;

    use super::*;
    use crate::messages::MessageTypeId;

    #[test]
    fn test_encoder_error_display() {
        let error = ChunkWriteError::UnknownReadState;
        assert_eq!(format!("{error}"), "unknown read state");

        let error = ChunkWriteError::Io(io::Error::from(io::ErrorKind::Other));
        assert_eq!(format!("{error}"), "io error: other error");
    }

    #[test]
    fn test_encoder_write_small_chunk() {
        let mut encoder = ChunkEncoder::default();
        let mut buf = Vec::new();

        let chunk = Chunk::new(
            0,
            0,
            MessageTypeId::Abort,
            0,
            Bytes::from(vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]),
        );

        encoder.write_chunk(&mut buf, chunk).unwrap();

        #[rustfmt::skip]
        assert_eq!(
            buf,
            vec![
                0x00 << 6, // fmt: 0, csid: 0
                0x00, 0x00, 0x00, // timestamp
                0x00, 0x00, 0x08, // message length
                0x02, // message type id (abort)
                0x00, 0x00, 0x00, 0x00, // message stream id
                0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            ]
        );
    }

    #[test]
    fn test_encoder_write_large_chunk() {
        let mut encoder = ChunkEncoder::default();
        let mut buf = Vec::new();

        let payload: Vec<u8> = (0..129u16).map(|i| i as u8).collect();
        let chunk = Chunk::new(10, 100, MessageTypeId::Audio, 13, Bytes::from(payload));

        encoder.write_chunk(&mut buf, chunk).unwrap();

        let mut expected = vec![
            0x0A, // fmt: 0, csid: 10
            0x00, 0x00, 0x64, // timestamp (100)
            0x00, 0x00, 0x81, // message length (129)
            0x08, // audio
            0x0D, 0x00, 0x00, 0x00, // stream id (13)
        ];
        expected.extend(0..128u8);
        expected.push((0x03 << 6) | 0x0A); // continuation, csid 10
        expected.push(128);

        assert_eq!(buf, expected);
    }

    #[test]
    fn test_encoder_extended_timestamp() {
        let mut encoder = ChunkEncoder::default();
        let mut buf = Vec::new();

        let chunk = Chunk::new(
            0,
            0xFFFFFFFF,
            MessageTypeId::Abort,
            0,
            Bytes::from(vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]),
        );

        encoder.write_chunk(&mut buf, chunk).unwrap();

        #[rustfmt::skip]
        assert_eq!(
            buf,
            vec![
                0x00 << 6,
                0xFF, 0xFF, 0xFF, // timestamp marker
                0x00, 0x00, 0x08,
                0x02,
                0x00, 0x00, 0x00, 0x00,
                0xFF, 0xFF, 0xFF, 0xFF, // extended timestamp
                0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            ]
        );
    }

    #[test]
    fn test_encoder_extended_csid() {
        let mut encoder = ChunkEncoder::default();
        let mut buf = Vec::new();

        let chunk = Chunk::new(
            64,
            0,
            MessageTypeId::Abort,
            0,
            Bytes::from(vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]),
        );

        encoder.write_chunk(&mut buf, chunk).unwrap();

        #[rustfmt::skip]
        assert_eq!(
            buf,
            vec![
                0x00 << 6,
                0x00, // extended csid (64 + 0)
                0x00, 0x00, 0x00,
                0x00, 0x00, 0x08,
                0x02,
                0x00, 0x00, 0x00, 0x00,
                0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            ]
        );
    }

    #[test]
    fn test_encoder_extended_csid_ext() {
        let mut encoder = ChunkEncoder::default();
        let mut buf = Vec::new();

        let chunk = Chunk::new(
            320,
            0,
            MessageTypeId::Abort,
            0,
            Bytes::from(vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]),
        );

        encoder.write_chunk(&mut buf, chunk).unwrap();

        #[rustfmt::skip]
        assert_eq!(
            buf,
            vec![
                0x01, // fmt 0, csid extension marker 1
                0x00, // 320 - 64 = 256 -> rem 0
                0x01, // div 1
                0x00, 0x00, 0x00,
                0x00, 0x00, 0x08,
                0x02,
                0x00, 0x00, 0x00, 0x00,
                0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            ]
        );
    }

    #[test]
    fn test_encoder_second_message_same_stream_uses_type1() {
        let mut encoder = ChunkEncoder::default();
        let mut buf = Vec::new();

        let first = Chunk::new(6, 0, MessageTypeId::Video, 1, Bytes::from_static(b"aaaa"));
        encoder.write_chunk(&mut buf, first).unwrap();

        let second = Chunk::new(6, 33, MessageTypeId::Video, 1, Bytes::from_static(b"bb"));
        let mark = buf.len();
        encoder.write_chunk(&mut buf, second).unwrap();

        let second_bytes = &buf[mark..];
        // fmt 1 (Type1), csid 6: timestamp_delta[3] + length[3] + type_id[1], no stream id.
        assert_eq!(second_bytes[0], (0x01 << 6) | 0x06);
        assert_eq!(&second_bytes[1..4], &[0x00, 0x00, 0x21]); // delta 33
        assert_eq!(&second_bytes[4..7], &[0x00, 0x00, 0x02]); // length 2
        assert_eq!(second_bytes[7], MessageTypeId::Video as u8);
        assert_eq!(&second_bytes[8..10], b"bb");
    }

    #[test]
    fn test_encoder_repeated_length_and_type_uses_type2() {
        let mut encoder = ChunkEncoder::default();
        let mut buf = Vec::new();

        let first = Chunk::new(6, 0, MessageTypeId::Video, 1, Bytes::from_static(b"aaaa"));
        encoder.write_chunk(&mut buf, first).unwrap();

        let second = Chunk::new(6, 33, MessageTypeId::Video, 1, Bytes::from_static(b"bbbb"));
        let mark = buf.len();
        encoder.write_chunk(&mut buf, second).unwrap();

        let second_bytes = &buf[mark..];
        // fmt 2 (Type2), csid 6: timestamp_delta[3] only.
        assert_eq!(second_bytes[0], (0x02 << 6) | 0x06);
        assert_eq!(&second_bytes[1..4], &[0x00, 0x00, 0x21]);
        assert_eq!(&second_bytes[4..], b"bbbb");
    }

    #[test]
    fn test_encoder_different_stream_id_forces_type0() {
        let mut encoder = ChunkEncoder::default();
        let mut buf = Vec::new();

        let first = Chunk::new(3, 0, MessageTypeId::CommandAMF0, 0, Bytes::from_static(b"a"));
        encoder.write_chunk(&mut buf, first).unwrap();

        let second = Chunk::new(3, 0, MessageTypeId::CommandAMF0, 5, Bytes::from_static(b"b"));
        let mark = buf.len();
        encoder.write_chunk(&mut buf, second).unwrap();

        assert_eq!(buf[mark], 0x00 << 6 | 0x03); // fmt 0 (Type0), csid 3
    }

    #[test]
    fn test_reset_chunk_stream_forces_type0_again() {
        let mut encoder = ChunkEncoder::default();
        let mut buf = Vec::new();

        let first = Chunk::new(8, 0, MessageTypeId::DataAMF0, 1, Bytes::from_static(b"a"));
        encoder.write_chunk(&mut buf, first).unwrap();

        encoder.reset_chunk_stream(8);

        let second = Chunk::new(8, 0, MessageTypeId::DataAMF0, 1, Bytes::from_static(b"b"));
        let mark = buf.len();
        encoder.write_chunk(&mut buf, second).unwrap();

        assert_eq!(buf[mark], 0x00 << 6 | 0x08); // fmt 0 (Type0), csid 8
    }
}
