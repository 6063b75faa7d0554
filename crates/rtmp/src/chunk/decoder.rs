use std::collections::HashMap;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use bytes::{Buf, Bytes, BytesMut};
use num_traits::FromPrimitive;

use super::define::{Chunk, ChunkBasicHeader, ChunkMessageHeader, ChunkType, INIT_CHUNK_SIZE};
use super::errors::ChunkReadError;
use crate::messages::MessageTypeId;

/// Per chunk-stream-id decode state: the last complete message header seen (for
/// Type-1/2/3 header inheritance) and the partially-received payload buffer.
#[derive(Default)]
struct ChunkStreamContext {
    prev_header: Option<ChunkMessageHeader>,
    payload: BytesMut,
}

/// Decodes an inbound byte stream into whole [`Chunk`]s, reassembling payloads
/// that were split across multiple wire chunks.
///
/// `read_chunk` is fed an ever-growing buffer (bytes read off the socket,
/// appended by the caller) and returns `Ok(None)` without consuming anything
/// when there isn't yet a full wire chunk buffered.
pub struct ChunkDecoder {
    chunk_size: usize,
    contexts: HashMap<u32, ChunkStreamContext>,
}

impl Default for ChunkDecoder {
    fn default() -> Self {
        Self {
            chunk_size: INIT_CHUNK_SIZE,
            contexts: HashMap::new(),
        }
    }
}

impl ChunkDecoder {
    /// Update the chunk size used to compute fragment boundaries. Set this when a peer
    /// `SetChunkSize` message is observed.
    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_size = chunk_size;
    }

    /// Try to decode one whole message's worth of chunks from `buf`.
    ///
    /// Returns `Ok(None)` if not enough bytes are buffered yet; the caller should append more
    /// bytes and call again. May internally consume several wire chunks spanning a single
    /// fragmented message, or several small messages in one call depending on what's buffered.
    pub fn read_chunk(&mut self, buf: &mut BytesMut) -> Result<Option<Chunk>, ChunkReadError> {
        loop {
            match self.read_one_wire_chunk(buf)? {
                Some(chunk) => return Ok(Some(chunk)),
                None => {
                    // Either we need more bytes, or we consumed a fragment that didn't
                    // complete the message yet; read_one_wire_chunk tells us which by
                    // leaving buf untouched in the "need more bytes" case.
                    if buf.is_empty() {
                        return Ok(None);
                    }
                }
            }
        }
    }

    /// Attempt to parse and consume exactly one wire-level chunk (basic header + message
    /// header + up to `chunk_size` payload bytes). Returns `Ok(Some(_))` only once the
    /// message this chunk belongs to is fully reassembled; otherwise `Ok(None)`, having
    /// consumed the fragment if one was available, or nothing if the buffer was too short.
    fn read_one_wire_chunk(&mut self, buf: &mut BytesMut) -> Result<Option<Chunk>, ChunkReadError> {
        let bytes = &buf[..];
        if bytes.is_empty() {
            return Ok(None);
        }

        let mut pos = 0usize;
        let first = bytes[0];
        let fmt = (first >> 6) & 0b11;
        let chunk_type = ChunkType::from_u8(fmt).ok_or(ChunkReadError::UnknownReadState)?;
        pos += 1;

        let csid = match first & 0x3F {
            0 => {
                if bytes.len() < pos + 1 {
                    return Ok(None);
                }
                let id = 64 + bytes[pos] as u32;
                pos += 1;
                id
            }
            1 => {
                if bytes.len() < pos + 2 {
                    return Ok(None);
                }
                let id = 64 + LittleEndian::read_u16(&bytes[pos..pos + 2]) as u32;
                pos += 2;
                id
            }
            n => n as u32,
        };

        let header_len = match chunk_type {
            ChunkType::Type0 => 11,
            ChunkType::Type1 => 7,
            ChunkType::Type2 => 3,
            ChunkType::Type3 => 0,
        };

        if bytes.len() < pos + header_len {
            return Ok(None);
        }

        let prev = self.contexts.get(&csid).and_then(|ctx| ctx.prev_header.clone());

        let (mut timestamp_field, msg_length, msg_type_id, msg_stream_id) = match chunk_type {
            ChunkType::Type0 => {
                let h = &bytes[pos..pos + 11];
                let ts = BigEndian::read_u24(&h[0..3]);
                let len = BigEndian::read_u24(&h[3..6]);
                let type_id = MessageTypeId::from_u8(h[6]).ok_or(ChunkReadError::UnknownMessageType { type_id: h[6] })?;
                let stream_id = LittleEndian::read_u32(&h[7..11]);
                (ts, len, type_id, stream_id)
            }
            ChunkType::Type1 => {
                let h = &bytes[pos..pos + 7];
                let prev = prev.as_ref().ok_or(ChunkReadError::MissingPreviousChunkHeader { chunk_stream_id: csid })?;
                let delta = BigEndian::read_u24(&h[0..3]);
                let len = BigEndian::read_u24(&h[3..6]);
                let type_id = MessageTypeId::from_u8(h[6]).ok_or(ChunkReadError::UnknownMessageType { type_id: h[6] })?;
                (delta, len, type_id, prev.msg_stream_id)
            }
            ChunkType::Type2 => {
                let h = &bytes[pos..pos + 3];
                let prev = prev.as_ref().ok_or(ChunkReadError::MissingPreviousChunkHeader { chunk_stream_id: csid })?;
                let delta = BigEndian::read_u24(h);
                (delta, prev.msg_length, prev.msg_type_id, prev.msg_stream_id)
            }
            ChunkType::Type3 => {
                let prev = prev.as_ref().ok_or(ChunkReadError::MissingPreviousChunkHeader { chunk_stream_id: csid })?;
                (prev.timestamp, prev.msg_length, prev.msg_type_id, prev.msg_stream_id)
            }
        };
        pos += header_len;

        let mut has_extended = false;
        if timestamp_field == 0xFFFFFF && chunk_type != ChunkType::Type3 {
            if bytes.len() < pos + 4 {
                return Ok(None);
            }
            timestamp_field = BigEndian::read_u32(&bytes[pos..pos + 4]);
            pos += 4;
            has_extended = true;
        } else if chunk_type == ChunkType::Type3 {
            // Type 3 repeats the extended timestamp field (if the message used one) on
            // every continuation chunk.
            if prev.as_ref().map(|p| p.was_extended_timestamp).unwrap_or(false) {
                if bytes.len() < pos + 4 {
                    return Ok(None);
                }
                timestamp_field = BigEndian::read_u32(&bytes[pos..pos + 4]);
                pos += 4;
                has_extended = true;
            }
        }

        // Absolute timestamp: Type0 carries an absolute value already; Type1/2 carry a
        // delta against the previous header; Type3 repeats the previous absolute value.
        let timestamp = match chunk_type {
            ChunkType::Type0 => timestamp_field,
            ChunkType::Type1 | ChunkType::Type2 => {
                let prev = prev.as_ref().ok_or(ChunkReadError::MissingPreviousChunkHeader { chunk_stream_id: csid })?;
                prev.timestamp.wrapping_add(timestamp_field)
            }
            ChunkType::Type3 => prev.as_ref().map(|p| p.timestamp).unwrap_or(timestamp_field),
        };

        let ctx = self.contexts.entry(csid).or_default();
        let already_have = ctx.payload.len() as u32;
        let remaining = msg_length.saturating_sub(already_have) as usize;
        let take = remaining.min(self.chunk_size);

        if bytes.len() < pos + take {
            return Ok(None);
        }
        if self.chunk_size > super::define::MAX_CHUNK_SIZE {
            return Err(ChunkReadError::ChunkSizeTooLarge { size: self.chunk_size });
        }

        let total_consumed = pos + take;
        let consumed = buf.split_to(total_consumed);
        ctx.payload.extend_from_slice(&consumed[pos..pos + take]);

        let header = ChunkMessageHeader {
            timestamp,
            msg_length,
            msg_type_id,
            msg_stream_id,
            was_extended_timestamp: has_extended,
        };
        ctx.prev_header = Some(header.clone());

        if ctx.payload.len() as u32 >= msg_length {
            let payload: Bytes = ctx.payload.split().freeze();
            return Ok(Some(Chunk {
                basic_header: ChunkBasicHeader {
                    format: chunk_type,
                    chunk_stream_id: csid,
                },
                message_header: header,
                payload,
            }));
        }

        Ok(None)
    }
}
