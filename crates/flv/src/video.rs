use std::io;

use byteorder::WriteBytesExt;
use bytes::Bytes;
use bytes_util::{read_i24_be, write_i24_be};
use num_traits::FromPrimitive;

use crate::errors::FlvError;

/// The FourCC used by the "extended video" tag header this workspace supports (HEVC).
pub const HEVC_FOURCC: [u8; 4] = *b"hvc1";

const LEGACY_AVC_CODEC_ID: u8 = 7;
const EXTENDED_HEADER_FLAG: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, num_derive::FromPrimitive)]
#[repr(u8)]
pub enum VideoFrameType {
    Key = 1,
    Inter = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, num_derive::FromPrimitive)]
#[repr(u8)]
pub enum AvcPacketType {
    SequenceHeader = 0,
    Nalu = 1,
    EndOfSequence = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, num_derive::FromPrimitive)]
#[repr(u8)]
pub enum HevcPacketType {
    SequenceStart = 0,
    CodedFrames = 1,
    SequenceEnd = 2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VideoTagBody {
    Avc {
        packet_type: AvcPacketType,
        /// PTS - DTS, in milliseconds.
        composition_time: i32,
        data: Bytes,
    },
    Hevc {
        packet_type: HevcPacketType,
        composition_time: i32,
        data: Bytes,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoTag {
    pub frame_type: VideoFrameType,
    pub body: VideoTagBody,
}

impl VideoTag {
    pub fn mux(&self, writer: &mut impl io::Write) -> Result<(), FlvError> {
        match &self.body {
            VideoTagBody::Avc {
                packet_type,
                composition_time,
                data,
            } => {
                writer.write_u8((self.frame_type as u8) << 4 | LEGACY_AVC_CODEC_ID)?;
                writer.write_u8(*packet_type as u8)?;
                writer.write_all(&write_i24_be(*composition_time))?;
                writer.write_all(data)?;
            }
            VideoTagBody::Hevc {
                packet_type,
                composition_time,
                data,
            } => {
                writer.write_u8(EXTENDED_HEADER_FLAG | (self.frame_type as u8) << 4 | *packet_type as u8)?;
                writer.write_all(&HEVC_FOURCC)?;
                if matches!(packet_type, HevcPacketType::CodedFrames) {
                    writer.write_all(&write_i24_be(*composition_time))?;
                }
                writer.write_all(data)?;
            }
        }

        Ok(())
    }

    pub fn demux(data: &Bytes) -> Result<Self, FlvError> {
        if data.is_empty() {
            return Err(FlvError::NotEnoughData { needed: 1, have: 0 });
        }

        let first = data[0];
        if first & EXTENDED_HEADER_FLAG != 0 {
            let frame_type = VideoFrameType::from_u8((first >> 4) & 0x07).ok_or(FlvError::UnknownFrameType(first))?;
            let packet_type_raw = first & 0x0F;
            let packet_type = HevcPacketType::from_u8(packet_type_raw).ok_or(FlvError::UnknownHevcPacketType(packet_type_raw))?;

            if data.len() < 5 {
                return Err(FlvError::NotEnoughData { needed: 5, have: data.len() });
            }
            let fourcc: [u8; 4] = data[1..5].try_into().expect("checked length above");
            if fourcc != HEVC_FOURCC {
                return Err(FlvError::UnsupportedFourCc(fourcc));
            }

            let (composition_time, body_start) = if matches!(packet_type, HevcPacketType::CodedFrames) {
                if data.len() < 8 {
                    return Err(FlvError::NotEnoughData { needed: 8, have: data.len() });
                }
                (read_i24_be([data[5], data[6], data[7]]), 8)
            } else {
                (0, 5)
            };

            Ok(Self {
                frame_type,
                body: VideoTagBody::Hevc {
                    packet_type,
                    composition_time,
                    data: data.slice(body_start..),
                },
            })
        } else {
            let frame_type = VideoFrameType::from_u8((first >> 4) & 0x0F).ok_or(FlvError::UnknownFrameType(first))?;

            if data.len() < 5 {
                return Err(FlvError::NotEnoughData { needed: 5, have: data.len() });
            }
            let packet_type = AvcPacketType::from_u8(data[1]).ok_or(FlvError::UnknownAvcPacketType(data[1]))?;
            let composition_time = read_i24_be([data[2], data[3], data[4]]);

            Ok(Self {
                frame_type,
                body: VideoTagBody::Avc {
                    packet_type,
                    composition_time,
                    data: data.slice(5..),
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avc_round_trip() {
        let tag = VideoTag {
            frame_type: VideoFrameType::Key,
            body: VideoTagBody::Avc {
                packet_type: AvcPacketType::Nalu,
                composition_time: 100,
                data: Bytes::from_static(b"nalu"),
            },
        };

        let mut buf = Vec::new();
        tag.mux(&mut buf).unwrap();
        assert_eq!(buf[0], (1 << 4) | 7);

        let decoded = VideoTag::demux(&Bytes::from(buf)).unwrap();
        assert_eq!(decoded, tag);
    }

    #[test]
    fn test_hevc_key_frame_round_trip() {
        let tag = VideoTag {
            frame_type: VideoFrameType::Key,
            body: VideoTagBody::Hevc {
                packet_type: HevcPacketType::CodedFrames,
                composition_time: 33,
                data: Bytes::from_static(b"hevc-au"),
            },
        };

        let mut buf = Vec::new();
        tag.mux(&mut buf).unwrap();
        assert_eq!(buf[0], 0x80 | (1 << 4) | 1);
        assert_eq!(&buf[1..5], b"hvc1");

        let decoded = VideoTag::demux(&Bytes::from(buf)).unwrap();
        assert_eq!(decoded, tag);
    }

    #[test]
    fn test_hevc_sequence_start_has_no_composition_time() {
        let tag = VideoTag {
            frame_type: VideoFrameType::Key,
            body: VideoTagBody::Hevc {
                packet_type: HevcPacketType::SequenceStart,
                composition_time: 0,
                data: Bytes::from_static(b"hvcC"),
            },
        };

        let mut buf = Vec::new();
        tag.mux(&mut buf).unwrap();
        assert_eq!(buf.len(), 5 + 4);

        let decoded = VideoTag::demux(&Bytes::from(buf)).unwrap();
        assert_eq!(decoded, tag);
    }

    #[test]
    fn test_demux_rejects_unknown_fourcc() {
        let mut buf = vec![0x80 | (1 << 4) | 1];
        buf.extend_from_slice(b"av01");
        buf.extend_from_slice(&[0, 0, 0]);

        assert!(matches!(
            VideoTag::demux(&Bytes::from(buf)),
            Err(FlvError::UnsupportedFourCc(_))
        ));
    }
}
