use std::io;

use byteorder::WriteBytesExt;
use bytes::Bytes;
use num_traits::FromPrimitive;

use crate::errors::FlvError;

/// `SoundFormat=10 (AAC) | SoundRate=3 (44 kHz) | SoundSize=1 (16-bit) | SoundType=1 (stereo)`,
/// the only combination any encoder we interop with ever emits.
pub const AAC_CONTROL_BYTE: u8 = 0xAF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, num_derive::FromPrimitive)]
#[repr(u8)]
pub enum AacPacketType {
    SequenceHeader = 0,
    Raw = 1,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioTag {
    pub packet_type: AacPacketType,
    pub data: Bytes,
}

impl AudioTag {
    pub fn mux(&self, writer: &mut impl io::Write) -> Result<(), FlvError> {
        writer.write_u8(AAC_CONTROL_BYTE)?;
        writer.write_u8(self.packet_type as u8)?;
        writer.write_all(&self.data)?;
        Ok(())
    }

    pub fn demux(data: &Bytes) -> Result<Self, FlvError> {
        if data.len() < 2 {
            return Err(FlvError::NotEnoughData { needed: 2, have: data.len() });
        }
        if data[0] != AAC_CONTROL_BYTE {
            return Err(FlvError::UnsupportedAudioFormat(data[0]));
        }

        let packet_type = AacPacketType::from_u8(data[1]).ok_or(FlvError::UnsupportedAudioFormat(data[1]))?;

        Ok(Self {
            packet_type,
            data: data.slice(2..),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_sequence_header() {
        let tag = AudioTag {
            packet_type: AacPacketType::SequenceHeader,
            data: Bytes::from_static(&[0x12, 0x10]),
        };

        let mut buf = Vec::new();
        tag.mux(&mut buf).unwrap();
        assert_eq!(buf, vec![0xAF, 0x00, 0x12, 0x10]);

        assert_eq!(AudioTag::demux(&Bytes::from(buf)).unwrap(), tag);
    }

    #[test]
    fn test_demux_rejects_non_aac_format() {
        let data = Bytes::from_static(&[0x2F, 0x01]); // MP3, not supported
        assert!(matches!(AudioTag::demux(&data), Err(FlvError::UnsupportedAudioFormat(_))));
    }
}
