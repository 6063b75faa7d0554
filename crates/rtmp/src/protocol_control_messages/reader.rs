use byteorder::{BigEndian, ByteOrder};

use super::define::ProtocolControlMessageSetChunkSize;
use super::errors::ProtocolControlMessageError;

impl ProtocolControlMessageSetChunkSize {
    pub fn read(data: &[u8]) -> Result<Self, ProtocolControlMessageError> {
        if data.len() < 4 {
            return Err(ProtocolControlMessageError::NotEnoughData);
        }

        Ok(Self {
            chunk_size: BigEndian::read_u32(&data[0..4]) & 0x7FFFFFFF,
        })
    }
}
