//! A pure-rust implementation of an AMF0 encoder and decoder, sufficient for the
//! command and data message payloads exchanged over RTMP.

mod decoder;
mod encoder;
mod errors;
mod marker;
mod value;

pub use decoder::Amf0Decoder;
pub use encoder::Amf0Encoder;
pub use errors::Amf0Error;
pub use marker::Amf0Marker;
pub use value::Amf0Value;
