use thiserror::Error;

use crate::marker::Amf0Marker;

#[derive(Debug, Error)]
pub enum Amf0Error {
    #[error("unexpected end of data")]
    UnexpectedEof,
    #[error("unknown marker byte: {0}")]
    UnknownMarker(u8),
    #[error("expected marker {expected:?}, got {actual:?}")]
    UnexpectedType { expected: Amf0Marker, actual: Amf0Marker },
    #[error("string is not valid utf-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("object is missing a terminating end marker")]
    UnterminatedObject,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
