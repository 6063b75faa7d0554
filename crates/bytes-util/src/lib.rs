//! A utility crate for working with bytes: cursor helpers and the odd integer width
//! RTMP/FLV frames use that neither `byteorder` nor `bytes` cover directly.

mod cursor;
mod int24;

pub use cursor::BytesCursorExt;
pub use int24::{read_i24_be, write_i24_be};
