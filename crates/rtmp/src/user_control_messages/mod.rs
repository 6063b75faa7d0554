//! RTMP user control (event) messages.

mod define;
mod errors;
mod writer;

pub use define::{EventMessageStreamBegin, EventType};
pub use errors::EventMessagesError;
