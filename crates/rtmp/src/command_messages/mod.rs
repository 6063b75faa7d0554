mod define;
mod errors;
pub mod netconnection;
pub mod netstream;
mod writer;

pub use define::{Command, CommandResultLevel, CommandType};
pub use errors::CommandError;
pub use netconnection::NetConnectionCommand;
pub use netstream::NetStreamCommand;
