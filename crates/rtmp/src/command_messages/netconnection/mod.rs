mod define;
mod writer;

pub use define::NetConnectionCommand;
