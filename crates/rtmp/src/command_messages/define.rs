use crate::command_messages::netconnection::NetConnectionCommand;
use crate::command_messages::netstream::NetStreamCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResultLevel {
    Warning,
    Status,
    Error,
}

impl CommandResultLevel {
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Status => "status",
            Self::Error => "error",
        }
    }
}

/// A command message this publisher issues to its peer: a `NetConnection` or
/// `NetStream` method call bundled with the AMF0 transaction id RTMP correlates
/// responses by.
#[derive(Debug, Clone)]
pub struct Command<'a> {
    pub transaction_id: f64,
    pub net_command: CommandType<'a>,
}

#[derive(Debug, Clone)]
pub enum CommandType<'a> {
    NetConnection(NetConnectionCommand<'a>),
    NetStream(NetStreamCommand<'a>),
}
