//! An in-process, synchronous pub/sub used to tell callers about status changes on the
//! stream (connection established, publish accepted, ...) without coupling the stream
//! queue task to any particular consumer.

use std::collections::HashMap;

use crate::command_messages::CommandResultLevel;

/// The event names a [`crate::session::PublishSession`] can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamEvent {
    /// A `NetConnection`/`NetStream` status message was received from the peer.
    RtmpStatus,
}

/// The payload delivered alongside [`StreamEvent::RtmpStatus`].
#[derive(Debug, Clone)]
pub struct StatusEvent {
    pub level: CommandResultLevel,
    pub code: String,
    pub description: Option<String>,
}

/// Identifies a registered listener so it can later be removed with [`EventDispatcher::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Identifies the owner a listener was registered on behalf of. Removal requires both the
/// listener id and its owner, so unregistration is scoped to the handle that registered it
/// rather than any caller who happens to know the id.
pub type OwnerId = u64;

struct Listener {
    owner: OwnerId,
    id: u64,
    callback: Box<dyn FnMut(&StatusEvent) + Send>,
}

/// Dispatches events to every listener registered for them, in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    next_id: u64,
    listeners: HashMap<StreamEvent, Vec<Listener>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, event: StreamEvent, owner: OwnerId, callback: impl FnMut(&StatusEvent) + Send + 'static) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;

        self.listeners.entry(event).or_default().push(Listener {
            owner,
            id,
            callback: Box::new(callback),
        });

        ListenerId(id)
    }

    pub fn off(&mut self, event: StreamEvent, listener: ListenerId, owner: OwnerId) {
        if let Some(listeners) = self.listeners.get_mut(&event) {
            listeners.retain(|l| !(l.id == listener.0 && l.owner == owner));
        }
    }

    pub fn dispatch(&mut self, event: StreamEvent, payload: &StatusEvent) {
        if let Some(listeners) = self.listeners.get_mut(&event) {
            for listener in listeners.iter_mut() {
                (listener.callback)(payload);
            }
        }
    }
}
