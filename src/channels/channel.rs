//! Channel identity, definition, and the per-channel feed seam.

use std::fmt;

use crate::events::{EngineEvent, EventKind};

use super::SubscriberList;

/// Stable handle for one channel.
///
/// Assigned at creation, it is the index into the registry's storage:
/// lookups are O(1) and bounds-checked. Ids are never compacted or reused
/// for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u32);

impl ChannelId {
    /// Builds an id from a registry slot index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the registry slot index.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders engine events into the channel's wire payload.
///
/// One feed per channel, dispatched through this trait (channels differ only
/// in how they turn an event into text). A feed may decline an event by
/// returning `None` (wrong kind, wrong lifecycle phase) and nothing is
/// broadcast for it.
pub trait ChannelFeed: Send {
    /// Formats `event` for this channel, or declines it.
    fn render(&self, event: &EngineEvent) -> Option<String>;
}

/// Everything needed to create one channel.
pub struct ChannelDef {
    /// Channel name, the lookup key of the control protocol.
    pub name: String,
    /// Human-readable purpose, shown by the `list` command.
    pub description: String,
    /// Event kinds to register with the broker while the channel is active.
    pub kinds: Vec<EventKind>,
    /// Feed that renders matching events for this channel.
    pub feed: Box<dyn ChannelFeed>,
}

impl ChannelDef {
    /// Builds a definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kinds: Vec<EventKind>,
        feed: impl ChannelFeed + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kinds,
            feed: Box::new(feed),
        }
    }
}

/// One named publish point.
///
/// Identity fields are immutable after creation; only the subscriber list
/// changes. Name uniqueness is not enforced: the registry resolves names
/// first-match-wins, so a later duplicate is simply unreachable by name.
pub struct Channel {
    pub(crate) id: ChannelId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) kinds: Vec<EventKind>,
    pub(crate) feed: Box<dyn ChannelFeed>,
    pub(crate) subscribers: SubscriberList,
}

impl Channel {
    pub(crate) fn new(id: ChannelId, def: ChannelDef) -> Self {
        Self {
            id,
            name: def.name,
            description: def.description,
            kinds: def.kinds,
            feed: def.feed,
            subscribers: SubscriberList::new(),
        }
    }

    /// Stable channel handle.
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Channel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable purpose.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Event kinds this channel taps while active.
    pub fn kinds(&self) -> &[EventKind] {
        &self.kinds
    }

    /// Current subscribers, newest first.
    pub fn subscribers(&self) -> &SubscriberList {
        &self.subscribers
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kinds", &self.kinds)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
