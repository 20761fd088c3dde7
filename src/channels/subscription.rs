//! Per-channel subscriber list with newest-first traversal order.
//!
//! The list is the delivery order: [`SubscriberList::insert_front`] puts the
//! newest subscriber at the head, so a broadcast reaches the most recent
//! subscriber first. Removal preserves the relative order of the remainder.
//!
//! ## Rules
//! - `insert_front` never deduplicates. Subscribing twice from the same
//!   connection yields two entries that both receive every broadcast.
//! - `remove_all` removes **every** entry matching the connection, so one
//!   call is always a full cleanup for that connection on that channel.

use std::collections::VecDeque;

use crate::transport::ConnId;

/// One connection's registered interest in one channel.
#[derive(Debug, Clone)]
pub struct Subscription {
    conn: ConnId,
    format: Option<String>,
}

impl Subscription {
    pub(crate) fn new(conn: ConnId, format: Option<String>) -> Self {
        Self { conn, format }
    }

    /// Connection holding this subscription; the cancellation key.
    pub fn conn(&self) -> ConnId {
        self.conn
    }

    /// Client-supplied format hint, stored verbatim.
    ///
    /// This layer never applies it to outgoing payloads.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }
}

/// Ordered set of active subscribers of one channel.
#[derive(Debug, Default)]
pub struct SubscriberList {
    entries: VecDeque<Subscription>,
}

impl SubscriberList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Prepends a subscription: the newest subscriber is visited first.
    pub(crate) fn insert_front(&mut self, sub: Subscription) {
        self.entries.push_front(sub);
    }

    /// Removes every subscription held by `conn`, keeping the relative
    /// order of the remainder. Returns how many entries were removed.
    pub(crate) fn remove_all(&mut self, conn: ConnId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|sub| sub.conn != conn);
        before - self.entries.len()
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Subscription> + '_ {
        self.entries.drain(..)
    }

    /// True if the channel has no subscribers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of subscriptions (duplicates counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &Subscription> {
        self.entries.iter()
    }
}
