//! # Event-broker seam: lazily activated host callbacks.
//!
//! The host engine owns the machinery that fires when monitoring events
//! occur. The dispatcher only ever tells it *which* event kinds it currently
//! wants, bound to *which* channel, through [`EventBroker`]. Registrations
//! exist exactly while a channel has subscribers, so an inactive channel
//! costs the engine nothing.
//!
//! ## Rules
//! - `register`/`deregister` are issued once per 0↔1 subscriber transition
//!   of a channel, once per declared kind, never per subscriber.
//! - A refused `register` is non-fatal: the caller logs it and continues
//!   with the channel's remaining kinds.
//! - `deregister` must tolerate bindings that were never established (a
//!   kind whose registration was refused earlier is still deregistered on
//!   the way down).
//!
//! [`RoutingBroker`] is a provided reference implementation that simply
//! records the bindings. An embedding that owns the event loop can ask it
//! which channels want a kind and drive
//! [`Dispatcher::deliver`](crate::Dispatcher::deliver) for each; the
//! feature-gated service does exactly that.

use crate::channels::ChannelId;
use crate::error::BrokerError;
use crate::events::EventKind;

/// Host-side collaborator accepting per-kind callback registrations.
pub trait EventBroker {
    /// Asks the engine to route events of `kind` to `channel` from now on.
    fn register(&mut self, kind: EventKind, channel: ChannelId) -> Result<(), BrokerError>;

    /// Withdraws a previous registration. Unknown bindings are a no-op.
    fn deregister(&mut self, kind: EventKind, channel: ChannelId);
}

impl<B: EventBroker + ?Sized> EventBroker for Box<B> {
    fn register(&mut self, kind: EventKind, channel: ChannelId) -> Result<(), BrokerError> {
        (**self).register(kind, channel)
    }

    fn deregister(&mut self, kind: EventKind, channel: ChannelId) {
        (**self).deregister(kind, channel)
    }
}

/// Reference broker keeping kind→channel routes in registration order.
///
/// Accepts every registration. Embeddings that already have a broker of
/// their own implement [`EventBroker`] directly instead.
#[derive(Debug, Default)]
pub struct RoutingBroker {
    routes: Vec<(EventKind, ChannelId)>,
}

impl RoutingBroker {
    /// Creates an empty broker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the channels currently registered for `kind`, in
    /// registration order.
    pub fn routes(&self, kind: EventKind) -> Vec<ChannelId> {
        self.routes
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, id)| *id)
            .collect()
    }

    /// True if `channel` holds a live registration for `kind`.
    pub fn is_registered(&self, kind: EventKind, channel: ChannelId) -> bool {
        self.routes.iter().any(|&(k, c)| k == kind && c == channel)
    }
}

impl EventBroker for RoutingBroker {
    fn register(&mut self, kind: EventKind, channel: ChannelId) -> Result<(), BrokerError> {
        self.routes.push((kind, channel));
        Ok(())
    }

    fn deregister(&mut self, kind: EventKind, channel: ChannelId) {
        self.routes.retain(|&(k, c)| !(k == kind && c == channel));
    }
}
