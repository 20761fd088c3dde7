//! # Dispatcher: channel registry and subscription management.
//!
//! One [`Dispatcher`] value owns the whole fan-out state: the channel
//! registry, the broker seam, and the transport seam. It is constructed
//! explicitly at startup and passed to whatever drives it; there is no
//! ambient singleton.
//!
//! ## Activation contract
//! A channel's event kinds are registered with the broker **iff** the
//! channel has subscribers. Both edges are detected here:
//!
//! ```text
//! subscribe:    list was empty        ──► register every declared kind
//! unsubscribe/  list became empty     ──► deregister every declared kind
//! cancel:       (as a result of the removal; an already-empty list
//!                never deregisters again)
//! ```
//!
//! Registration failures are logged per kind and the remaining kinds are
//! still attempted; the channel counts as active with a degraded callback
//! set. Deregistration on the way down is unconditional for every declared
//! kind.
//!
//! ## Rules
//! - `subscribe` prepends: broadcast order is newest-subscriber-first.
//! - `subscribe` never deduplicates; `unsubscribe` removes **all** entries
//!   of the connection on that channel.
//! - [`Dispatcher::cancel_subscriber`] is the global canceller: it sweeps
//!   every channel and then asks the transport to close the connection.
//! - Channel ids are creation-ordered slots, stable for the process
//!   lifetime; name lookup is first-match-wins and uniqueness is not
//!   enforced.

use tracing::{error, info};

use crate::broker::EventBroker;
use crate::channels::{Channel, ChannelDef, ChannelId, Subscription};
use crate::error::DispatchError;
use crate::transport::{ConnId, Transport};

/// Channel registry plus the collaborator seams it drives.
///
/// Generic over its collaborators so embeddings and tests can swap them
/// without dynamic dispatch; `Box<dyn EventBroker>` / `Box<dyn Transport>`
/// also satisfy the bounds when type erasure is preferred.
pub struct Dispatcher<B, T> {
    pub(crate) channels: Vec<Channel>,
    pub(crate) broker: B,
    pub(crate) transport: T,
}

impl<B: EventBroker, T: Transport> Dispatcher<B, T> {
    /// Creates a dispatcher with no channels.
    pub fn new(broker: B, transport: T) -> Self {
        Self {
            channels: Vec::new(),
            broker,
            transport,
        }
    }

    /// Creates a dispatcher and registers a fixed set of channels.
    pub fn with_channels(
        broker: B,
        transport: T,
        defs: impl IntoIterator<Item = ChannelDef>,
    ) -> Self {
        let mut dispatcher = Self::new(broker, transport);
        for def in defs {
            dispatcher.create_channel(def);
        }
        dispatcher
    }

    /// Appends a new channel with zero subscribers and returns its handle.
    ///
    /// Duplicate names are accepted; the duplicate is unreachable by name
    /// lookup. Allocation exhaustion aborts the process; there is no
    /// graceful degradation for a registry that cannot grow.
    pub fn create_channel(&mut self, def: ChannelDef) -> ChannelId {
        let id = ChannelId::from_index(self.channels.len());
        self.channels.push(Channel::new(id, def));
        info!(channel = %self.channels[id.index()].name(), %id, "channel registered");
        id
    }

    /// Resolves a channel name, first match wins.
    pub fn channel_id(&self, name: &str) -> Option<ChannelId> {
        self.channels
            .iter()
            .find(|chan| chan.name() == name)
            .map(Channel::id)
    }

    /// Bounds-checked lookup by handle.
    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(id.index())
    }

    /// Iterates channels in creation order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    /// The broker seam.
    pub fn broker(&self) -> &B {
        &self.broker
    }

    /// Mutable access to the broker seam.
    pub fn broker_mut(&mut self) -> &mut B {
        &mut self.broker
    }

    /// The transport seam.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport seam.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Adds a subscription for `conn` on the channel, newest-first.
    ///
    /// The optional `format` is stored verbatim and never interpreted. If
    /// the channel had no subscribers, its event kinds are registered with
    /// the broker before the entry is inserted.
    pub fn subscribe(
        &mut self,
        conn: ConnId,
        id: ChannelId,
        format: Option<String>,
    ) -> Result<(), DispatchError> {
        let idx = self.index_of(id)?;
        if self.channels[idx].subscribers.is_empty() {
            self.activate(idx);
        }
        self.channels[idx]
            .subscribers
            .insert_front(Subscription::new(conn, format));
        Ok(())
    }

    /// Removes every subscription `conn` holds on the channel.
    ///
    /// Deregisters the channel's event kinds if the list became empty as a
    /// result; unsubscribing an already-empty channel does not deregister
    /// again.
    pub fn unsubscribe(&mut self, conn: ConnId, id: ChannelId) -> Result<(), DispatchError> {
        let idx = self.index_of(id)?;
        self.remove_matching(idx, conn);
        Ok(())
    }

    /// Sweeps `conn` out of every channel without closing its transport.
    ///
    /// Returns the total number of subscriptions removed. Deactivation runs
    /// per channel as lists empty out.
    pub fn cancel_connection(&mut self, conn: ConnId) -> usize {
        let mut total = 0;
        for idx in 0..self.channels.len() {
            let removed = self.remove_matching(idx, conn);
            if removed > 0 {
                info!(
                    channel = %self.channels[idx].name(),
                    %conn,
                    count = removed,
                    "cancelled subscriptions"
                );
            }
            total += removed;
        }
        total
    }

    /// Global subscriber canceller: removes `conn` from every channel and
    /// requests its transport be closed.
    ///
    /// Used for unsubscription-by-disconnect and for fatal send failures.
    /// Returns the number of subscriptions removed.
    pub fn cancel_subscriber(&mut self, conn: ConnId) -> usize {
        let removed = self.cancel_connection(conn);
        self.transport.close(conn);
        removed
    }

    /// Tears the registry down: clears every subscription, requests a close
    /// for every subscriber transport, and deregisters active channels.
    ///
    /// The channels themselves remain (ids stay valid); only their
    /// subscriber state is gone.
    pub fn shutdown(&mut self) {
        for idx in 0..self.channels.len() {
            let had_subscribers = !self.channels[idx].subscribers.is_empty();
            let conns: Vec<ConnId> = self.channels[idx]
                .subscribers
                .drain()
                .map(|sub| sub.conn())
                .collect();
            for conn in conns {
                self.transport.close(conn);
            }
            if had_subscribers {
                self.deactivate(idx);
            }
        }
    }

    pub(crate) fn index_of(&self, id: ChannelId) -> Result<usize, DispatchError> {
        let idx = id.index();
        if idx < self.channels.len() {
            Ok(idx)
        } else {
            Err(DispatchError::UnknownChannel(id))
        }
    }

    /// Removes `conn` from one channel and runs the deactivation edge.
    fn remove_matching(&mut self, idx: usize, conn: ConnId) -> usize {
        let removed = self.channels[idx].subscribers.remove_all(conn);
        if removed > 0 && self.channels[idx].subscribers.is_empty() {
            self.deactivate(idx);
        }
        removed
    }

    /// 0→1 edge: registers every declared kind, best-effort.
    fn activate(&mut self, idx: usize) {
        let chan = &self.channels[idx];
        let id = chan.id();
        for &kind in chan.kinds() {
            if let Err(err) = self.broker.register(kind, id) {
                error!(
                    channel = %chan.name(),
                    kind = kind.as_label(),
                    error = %err,
                    "failed to register callback"
                );
            }
        }
    }

    /// 1→0 edge: deregisters every declared kind unconditionally.
    fn deactivate(&mut self, idx: usize) {
        let chan = &self.channels[idx];
        let id = chan.id();
        for &kind in chan.kinds() {
            self.broker.deregister(kind, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::testutil::{
        assert_activation_invariant, NullFeed, RecordingBroker, ScriptedTransport,
    };

    fn dispatcher() -> Dispatcher<RecordingBroker, ScriptedTransport> {
        Dispatcher::with_channels(
            RecordingBroker::new(),
            ScriptedTransport::new(),
            vec![
                ChannelDef::new(
                    "alpha",
                    "Alpha feed",
                    vec![EventKind::HostCheck, EventKind::ServiceCheck],
                    NullFeed,
                ),
                ChannelDef::new("beta", "Beta feed", vec![EventKind::ServiceCheck], NullFeed),
            ],
        )
    }

    #[test]
    fn test_lookup_by_name_and_id() {
        let d = dispatcher();
        let alpha = d.channel_id("alpha").expect("alpha exists");
        assert_eq!(d.channel(alpha).unwrap().name(), "alpha");
        assert!(d.channel_id("gamma").is_none());
        assert!(d.channel(ChannelId::from_index(9)).is_none());
    }

    #[test]
    fn test_duplicate_names_resolve_to_first_created() {
        let mut d = dispatcher();
        let dup = d.create_channel(ChannelDef::new(
            "alpha",
            "Shadowed",
            vec![EventKind::HostCheck],
            NullFeed,
        ));
        let resolved = d.channel_id("alpha").unwrap();
        assert_ne!(resolved, dup);
        assert_eq!(d.channel(resolved).unwrap().description(), "Alpha feed");
    }

    #[test]
    fn test_activation_fires_once_per_edge() {
        let mut d = dispatcher();
        let alpha = d.channel_id("alpha").unwrap();
        let (a, b) = (ConnId::new(1), ConnId::new(2));

        d.subscribe(a, alpha, None).unwrap();
        assert_activation_invariant(&d);
        assert_eq!(d.broker().register_calls, 2, "one call per declared kind");

        d.subscribe(b, alpha, None).unwrap();
        assert_activation_invariant(&d);
        assert_eq!(d.broker().register_calls, 2, "no re-register on 1→2");

        d.unsubscribe(a, alpha).unwrap();
        assert_activation_invariant(&d);
        assert_eq!(d.broker().deregister_calls, 0, "still one subscriber left");

        d.unsubscribe(b, alpha).unwrap();
        assert_activation_invariant(&d);
        assert_eq!(d.broker().deregister_calls, 2, "one call per declared kind");
    }

    #[test]
    fn test_unsubscribe_on_empty_channel_never_double_deregisters() {
        let mut d = dispatcher();
        let alpha = d.channel_id("alpha").unwrap();
        let a = ConnId::new(1);

        d.subscribe(a, alpha, None).unwrap();
        d.unsubscribe(a, alpha).unwrap();
        let after_first = d.broker().deregister_calls;

        d.unsubscribe(a, alpha).unwrap();
        d.unsubscribe(ConnId::new(9), alpha).unwrap();
        assert_eq!(d.broker().deregister_calls, after_first);
        assert_activation_invariant(&d);
    }

    #[test]
    fn test_refused_registration_keeps_channel_active_and_tries_the_rest() {
        let mut d = dispatcher();
        d.broker_mut().refuse.push(EventKind::HostCheck);
        let alpha = d.channel_id("alpha").unwrap();

        d.subscribe(ConnId::new(1), alpha, None).unwrap();
        assert_eq!(d.broker().register_calls, 2, "remaining kinds still tried");
        assert!(d.broker().is_active(EventKind::ServiceCheck, alpha));
        assert!(!d.broker().is_active(EventKind::HostCheck, alpha));
        assert_eq!(d.channel(alpha).unwrap().subscribers().len(), 1);

        // The degraded binding is still torn down unconditionally.
        d.unsubscribe(ConnId::new(1), alpha).unwrap();
        assert_eq!(d.broker().deregister_calls, 2);
        assert_activation_invariant(&d);
    }

    #[test]
    fn test_subscribe_never_deduplicates() {
        let mut d = dispatcher();
        let alpha = d.channel_id("alpha").unwrap();
        let a = ConnId::new(1);

        d.subscribe(a, alpha, None).unwrap();
        d.subscribe(a, alpha, Some("brief".into())).unwrap();
        assert_eq!(d.channel(alpha).unwrap().subscribers().len(), 2);

        // One unsubscribe is a full cleanup for the connection.
        d.unsubscribe(a, alpha).unwrap();
        assert!(d.channel(alpha).unwrap().subscribers().is_empty());
        assert_activation_invariant(&d);
    }

    #[test]
    fn test_unknown_channel_id_is_reported_without_side_effects() {
        let mut d = dispatcher();
        let bogus = ChannelId::from_index(42);
        assert!(matches!(
            d.subscribe(ConnId::new(1), bogus, None),
            Err(DispatchError::UnknownChannel(_))
        ));
        assert!(matches!(
            d.unsubscribe(ConnId::new(1), bogus),
            Err(DispatchError::UnknownChannel(_))
        ));
        assert_eq!(d.broker().register_calls, 0);
    }

    #[test]
    fn test_cancel_connection_sweeps_all_channels_and_spares_others() {
        let mut d = dispatcher();
        let alpha = d.channel_id("alpha").unwrap();
        let beta = d.channel_id("beta").unwrap();
        let (a, b) = (ConnId::new(1), ConnId::new(2));

        d.subscribe(a, alpha, None).unwrap();
        d.subscribe(a, alpha, None).unwrap();
        d.subscribe(a, beta, None).unwrap();
        d.subscribe(b, alpha, None).unwrap();

        let removed = d.cancel_connection(a);
        assert_eq!(removed, 3);
        assert_activation_invariant(&d);

        let alpha_conns: Vec<ConnId> = d
            .channel(alpha)
            .unwrap()
            .subscribers()
            .iter()
            .map(|s| s.conn())
            .collect();
        assert_eq!(alpha_conns, vec![b]);
        assert!(d.channel(beta).unwrap().subscribers().is_empty());
        assert!(
            d.transport().closed.is_empty(),
            "cancel_connection must not close the transport"
        );
    }

    #[test]
    fn test_cancel_subscriber_also_requests_close() {
        let mut d = dispatcher();
        let alpha = d.channel_id("alpha").unwrap();
        let a = ConnId::new(1);

        d.subscribe(a, alpha, None).unwrap();
        let removed = d.cancel_subscriber(a);
        assert_eq!(removed, 1);
        assert_eq!(d.transport().closed, vec![a]);
        assert_activation_invariant(&d);
    }

    #[test]
    fn test_shutdown_clears_everything_and_closes_transports() {
        let mut d = dispatcher();
        let alpha = d.channel_id("alpha").unwrap();
        let beta = d.channel_id("beta").unwrap();
        let (a, b) = (ConnId::new(1), ConnId::new(2));

        d.subscribe(a, alpha, None).unwrap();
        d.subscribe(b, alpha, None).unwrap();
        d.subscribe(b, beta, None).unwrap();

        d.shutdown();
        assert!(d.channels().all(|c| c.subscribers().is_empty()));
        assert!(d.broker().active.is_empty());
        assert_eq!(d.transport().closed.len(), 3, "one close per subscription");
        assert_activation_invariant(&d);
    }
}
