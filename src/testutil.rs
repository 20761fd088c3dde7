//! Recording collaborators shared by the dispatcher and protocol tests.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::broker::EventBroker;
use crate::channels::{ChannelFeed, ChannelId};
use crate::dispatch::Dispatcher;
use crate::error::BrokerError;
use crate::events::{EngineEvent, EventKind};
use crate::transport::{ConnId, Transport, WriteOutcome};

/// Broker that records registrations and can refuse selected kinds.
pub(crate) struct RecordingBroker {
    pub active: Vec<(EventKind, ChannelId)>,
    pub register_calls: usize,
    pub deregister_calls: usize,
    pub refuse: Vec<EventKind>,
}

impl RecordingBroker {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            register_calls: 0,
            deregister_calls: 0,
            refuse: Vec::new(),
        }
    }

    pub fn is_active(&self, kind: EventKind, channel: ChannelId) -> bool {
        self.active.iter().any(|&(k, c)| k == kind && c == channel)
    }
}

impl EventBroker for RecordingBroker {
    fn register(&mut self, kind: EventKind, channel: ChannelId) -> Result<(), BrokerError> {
        self.register_calls += 1;
        if self.refuse.contains(&kind) {
            return Err(BrokerError::new("refused by test broker"));
        }
        self.active.push((kind, channel));
        Ok(())
    }

    fn deregister(&mut self, kind: EventKind, channel: ChannelId) {
        self.deregister_calls += 1;
        self.active.retain(|&(k, c)| !(k == kind && c == channel));
    }
}

/// Per-connection scripted write behavior.
#[derive(Clone, Copy)]
pub(crate) enum WriteFault {
    WouldBlock,
    Error,
}

/// Transport that records successful writes and close requests.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    pub writes: Vec<(ConnId, Vec<u8>)>,
    pub closed: Vec<ConnId>,
    pub faults: HashMap<ConnId, WriteFault>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads delivered to `conn`, in write order.
    pub fn payloads_to(&self, conn: ConnId) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|(c, _)| *c == conn)
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn write(&mut self, conn: ConnId, payload: &[u8]) -> WriteOutcome {
        match self.faults.get(&conn) {
            Some(WriteFault::WouldBlock) => WriteOutcome::WouldBlock,
            Some(WriteFault::Error) => {
                WriteOutcome::Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted failure"))
            }
            None => {
                self.writes.push((conn, payload.to_vec()));
                WriteOutcome::Done
            }
        }
    }

    fn close(&mut self, conn: ConnId) {
        self.closed.push(conn);
    }
}

/// Feed that declines every event.
pub(crate) struct NullFeed;

impl ChannelFeed for NullFeed {
    fn render(&self, _event: &EngineEvent) -> Option<String> {
        None
    }
}

/// Feed that counts renders and returns a fixed payload (or declines).
pub(crate) struct CountingFeed {
    pub calls: Arc<AtomicUsize>,
    output: Option<&'static str>,
}

impl CountingFeed {
    pub fn passing(output: &'static str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            output: Some(output),
        }
    }

    pub fn declining() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            output: None,
        }
    }
}

impl ChannelFeed for CountingFeed {
    fn render(&self, _event: &EngineEvent) -> Option<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.output.map(str::to_owned)
    }
}

/// Checks the activation invariant: a channel's kinds are registered iff
/// the channel has subscribers. Kinds the broker refuses are exempt from
/// the forward direction, since a refused registration leaves the channel
/// active with a degraded callback set.
pub(crate) fn assert_activation_invariant(d: &Dispatcher<RecordingBroker, ScriptedTransport>) {
    for chan in d.channels() {
        for &kind in chan.kinds() {
            let registered = d.broker().is_active(kind, chan.id());
            if chan.subscribers().is_empty() {
                assert!(
                    !registered,
                    "channel '{}' is empty but {} is still registered",
                    chan.name(),
                    kind.as_label()
                );
            } else if !d.broker().refuse.contains(&kind) {
                assert!(
                    registered,
                    "channel '{}' has subscribers but {} is not registered",
                    chan.name(),
                    kind.as_label()
                );
            }
        }
    }
}
