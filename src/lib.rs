//! # feedcast
//!
//! **feedcast** is a channel-based event fan-out dispatcher for monitoring
//! runtimes. A host engine produces a stream of internal events; feedcast
//! groups them into named **channels** that external client connections
//! subscribe to over a shared control connection, receiving a live text
//! feed of whatever the channel taps.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   host engine events            control connections (clients)
//!         │                               │
//!         ▼                               ▼  "subscribe hostchecks"
//! ┌──────────────────┐            ┌─────────────────────┐
//! │   EventBroker    │            │  control server     │
//! │ (kind→channel    │            │  (line framing,     │
//! │  registrations)  │            │   status replies)   │
//! └───────┬──────────┘            └─────────┬───────────┘
//!         │ deliver(id, event)              │ handle_control(conn, line)
//!         ▼                                 ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │ Dispatcher (single owner, single thread)                  │
//! │   ┌─ Channel "hostchecks"    [sub₃, sub₂, sub₁]  newest   │
//! │   ├─ Channel "servicechecks" [sub₅, sub₄]        first    │
//! │   └─ ...                                                  │
//! │   activation: kinds registered  ⇔  list non-empty         │
//! └───────────────────────┬───────────────────────────────────┘
//!                         │ write / close
//!                         ▼
//!                  Transport (socket reactor)
//! ```
//!
//! ### Rules
//! - **Lazy activation**: a channel's event kinds are registered with the
//!   broker only while it has subscribers; the 0↔1 edges are the only
//!   registration points.
//! - **Newest first**: subscribing prepends, and broadcasts walk the list
//!   in that order.
//! - **Best effort**: a broadcast aborts on the first saturated subscriber
//!   (success) or the first dead one (that subscriber is cancelled
//!   everywhere and closed, the loss is reported). No retries, no queues.
//! - **One thread**: every operation is a synchronous `&mut self` call; the
//!   dispatcher is explicitly constructed and owned, never global.
//!
//! ## Example
//! ```rust
//! use feedcast::feeds::standard_channels;
//! use feedcast::{
//!     CheckPhase, ConnId, Dispatcher, EngineEvent, HostCheckData, RoutingBroker, Transport,
//!     WriteOutcome,
//! };
//!
//! /// Transport stub collecting every delivered payload.
//! struct Sink(Vec<(ConnId, Vec<u8>)>);
//!
//! impl Transport for Sink {
//!     fn write(&mut self, conn: ConnId, payload: &[u8]) -> WriteOutcome {
//!         self.0.push((conn, payload.to_vec()));
//!         WriteOutcome::Done
//!     }
//!     fn close(&mut self, _conn: ConnId) {}
//! }
//!
//! let mut dispatcher =
//!     Dispatcher::with_channels(RoutingBroker::new(), Sink(Vec::new()), standard_channels());
//!
//! // A client on the control connection subscribes to host check results.
//! let client = ConnId::new(1);
//! assert!(dispatcher.handle_control(client, "subscribe hostchecks").is_ok());
//!
//! // The host engine reports a processed host check; registered routes
//! // say which channels want it.
//! let event = EngineEvent::HostCheck(HostCheckData {
//!     phase: CheckPhase::Processed,
//!     name: "web01".into(),
//!     last_state: 0,
//!     current_state: 1,
//!     output: "PING CRITICAL".into(),
//! });
//! for id in dispatcher.broker().routes(event.kind()) {
//!     dispatcher.deliver(id, &event).unwrap();
//! }
//!
//! let (conn, payload) = &dispatcher.transport().0[0];
//! assert_eq!(*conn, client);
//! assert_eq!(payload, b"web01 from 0 -> 1: PING CRITICAL\n");
//! ```
//!
//! ## Features
//! | Area                | Description                                               | Key types / traits                      |
//! |---------------------|-----------------------------------------------------------|-----------------------------------------|
//! | **Registry**        | Named channels, stable ids, first-match name lookup.      | [`Dispatcher`], [`Channel`], [`ChannelDef`] |
//! | **Subscriptions**   | Newest-first lists, duplicate-tolerant, bulk removal.     | [`Subscription`], [`SubscriberList`]    |
//! | **Broadcast**       | Best-effort fan-out with early abort.                     | [`Dispatcher::broadcast`], [`Dispatcher::deliver`] |
//! | **Control protocol**| `list` / `subscribe` / `unsubscribe` / `help` over text.  | [`Command`], [`ControlStatus`]          |
//! | **Seams**           | Host broker and socket reactor as swappable traits.       | [`EventBroker`], [`Transport`]          |
//! | **Standard feeds**  | Host/service check channels of the stock engine.          | [`feeds`]                               |
//!
//! ## Optional features
//! - `service`: a ready-made Unix domain socket deployment (control
//!   server, reactor transport, producer handle) in the `service` module.

mod broker;
mod channels;
mod dispatch;
mod error;
mod events;
mod protocol;
mod transport;

pub mod feeds;

#[cfg(test)]
mod testutil;

// ---- Public re-exports ----

pub use broker::{EventBroker, RoutingBroker};
pub use channels::{Channel, ChannelDef, ChannelFeed, ChannelId, SubscriberList, Subscription};
pub use dispatch::Dispatcher;
pub use error::{BrokerError, DispatchError};
pub use events::{CheckPhase, EngineEvent, EventKind, HostCheckData, ServiceCheckData};
pub use protocol::{Command, ControlStatus};
pub use transport::{ConnId, Transport, WriteOutcome};

// Optional: Unix domain socket deployment of the dispatcher.
// Enable with: `--features service`
#[cfg(feature = "service")]
pub mod service;
