//! # Unix domain socket feed service.
//!
//! A ready-made deployment of the dispatcher over a Unix domain socket:
//! the control server, the reactor transport, and a producer handle, wired
//! so that every stimulus reaches the dispatcher on one task.
//!
//! ## Architecture
//! ```text
//!            clients                               producers
//!         ┌───┬───┬───┐                         (host event loop)
//!         ▼   ▼   ▼   ▼                               │
//!   UnixListener   reader task per conn               │ FeedHandle::publish
//!         │          (line framing)                   ▼
//!         │               └────────► [ command queue ] ◄──── Disconnected
//!         ▼                                  │
//!   ┌─────────────────────────────────────────────────────┐
//!   │ FeedService::run  (single task, single owner)       │
//!   │   select! { shutdown | accept | queue }             │
//!   │     Dispatcher<RoutingBroker, UnixTransport>        │
//!   └─────────────────────────────────────────────────────┘
//!                        │ try_write / close
//!                        ▼
//!                 subscriber sockets (write halves)
//! ```
//!
//! ## Rules
//! - The dispatcher lives inside the run loop and is never shared: reader
//!   tasks only push parsed lines into the bounded command queue.
//! - Writes to subscribers use `try_write`; a full socket buffer surfaces
//!   as [`WriteOutcome::WouldBlock`](crate::WriteOutcome::WouldBlock) and
//!   triggers the broadcast engine's load-shedding branch.
//! - Client disconnect (EOF or read error) cancels the connection's
//!   subscriptions on every channel and closes its transport.
//! - Shutdown via [`FeedHandle::shutdown`] tears down the registry, closes
//!   every subscriber, and removes the socket file.

mod config;
mod server;
mod transport;

pub use config::ServiceConfig;
pub use server::{FeedHandle, FeedService, ServiceClosed};
pub use transport::UnixTransport;
