//! Dispatcher core: registry, activation, broadcast, cancellation.
//!
//! The only public type here is [`Dispatcher`], the single owner of every
//! channel and of the two collaborator seams (event broker, transport).
//! All mutation goes through `&mut self` on the one thread driving the
//! host's event loop; there is no locking because there is no concurrent
//! mutation.
//!
//! Internal modules:
//! - `dispatcher`: channel creation and lookup, subscription management,
//!   0↔1 activation edges, connection cancellation, teardown;
//! - `broadcast`: payload fan-out with the early-abort failure policy and
//!   feed-rendered delivery.

mod broadcast;
mod dispatcher;

pub use dispatcher::Dispatcher;
