//! # Transport seam: non-blocking writes to subscriber connections.
//!
//! The dispatcher never touches sockets. It talks to the I/O reactor that
//! owns them through [`Transport`], a synchronous trait with exactly the two
//! operations the core needs: a non-blocking write and a close request.
//!
//! ## Rules
//! - `write` must not block. A transport whose buffer is full reports
//!   [`WriteOutcome::WouldBlock`]; the broadcast engine branches on it
//!   instead of retrying.
//! - Short writes are **not** reported: a transport that accepted any prefix
//!   of the payload returns [`WriteOutcome::Done`]. The feed is best-effort
//!   telemetry; nobody retransmits the tail.
//! - `close` is a request, not a guarantee of immediate teardown. The
//!   dispatcher calls it only from the global subscriber canceller and at
//!   shutdown, and never writes to a connection again after requesting its
//!   close.

use std::fmt;
use std::io;

/// Opaque handle for one client connection.
///
/// Minted by whatever owns the sockets (the control server / reactor) and
/// used by the core as the subscription cancellation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnId(u64);

impl ConnId {
    /// Wraps a raw connection number.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw connection number.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of one non-blocking write attempt.
#[derive(Debug)]
pub enum WriteOutcome {
    /// The payload was accepted, fully or partially (see module docs).
    Done,
    /// The transport buffer is full right now. Not an error.
    WouldBlock,
    /// The connection is unusable; the subscriber should be cancelled.
    Err(io::Error),
}

/// Reactor-side collaborator owning the subscriber sockets.
pub trait Transport {
    /// Attempts to write `payload` to `conn` without blocking.
    fn write(&mut self, conn: ConnId, payload: &[u8]) -> WriteOutcome;

    /// Requests that `conn` be torn down.
    ///
    /// Must tolerate unknown or already-closed handles.
    fn close(&mut self, conn: ConnId);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, conn: ConnId, payload: &[u8]) -> WriteOutcome {
        (**self).write(conn, payload)
    }

    fn close(&mut self, conn: ConnId) {
        (**self).close(conn)
    }
}
