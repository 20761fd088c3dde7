//! Reactor transport over Unix stream write halves.

use std::collections::HashMap;
use std::io;

use tokio::net::unix::OwnedWriteHalf;
use tokio_util::sync::CancellationToken;

use crate::transport::{ConnId, Transport, WriteOutcome};

struct ConnEntry {
    writer: OwnedWriteHalf,
    /// Stops the connection's reader task when the write side goes away.
    reader_stop: CancellationToken,
}

/// [`Transport`] implementation owning the write half of every live client
/// connection.
///
/// Writes are `try_write`: a full kernel buffer maps to
/// [`WriteOutcome::WouldBlock`]. Whatever the kernel accepts counts as
/// done; short writes are not retried, per the transport contract.
/// Closing drops the write half (which closes the socket once the reader
/// half is gone too) and cancels the reader task.
#[derive(Default)]
pub struct UnixTransport {
    conns: HashMap<ConnId, ConnEntry>,
}

impl UnixTransport {
    /// Creates an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.conns.len()
    }

    pub(crate) fn insert(
        &mut self,
        conn: ConnId,
        writer: OwnedWriteHalf,
        reader_stop: CancellationToken,
    ) {
        self.conns.insert(conn, ConnEntry { writer, reader_stop });
    }
}

impl Transport for UnixTransport {
    fn write(&mut self, conn: ConnId, payload: &[u8]) -> WriteOutcome {
        let Some(entry) = self.conns.get(&conn) else {
            return WriteOutcome::Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "unknown connection",
            ));
        };
        match entry.writer.try_write(payload) {
            Ok(_) => WriteOutcome::Done,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => WriteOutcome::WouldBlock,
            Err(err) => WriteOutcome::Err(err),
        }
    }

    fn close(&mut self, conn: ConnId) {
        if let Some(entry) = self.conns.remove(&conn) {
            entry.reader_stop.cancel();
        }
    }
}
