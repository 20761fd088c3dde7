//! Feed service configuration.

use std::path::PathBuf;

/// Settings for one [`FeedService`](crate::service::FeedService).
///
/// ## Field semantics
/// - `socket_path`: where the Unix domain socket is bound. A stale file at
///   that path is removed before binding; the file is removed again on
///   shutdown.
/// - `command_capacity`: size of the bounded queue between reader
///   tasks/producers and the dispatcher loop (min 1, clamped at bind).
///   Producers awaiting [`publish`](crate::service::FeedHandle::publish)
///   are backpressured while the queue is full.
/// - `max_request_len`: longest accepted control request line in bytes;
///   a connection sending more without a newline is dropped.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Filesystem path of the control socket.
    pub socket_path: PathBuf,

    /// Capacity of the command queue feeding the dispatcher loop.
    pub command_capacity: usize,

    /// Upper bound on one request line, in bytes.
    pub max_request_len: usize,
}

impl ServiceConfig {
    /// Creates a configuration with default queue and line limits.
    ///
    /// Defaults: `command_capacity = 256`, `max_request_len = 4096`.
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            command_capacity: 256,
            max_request_len: 4096,
        }
    }

    /// Queue capacity clamped to a minimum of 1.
    pub(crate) fn command_capacity_clamped(&self) -> usize {
        self.command_capacity.max(1)
    }
}
