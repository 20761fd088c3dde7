//! Error types used by the dispatcher core.
//!
//! Two failure surfaces exist:
//!
//! - [`DispatchError`] — errors on the broadcast/delivery path.
//! - [`BrokerError`] — a refused callback registration at the host broker.
//!
//! Malformed control requests are deliberately **not** errors: the protocol
//! handler reports them as a [`ControlStatus`](crate::ControlStatus) value and
//! the connection stays open. Likewise a transport that reports "would block"
//! is a first-class outcome, not an error (see
//! [`WriteOutcome`](crate::WriteOutcome)).

use std::io;

use thiserror::Error;

use crate::channels::ChannelId;
use crate::transport::ConnId;

/// # Errors produced by the broadcast/delivery path.
///
/// Neither variant is fatal to the process: an unknown channel has no side
/// effect at all, and a lost subscriber has already been removed from every
/// channel and had its transport closed by the time the error is returned.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The channel id did not resolve to a registered channel.
    #[error("unknown channel {0}")]
    UnknownChannel(ChannelId),

    /// A subscriber transport failed with a non-retryable write error.
    ///
    /// The offending connection has been cancelled on every channel and its
    /// transport close was requested; the in-progress broadcast was
    /// abandoned.
    #[error("subscriber on connection {conn} lost: {source}")]
    SubscriberLost {
        /// Connection whose write failed.
        conn: ConnId,
        /// The underlying transport error.
        #[source]
        source: io::Error,
    },
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use feedcast::{ChannelId, DispatchError};
    ///
    /// let err = DispatchError::UnknownChannel(ChannelId::from_index(3));
    /// assert_eq!(err.as_label(), "unknown_channel");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::UnknownChannel(_) => "unknown_channel",
            DispatchError::SubscriberLost { .. } => "subscriber_lost",
        }
    }
}

/// A callback registration refused by the host event broker.
///
/// Non-fatal by policy: the activation path logs the refusal, keeps the
/// channel active, and still attempts the channel's remaining event kinds.
#[derive(Error, Debug)]
#[error("event broker refused registration: {reason}")]
pub struct BrokerError {
    /// Broker-supplied description of the refusal.
    pub reason: String,
}

impl BrokerError {
    /// Creates a refusal with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
