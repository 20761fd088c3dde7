//! # Broadcast engine: best-effort fan-out with early abort.
//!
//! A broadcast walks the channel's subscriber list (newest first) and
//! attempts one non-blocking write per subscription. It is **not** reliable
//! delivery, on purpose:
//!
//! ```text
//! write ──► Done        ──► next subscriber
//!       ──► WouldBlock  ──► stop the whole broadcast, report success
//!       ──► Err         ──► cancel that subscriber everywhere, close it,
//!                           stop the whole broadcast, report the loss
//! ```
//!
//! Both failure branches short-circuit the remaining fan-out: a saturated
//! subscriber sheds load for everyone behind it in the list, and a dead one
//! abandons the payload entirely. No per-subscriber retry, no queueing, no
//! partial-delivery accounting: the feed is low-latency telemetry, and a
//! client that must not miss events needs a stronger channel than this.
//!
//! [`Dispatcher::deliver`] is the producer-facing entry: it lets the
//! channel's feed render (or decline) an engine event, then broadcasts the
//! rendered payload.

use std::io;

use tracing::warn;

use crate::broker::EventBroker;
use crate::channels::ChannelId;
use crate::error::DispatchError;
use crate::events::EngineEvent;
use crate::transport::{ConnId, Transport, WriteOutcome};

use super::Dispatcher;

impl<B: EventBroker, T: Transport> Dispatcher<B, T> {
    /// Delivers `payload` to every subscriber of the channel, newest first,
    /// under the early-abort policy above.
    ///
    /// Returns `Ok` both on full delivery and on a would-block truncation;
    /// [`DispatchError::SubscriberLost`] when a subscriber had to be
    /// cancelled (the broadcast was abandoned at that point);
    /// [`DispatchError::UnknownChannel`] if `id` does not resolve (no side
    /// effect).
    pub fn broadcast(&mut self, id: ChannelId, payload: &[u8]) -> Result<(), DispatchError> {
        let idx = self.index_of(id)?;

        let mut lost: Option<(ConnId, io::Error)> = None;
        for sub in self.channels[idx].subscribers.iter() {
            match self.transport.write(sub.conn(), payload) {
                WriteOutcome::Done => {}
                WriteOutcome::WouldBlock => return Ok(()),
                WriteOutcome::Err(err) => {
                    lost = Some((sub.conn(), err));
                    break;
                }
            }
        }

        if let Some((conn, source)) = lost {
            warn!(%conn, error = %source, "dropping subscriber after write failure");
            self.cancel_subscriber(conn);
            return Err(DispatchError::SubscriberLost { conn, source });
        }
        Ok(())
    }

    /// Renders `event` through the channel's feed and broadcasts the result.
    ///
    /// Nothing happens when the channel has no subscribers or when the feed
    /// declines the event (foreign kind, uninteresting lifecycle phase).
    pub fn deliver(&mut self, id: ChannelId, event: &EngineEvent) -> Result<(), DispatchError> {
        let payload = {
            let idx = self.index_of(id)?;
            let chan = &self.channels[idx];
            if chan.subscribers.is_empty() {
                return Ok(());
            }
            match chan.feed.render(event) {
                Some(payload) => payload,
                None => return Ok(()),
            }
        };
        self.broadcast(id, payload.as_bytes())
    }
}
