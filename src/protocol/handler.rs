//! Control-command execution against the dispatcher.

use std::fmt::Write as _;

use crate::broker::EventBroker;
use crate::dispatch::Dispatcher;
use crate::transport::{ConnId, Transport};

use super::Command;

/// Usage block written for an empty or `help` request.
const USAGE: &str = "Manage subscriptions to live event channels.\n\
Valid commands:\n\
\x20 list                      list available channels\n\
\x20 subscribe <channel>       subscribe to a channel\n\
\x20 unsubscribe <channel>     unsubscribe from a channel\n";

/// Width the `list` command pads channel names to.
const LIST_NAME_WIDTH: usize = 15;

/// Status returned to the control server for every handled request.
///
/// The server frames it back to the client; the handler itself writes no
/// response body for subscribe/unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStatus {
    /// Request handled.
    Ok,
    /// Unparseable command or unknown channel name. No side effect; the
    /// connection stays open.
    BadRequest,
}

impl ControlStatus {
    /// Wire code: 0 for success, 400 for a malformed request.
    pub fn code(self) -> u16 {
        match self {
            ControlStatus::Ok => 0,
            ControlStatus::BadRequest => 400,
        }
    }

    /// True for [`ControlStatus::Ok`].
    pub fn is_ok(self) -> bool {
        matches!(self, ControlStatus::Ok)
    }
}

impl<B: EventBroker, T: Transport> Dispatcher<B, T> {
    /// Executes one control-protocol request line arriving on `conn`.
    ///
    /// State-free per request: the line is parsed, executed, and a status
    /// returned. `help` and `list` write their output (NUL-terminated)
    /// straight to the requesting connection through the transport seam;
    /// write outcomes of those replies are ignored, matching the
    /// best-effort posture of the feed itself.
    pub fn handle_control(&mut self, conn: ConnId, line: &str) -> ControlStatus {
        let Some(cmd) = Command::parse(line) else {
            return ControlStatus::BadRequest;
        };

        match cmd {
            Command::Help => {
                let mut reply = USAGE.as_bytes().to_vec();
                reply.push(0);
                let _ = self.transport.write(conn, &reply);
                ControlStatus::Ok
            }
            Command::List => {
                let reply = self.render_list();
                let _ = self.transport.write(conn, &reply);
                ControlStatus::Ok
            }
            Command::Subscribe { channel, format } => match self.channel_id(channel) {
                Some(id) => {
                    let _ = self.subscribe(conn, id, format.map(str::to_owned));
                    ControlStatus::Ok
                }
                None => ControlStatus::BadRequest,
            },
            Command::Unsubscribe { channel } => match self.channel_id(channel) {
                Some(id) => {
                    let _ = self.unsubscribe(conn, id);
                    ControlStatus::Ok
                }
                None => ControlStatus::BadRequest,
            },
        }
    }

    /// One line per channel in creation order, then a terminating NUL.
    fn render_list(&self) -> Vec<u8> {
        let mut out = String::new();
        for chan in &self.channels {
            let _ = writeln!(
                out,
                "{:<width$} {}",
                chan.name(),
                chan.description(),
                width = LIST_NAME_WIDTH
            );
        }
        let mut reply = out.into_bytes();
        reply.push(0);
        reply
    }
}
