//! Control protocol: the text command surface for subscription management.
//!
//! A shared control connection carries one command per line; the external
//! server owns framing and hands each line to
//! [`Dispatcher::handle_control`](crate::Dispatcher::handle_control), which
//! returns a [`ControlStatus`] for the server to report back.
//!
//! ## Wire grammar (case-sensitive, no newline inside a command)
//! ```text
//! ""                          usage text
//! "help"                      usage text
//! "list"                      one "<name padded to 15> <description>\n"
//!                             per channel, then a single NUL byte
//! "subscribe <channel>"       status 0 / 400
//! "subscribe <chan>:<fmt>"    status 0 / 400 (fmt stored verbatim)
//! "unsubscribe <channel>"     status 0 / 400 (a ":<fmt>" suffix is
//!                             tolerated and stripped before lookup)
//! anything else               status 400
//! ```

mod command;
mod handler;

pub use command::Command;
pub use handler::ControlStatus;
