//! Standard check-result feeds.
//!
//! The channels a monitoring engine ships out of the box: host and service
//! check results as line-oriented text. [`standard_channels`] returns the
//! definitions to hand to
//! [`Dispatcher::with_channels`](crate::Dispatcher::with_channels).
//!
//! Custom channels implement
//! [`ChannelFeed`](crate::ChannelFeed) themselves and can be registered
//! alongside these.

mod checks;

pub use checks::{standard_channels, HostCheckFeed, ServiceCheckFeed};
