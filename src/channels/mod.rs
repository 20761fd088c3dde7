//! Channels: named publish points with their subscriber lists.
//!
//! A [`Channel`] pairs an immutable identity (name, description, wanted
//! event kinds, a rendering [`ChannelFeed`]) with the one piece of mutable
//! state this crate manages: its [`SubscriberList`]. Channels are created at
//! startup from [`ChannelDef`]s and live until the registry is torn down.
//!
//! ## Contents
//! - [`Channel`], [`ChannelDef`], [`ChannelId`], [`ChannelFeed`]
//! - [`Subscription`], [`SubscriberList`] — newest-first subscriber order

mod channel;
mod subscription;

pub use channel::{Channel, ChannelDef, ChannelFeed, ChannelId};
pub use subscription::{SubscriberList, Subscription};
