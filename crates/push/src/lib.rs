//! Push channel for live job and shop updates.
//!
//! Provides typed message parsing, the WebSocket transport with join-room
//! announcement, exponential-backoff reconnection, and a channel task that
//! forwards typed [`events::PushEvent`]s to any number of subscribers.

pub mod channel;
pub mod client;
pub mod events;
pub mod messages;
pub mod reconnect;

pub use channel::PushChannel;
pub use client::{PushClient, PushClientError};
pub use events::PushEvent;
