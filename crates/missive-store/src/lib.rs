//! # missive-store
//!
//! In-memory conversation state for the Missive messenger.
//!
//! The crate exposes a single synchronous [`Store`] that owns every chat,
//! message list, notification, and the local user's profile for the session.
//! A presentation layer calls the typed operations (select a chat, send or
//! edit a message, toggle a reaction, mark read) and re-renders from the
//! derived views.  Nothing here touches the network or a clock beyond
//! timestamping: timer-driven behaviour such as typing expiry is the
//! caller's responsibility, scheduled as ordinary follow-up calls into the
//! store.

pub mod chats;
pub mod fixtures;
pub mod messages;
pub mod models;
pub mod notifications;
pub mod profile;
pub mod reactions;
pub mod store;

mod error;

pub use error::{Result, StoreError};
pub use models::*;
pub use notifications::MAX_NOTIFICATIONS;
pub use profile::ProfileUpdate;
pub use store::{SharedStore, Store};
