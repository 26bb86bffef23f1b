//! Emoji reactions on messages.
//!
//! A reaction is pure set membership: emoji symbol -> set of user ids.
//! The displayed count is the set's cardinality, so membership and count
//! cannot drift apart.

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{MessageId, UserId};
use crate::store::Store;

impl Store {
    /// Toggle `user_id`'s reaction `emoji` on a message. Returns `true`
    /// when the reaction was added, `false` when removed. Applying the same
    /// toggle twice restores the original reaction set; an emoji whose set
    /// becomes empty is dropped entirely.
    pub fn toggle_reaction(
        &mut self,
        message_id: MessageId,
        emoji: &str,
        user_id: UserId,
    ) -> Result<bool> {
        let (chat_id, msg) = self
            .locate_message_mut(message_id)
            .ok_or(StoreError::NotFound)?;

        let users = msg.reactions.entry(emoji.to_string()).or_default();
        let added = if users.contains(&user_id) {
            users.remove(&user_id);
            false
        } else {
            users.insert(user_id);
            true
        };
        if users.is_empty() {
            msg.reactions.remove(emoji);
        }

        // The chat's cached last_message may be a copy of this message.
        self.refresh_summary(chat_id);
        debug!(msg = %message_id, emoji, added, "reaction toggled");
        Ok(added)
    }
}
