//! Message lifecycle: send, receive, edit, delete, search.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::models::{ChatId, Message, MessageId, MessageKind, UserId};
use crate::store::Store;

/// Upper bound on `search_messages` results.
const MAX_SEARCH_RESULTS: usize = 100;

impl Store {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Send a message from the local user into the selected chat.
    ///
    /// Fails with `InvalidArgument` when no chat is selected or the content
    /// is blank. The sender's own chat never gains unread count.
    pub fn send_message(
        &mut self,
        content: impl Into<String>,
        kind: MessageKind,
    ) -> Result<MessageId> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "message content must not be empty".into(),
            ));
        }
        let chat_id = self.selected.ok_or_else(|| {
            StoreError::InvalidArgument("no chat selected".into())
        })?;

        let id = self.append_message(chat_id, self.profile.id.clone(), content, kind, false);
        info!(msg = %id, chat = %chat_id, "message sent");
        Ok(id)
    }

    /// Append a message arriving from outside (a peer, or a simulated
    /// reply the caller schedules). Unlike [`send_message`] this targets an
    /// explicit chat: the unread counter is bumped by exactly 1 when the
    /// chat is not selected and the sender is not the local user, and the
    /// message lands already read when the chat is on screen.
    ///
    /// [`send_message`]: Store::send_message
    pub fn receive_message(
        &mut self,
        chat_id: ChatId,
        sender: UserId,
        content: impl Into<String>,
        kind: MessageKind,
    ) -> Result<MessageId> {
        if !self.chats.contains_key(&chat_id) {
            return Err(StoreError::NotFound);
        }
        let content = content.into();
        if content.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "message content must not be empty".into(),
            ));
        }

        let selected = self.selected == Some(chat_id);
        let own = sender == self.profile.id;
        let id = self.append_message(chat_id, sender, content, kind, selected);

        if !selected && !own {
            if let Some(chat) = self.chats.get_mut(&chat_id) {
                chat.unread_count += 1;
            }
        }

        debug!(msg = %id, chat = %chat_id, "message received");
        Ok(id)
    }

    fn append_message(
        &mut self,
        chat_id: ChatId,
        sender: UserId,
        content: String,
        kind: MessageKind,
        is_read: bool,
    ) -> MessageId {
        let message = Message {
            id: MessageId::new(),
            content,
            kind,
            sender,
            timestamp: Utc::now(),
            is_read,
            edited: false,
            edited_at: None,
            reply_to: None,
            reactions: BTreeMap::new(),
        };
        let id = message.id;
        self.messages.entry(chat_id).or_default().push(message);
        self.refresh_summary(chat_id);
        id
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// A chat's message list in append order, without crossing the read
    /// barrier (use [`select_chat`](Store::select_chat) for that).
    pub fn messages(&self, chat_id: ChatId) -> Result<&[Message]> {
        self.messages
            .get(&chat_id)
            .map(Vec::as_slice)
            .ok_or(StoreError::NotFound)
    }

    /// Case-insensitive substring search across all chats, newest first,
    /// capped at 100 results.
    pub fn search_messages(&self, query: &str) -> Vec<&Message> {
        let query = query.to_lowercase();
        let mut results: Vec<&Message> = self
            .messages
            .values()
            .flatten()
            .filter(|m| m.content.to_lowercase().contains(&query))
            .collect();
        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        results.truncate(MAX_SEARCH_RESULTS);
        results
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Replace a message's content, stamping it edited.
    ///
    /// Ownership policy (only editing your own messages) is the caller's to
    /// enforce; the store validates existence and content only. Timestamp,
    /// sender, and reactions are untouched.
    pub fn edit_message(&mut self, id: MessageId, new_content: impl Into<String>) -> Result<()> {
        let new_content = new_content.into();
        if new_content.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "message content must not be empty".into(),
            ));
        }

        let (chat_id, msg) = self.locate_message_mut(id).ok_or(StoreError::NotFound)?;
        msg.content = new_content;
        msg.edited = true;
        msg.edited_at = Some(Utc::now());

        // The cached last_message may be a copy of this message.
        self.refresh_summary(chat_id);
        debug!(msg = %id, "message edited");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Hard-delete a message. If it was the chat's `last_message` the cache
    /// is recomputed from the remaining list (or cleared).
    pub fn delete_message(&mut self, id: MessageId) -> Result<()> {
        let (chat_id, _) = self.locate_message(id).ok_or(StoreError::NotFound)?;
        if let Some(list) = self.messages.get_mut(&chat_id) {
            list.retain(|m| m.id != id);
        }
        self.refresh_summary(chat_id);
        info!(msg = %id, chat = %chat_id, "message deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn selected_store() -> (Store, ChatId) {
        let mut store = Store::new(User::default());
        let id = store.create_group("Team", [UserId::new("alice")]).unwrap();
        store.select_chat(id).unwrap();
        (store, id)
    }

    #[test]
    fn send_without_selection_is_invalid_argument() {
        let mut store = Store::new(User::default());
        let err = store.send_message("hi", MessageKind::Text).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    #[test]
    fn send_rejects_whitespace_content() {
        let (mut store, _) = selected_store();
        assert!(store.send_message("  \n ", MessageKind::Text).is_err());
    }

    #[test]
    fn send_updates_last_message_and_leaves_unread_alone() {
        let (mut store, id) = selected_store();
        let msg_id = store.send_message("hello", MessageKind::Text).unwrap();

        let chat = store.chat(id).unwrap();
        assert_eq!(chat.last_message.as_ref().unwrap().id, msg_id);
        assert_eq!(chat.unread_count, 0);
        assert_eq!(
            store.messages(id).unwrap().last().unwrap().sender,
            store.profile().id
        );
    }

    #[test]
    fn receive_into_unselected_chat_increments_unread() {
        let (mut store, selected) = selected_store();
        let other = store.create_group("Other", [UserId::new("bob")]).unwrap();

        store
            .receive_message(other, UserId::new("bob"), "ping", MessageKind::Text)
            .unwrap();

        assert_eq!(store.chat(other).unwrap().unread_count, 1);
        assert_eq!(store.chat(selected).unwrap().unread_count, 0);
    }

    #[test]
    fn receive_own_message_never_increments_unread() {
        let (mut store, _) = selected_store();
        let other = store.create_group("Other", []).unwrap();
        let me = store.profile().id.clone();

        store
            .receive_message(other, me, "from my own hand", MessageKind::Text)
            .unwrap();

        assert_eq!(store.chat(other).unwrap().unread_count, 0);
    }

    #[test]
    fn receive_into_selected_chat_lands_read() {
        let (mut store, id) = selected_store();
        store
            .receive_message(id, UserId::new("alice"), "hi", MessageKind::Text)
            .unwrap();

        let chat = store.chat(id).unwrap();
        assert_eq!(chat.unread_count, 0);
        assert!(store.messages(id).unwrap().last().unwrap().is_read);
    }

    #[test]
    fn unread_accumulates_then_read_barrier_clears() {
        // Scenario: chat unread=3, not selected; remote message -> 4;
        // select -> 0 and everything read.
        let mut store = Store::new(User::default());
        let chat = store.create_group("c2", [UserId::new("alice")]).unwrap();
        for text in ["one", "two", "three"] {
            store
                .receive_message(chat, UserId::new("alice"), text, MessageKind::Text)
                .unwrap();
        }
        assert_eq!(store.chat(chat).unwrap().unread_count, 3);

        store
            .receive_message(chat, UserId::new("alice"), "four", MessageKind::Text)
            .unwrap();
        assert_eq!(store.chat(chat).unwrap().unread_count, 4);

        store.select_chat(chat).unwrap();
        assert_eq!(store.chat(chat).unwrap().unread_count, 0);
        assert!(store.messages(chat).unwrap().iter().all(|m| m.is_read));
    }

    #[test]
    fn edit_preserves_timestamp_sender_reactions() {
        let (mut store, id) = selected_store();
        let msg_id = store.send_message("first draft", MessageKind::Text).unwrap();
        store
            .toggle_reaction(msg_id, "👍", UserId::new("alice"))
            .unwrap();
        let before = store.messages(id).unwrap()[0].clone();

        store.edit_message(msg_id, "final wording").unwrap();

        let after = &store.messages(id).unwrap()[0];
        assert_eq!(after.content, "final wording");
        assert!(after.edited);
        assert!(after.edited_at.is_some());
        assert_eq!(after.timestamp, before.timestamp);
        assert_eq!(after.sender, before.sender);
        assert_eq!(after.reactions, before.reactions);
    }

    #[test]
    fn edit_unknown_message_is_not_found() {
        let (mut store, _) = selected_store();
        let err = store.edit_message(MessageId::new(), "text").unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn edit_rejects_empty_content() {
        let (mut store, _) = selected_store();
        let msg_id = store.send_message("keep me", MessageKind::Text).unwrap();
        assert!(store.edit_message(msg_id, "").is_err());
    }

    #[test]
    fn delete_tail_recomputes_last_message() {
        // Scenario: messages [m1, m2]; delete m2 -> last_message == m1.
        let (mut store, id) = selected_store();
        let m1 = store.send_message("m1", MessageKind::Text).unwrap();
        let m2 = store.send_message("m2", MessageKind::Text).unwrap();
        assert_eq!(store.chat(id).unwrap().last_message.as_ref().unwrap().id, m2);

        store.delete_message(m2).unwrap();
        assert_eq!(store.chat(id).unwrap().last_message.as_ref().unwrap().id, m1);
    }

    #[test]
    fn delete_last_remaining_message_clears_cache() {
        let (mut store, id) = selected_store();
        let m1 = store.send_message("only one", MessageKind::Text).unwrap();
        store.delete_message(m1).unwrap();
        assert!(store.chat(id).unwrap().last_message.is_none());
        assert!(store.messages(id).unwrap().is_empty());
    }

    #[test]
    fn delete_unknown_message_is_not_found() {
        let (mut store, _) = selected_store();
        assert!(matches!(
            store.delete_message(MessageId::new()),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn last_message_tracks_maximum_timestamp_under_churn() {
        let (mut store, id) = selected_store();
        let mut ids = Vec::new();
        for text in ["a", "b", "c", "d"] {
            ids.push(store.send_message(text, MessageKind::Text).unwrap());
        }
        store.delete_message(ids[1]).unwrap();
        store.delete_message(ids[3]).unwrap();

        let expected = store
            .messages(id)
            .unwrap()
            .iter()
            .max_by_key(|m| m.timestamp)
            .unwrap()
            .id;
        assert_eq!(store.chat(id).unwrap().last_message.as_ref().unwrap().id, expected);
        assert_eq!(expected, ids[2]);
    }

    #[test]
    fn search_is_case_insensitive_and_newest_first() {
        let (mut store, _) = selected_store();
        store.send_message("Deploy plan", MessageKind::Text).unwrap();
        let other = store.create_group("Other", []).unwrap();
        store
            .receive_message(other, UserId::new("bob"), "deploy NOW", MessageKind::Text)
            .unwrap();
        store.send_message("lunch?", MessageKind::Text).unwrap();

        let hits = store.search_messages("deploy");
        assert_eq!(hits.len(), 2);
        assert!(hits[0].timestamp >= hits[1].timestamp);
    }
}
