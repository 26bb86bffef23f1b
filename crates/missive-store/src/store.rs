//! Central [`Store`] handle.
//!
//! The struct owns every collection for the session; the operations live in
//! per-concern modules (`chats`, `messages`, `reactions`, `notifications`,
//! `profile`) as `impl Store` blocks, mirroring how the presentation layer
//! groups its calls.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::models::{Chat, ChatId, Message, MessageId, Notification, User, UserId};

/// The conversation store. One per session, single logical writer.
///
/// All operations are synchronous and complete without suspension; callers
/// sharing the store across threads must serialise mutations behind a
/// [`SharedStore`] so derived views (chat ordering, unread totals) are read
/// from a consistent snapshot.
pub struct Store {
    pub(crate) chats: HashMap<ChatId, Chat>,
    /// Per-chat message lists in append order.
    pub(crate) messages: HashMap<ChatId, Vec<Message>>,
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) selected: Option<ChatId>,
    pub(crate) profile: User,
    /// Most-recent-first, bounded (see `notifications::MAX_NOTIFICATIONS`).
    pub(crate) notifications: VecDeque<Notification>,
}

/// A store behind a single-writer lock, for callers that fan out across
/// threads or tasks.
pub type SharedStore = Arc<Mutex<Store>>;

impl Store {
    /// Create an empty store for the given local user.
    pub fn new(profile: User) -> Self {
        let mut users = HashMap::new();
        users.insert(profile.id.clone(), profile.clone());
        Self {
            chats: HashMap::new(),
            messages: HashMap::new(),
            users,
            selected: None,
            profile,
            notifications: VecDeque::new(),
        }
    }

    /// Wrap the store for shared access.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// The local user's profile.
    pub fn profile(&self) -> &User {
        &self.profile
    }

    /// Look up a known user.
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Register a user seen this session. Overwrites nothing: the first
    /// record for an id wins, matching "never deleted, never churned".
    pub fn add_user(&mut self, user: User) {
        self.users.entry(user.id.clone()).or_insert(user);
    }

    /// The currently selected chat, if any.
    pub fn selected_chat(&self) -> Option<ChatId> {
        self.selected
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    /// Recompute a chat's cached summary after its message list changed:
    /// `last_message` becomes the message with the maximum timestamp (the
    /// latest appended one among equals) and `updated_at` is bumped.
    pub(crate) fn refresh_summary(&mut self, chat_id: ChatId) {
        let last = self
            .messages
            .get(&chat_id)
            .and_then(|list| list.iter().max_by_key(|m| m.timestamp))
            .cloned();
        if let Some(chat) = self.chats.get_mut(&chat_id) {
            chat.last_message = last;
            chat.updated_at = Utc::now();
        }
    }

    /// Find a message anywhere in the store, returning its owning chat id.
    pub(crate) fn locate_message(&self, id: MessageId) -> Option<(ChatId, &Message)> {
        self.messages.iter().find_map(|(chat_id, list)| {
            list.iter().find(|m| m.id == id).map(|m| (*chat_id, m))
        })
    }

    pub(crate) fn locate_message_mut(&mut self, id: MessageId) -> Option<(ChatId, &mut Message)> {
        self.messages.iter_mut().find_map(|(chat_id, list)| {
            list.iter_mut().find(|m| m.id == id).map(|m| (*chat_id, m))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_registers_local_user() {
        let store = Store::new(User::default());
        let local = store.profile().id.clone();
        assert!(store.user(&local).is_some());
        assert!(store.selected_chat().is_none());
    }

    #[test]
    fn add_user_first_record_wins() {
        let mut store = Store::new(User::default());
        let mut alice = User {
            id: UserId::new("alice"),
            name: "Alice".to_string(),
            ..User::default()
        };
        store.add_user(alice.clone());

        alice.name = "Impostor".to_string();
        store.add_user(alice);

        assert_eq!(store.user(&UserId::new("alice")).unwrap().name, "Alice");
    }
}
