//! Chat selection, ordering, flags, and typing bookkeeping.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{Chat, ChatId, ChatKind, Message, UserId};
use crate::store::Store;

impl Store {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a pre-built chat (fixtures, a newly accepted invite).
    pub fn add_chat(&mut self, chat: Chat) {
        self.messages.entry(chat.id).or_default();
        self.chats.insert(chat.id, chat);
    }

    /// Create a new empty group chat. The local user is always a member.
    pub fn create_group(
        &mut self,
        name: impl Into<String>,
        participants: impl IntoIterator<Item = UserId>,
    ) -> Result<ChatId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "group name must not be empty".into(),
            ));
        }

        let mut members: BTreeSet<UserId> = participants.into_iter().collect();
        members.insert(self.profile.id.clone());

        let now = Utc::now();
        let chat = Chat {
            id: ChatId::new(),
            name,
            avatar: String::new(),
            kind: ChatKind::Group,
            participants: members,
            last_message: None,
            unread_count: 0,
            pinned: false,
            muted: false,
            archived: false,
            typing: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        };

        let id = chat.id;
        debug!(chat = %id, "group created");
        self.add_chat(chat);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single chat.
    pub fn chat(&self, id: ChatId) -> Result<&Chat> {
        self.chats.get(&id).ok_or(StoreError::NotFound)
    }

    /// All chats in display order: pinned first, each group by descending
    /// `updated_at`, ties broken by id. Recomputed on every call; never
    /// cached, since `updated_at` changes on every message.
    pub fn list_chats(&self) -> Vec<&Chat> {
        let mut chats: Vec<&Chat> = self.chats.values().collect();
        chats.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then(b.updated_at.cmp(&a.updated_at))
                .then(a.id.cmp(&b.id))
        });
        chats
    }

    /// Sum of unread counters across all chats.
    pub fn unread_total(&self) -> u32 {
        self.chats.values().map(|c| c.unread_count).sum()
    }

    // ------------------------------------------------------------------
    // Selection (read barrier)
    // ------------------------------------------------------------------

    /// Select a chat and cross its read barrier: the unread counter drops
    /// to zero and every message in the chat is marked read. Re-selecting
    /// an already-read chat is a no-op on message state. Returns the chat's
    /// current message list.
    pub fn select_chat(&mut self, chat_id: ChatId) -> Result<&[Message]> {
        if !self.chats.contains_key(&chat_id) {
            return Err(StoreError::NotFound);
        }

        self.selected = Some(chat_id);

        if let Some(chat) = self.chats.get_mut(&chat_id) {
            chat.unread_count = 0;
        }
        let list = self.messages.entry(chat_id).or_default();
        for msg in list.iter_mut() {
            msg.is_read = true;
        }

        debug!(chat = %chat_id, "chat selected");
        Ok(self.messages.get(&chat_id).map(Vec::as_slice).unwrap_or(&[]))
    }

    // ------------------------------------------------------------------
    // Flags
    // ------------------------------------------------------------------

    /// Toggle the pinned flag. Returns the new value.
    pub fn toggle_pinned(&mut self, chat_id: ChatId) -> Result<bool> {
        let chat = self.chats.get_mut(&chat_id).ok_or(StoreError::NotFound)?;
        chat.pinned = !chat.pinned;
        Ok(chat.pinned)
    }

    /// Toggle the muted flag. Returns the new value.
    pub fn toggle_muted(&mut self, chat_id: ChatId) -> Result<bool> {
        let chat = self.chats.get_mut(&chat_id).ok_or(StoreError::NotFound)?;
        chat.muted = !chat.muted;
        Ok(chat.muted)
    }

    /// Toggle the archived flag. Returns the new value.
    pub fn toggle_archived(&mut self, chat_id: ChatId) -> Result<bool> {
        let chat = self.chats.get_mut(&chat_id).ok_or(StoreError::NotFound)?;
        chat.archived = !chat.archived;
        Ok(chat.archived)
    }

    // ------------------------------------------------------------------
    // Typing
    // ------------------------------------------------------------------

    /// Add or remove `user_id` from the chat's typing set. The store holds
    /// no timers; a stale flag is cleared by the caller scheduling a
    /// `set_typing(.., false)`.
    pub fn set_typing(&mut self, chat_id: ChatId, user_id: UserId, is_typing: bool) -> Result<()> {
        let chat = self.chats.get_mut(&chat_id).ok_or(StoreError::NotFound)?;
        if is_typing {
            chat.typing.insert(user_id);
        } else {
            chat.typing.remove(&user_id);
        }
        Ok(())
    }
}
