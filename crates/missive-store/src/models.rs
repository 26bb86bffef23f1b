//! Domain model structs held by the [`Store`](crate::Store).
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the presentation layer (and so the profile can round-trip
//! through the settings blob).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// A user identity. Caller-assigned (fixture handles, directory ids); the
/// store never generates these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatId(pub Uuid);

impl ChatId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChatId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Presence kind shown next to a user's name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Online,
    Away,
    Busy,
    Invisible,
    Custom,
}

/// A user's current status line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStatus {
    pub kind: StatusKind,
    /// Free-text label ("Available", "In a meeting", ...).
    pub text: String,
    /// Optional emoji rendered before the label.
    pub emoji: Option<String>,
    /// Custom statuses may expire; presence of a past expiry is for the
    /// caller to act on, the store does not sweep statuses.
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserStatus {
    /// The default "Online / Available" status.
    pub fn online() -> Self {
        Self {
            kind: StatusKind::Online,
            text: "Available".to_string(),
            emoji: None,
            expires_at: None,
        }
    }
}

/// A known user identity. Never deleted during a session; only the local
/// user's entry is mutated (via the profile-update operation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Human-readable display name.
    pub name: String,
    /// Avatar reference (URL or asset key); opaque to the store.
    pub avatar: String,
    pub status: UserStatus,
    /// Short self-description shown on the profile card.
    pub bio: String,
}

impl Default for User {
    /// The placeholder local user used before any profile has been saved.
    fn default() -> Self {
        Self {
            id: UserId::new("local-user"),
            name: "You".to_string(),
            avatar: String::new(),
            status: UserStatus::online(),
            bio: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Conversation kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Direct,
    Group,
}

/// A conversation container.
///
/// `last_message` and `unread_count` are summary state the store keeps in
/// step with the message list: `last_message` is recomputed whenever the
/// list changes and is never stale, and `unread_count` is zeroed exactly
/// when the chat becomes the selected chat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    pub id: ChatId,
    pub name: String,
    pub avatar: String,
    pub kind: ChatKind,
    /// Participant ids; membership order is irrelevant.
    pub participants: BTreeSet<UserId>,
    /// Cached copy of the message with the latest timestamp in this chat,
    /// or `None` when the chat is empty.
    pub last_message: Option<Message>,
    pub unread_count: u32,
    pub pinned: bool,
    pub muted: bool,
    pub archived: bool,
    /// Ids of users currently composing. Expiry of stale entries is the
    /// caller's scheduled `set_typing(.., false)`.
    pub typing: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    /// Whether the typing indicator should show for this chat.
    pub fn anyone_typing(&self) -> bool {
        !self.typing.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// Payload kind of a message. Non-text kinds carry an opaque reference in
/// `content` (file name, media URL); the store does not interpret it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
    File,
    Voice,
}

/// A single chat message. Owned by exactly one chat and removed with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub kind: MessageKind,
    pub sender: UserId,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    pub edited: bool,
    pub edited_at: Option<DateTime<Utc>>,
    /// Message this one replies to, if any.
    pub reply_to: Option<MessageId>,
    /// Emoji symbol -> set of users who applied it. The per-emoji count is
    /// always the set's cardinality and is never stored separately.
    pub reactions: BTreeMap<String, BTreeSet<UserId>>,
}

impl Message {
    /// Whether `local` authored this message. Derived, never stored.
    pub fn is_own(&self, local: &UserId) -> bool {
        self.sender == *local
    }

    /// Number of users who applied `emoji`.
    pub fn reaction_count(&self, emoji: &str) -> usize {
        self.reactions.get(emoji).map_or(0, BTreeSet::len)
    }
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Message,
    Call,
    Mention,
    Reaction,
    System,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

/// An ephemeral event record for the notification center.
///
/// References to a chat or message are weak and for display only; a
/// notification never keeps either alive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    pub priority: Priority,
    pub expires_at: Option<DateTime<Utc>>,
    pub chat_id: Option<ChatId>,
    pub message_id: Option<MessageId>,
}

/// Fields of a [`Notification`] the caller supplies; id and timestamp are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub expires_at: Option<DateTime<Utc>>,
    pub chat_id: Option<ChatId>,
    pub message_id: Option<MessageId>,
}

impl NewNotification {
    /// A normal-priority notification with no expiry or references.
    pub fn simple(kind: NotificationKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
            priority: Priority::Normal,
            expires_at: None,
            chat_id: None,
            message_id: None,
        }
    }
}
