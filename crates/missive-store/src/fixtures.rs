//! Seed data for running the UI without a backend: a local user, two
//! direct chats, one group, and a little message history.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, Utc};

use crate::models::{
    Chat, ChatId, ChatKind, Message, MessageId, MessageKind, StatusKind, User, UserId, UserStatus,
};
use crate::store::Store;

fn status(kind: StatusKind, text: &str) -> UserStatus {
    UserStatus {
        kind,
        text: text.to_string(),
        emoji: None,
        expires_at: None,
    }
}

fn message(sender: &UserId, content: &str, minutes_ago: i64, is_read: bool) -> Message {
    Message {
        id: MessageId::new(),
        content: content.to_string(),
        kind: MessageKind::Text,
        sender: sender.clone(),
        timestamp: Utc::now() - Duration::minutes(minutes_ago),
        is_read,
        edited: false,
        edited_at: None,
        reply_to: None,
        reactions: BTreeMap::new(),
    }
}

fn react(msg: &mut Message, emoji: &str, users: &[&UserId]) {
    msg.reactions.insert(
        emoji.to_string(),
        users.iter().map(|u| (*u).clone()).collect::<BTreeSet<_>>(),
    );
}

impl Store {
    /// A store pre-populated with demo conversations.
    pub fn demo() -> Self {
        let me = UserId::new("current-user");
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        let mut store = Store::new(User {
            id: me.clone(),
            name: "You".to_string(),
            avatar: "avatars/you.png".to_string(),
            status: UserStatus::online(),
            bio: "Hey there! I am using Missive.".to_string(),
        });

        store.add_user(User {
            id: alice.clone(),
            name: "Alice Johnson".to_string(),
            avatar: "avatars/alice.png".to_string(),
            status: status(StatusKind::Online, "Available"),
            bio: "Love to travel and explore new places 🌍".to_string(),
        });
        store.add_user(User {
            id: bob.clone(),
            name: "Bob Smith".to_string(),
            avatar: "avatars/bob.png".to_string(),
            status: status(StatusKind::Busy, "In a meeting"),
            bio: "Software engineer and coffee enthusiast ☕".to_string(),
        });

        // Direct chat with Alice: two unread at the tail.
        let mut m2 = message(&me, "I'm doing great! Just finished a big project 🎉", 55, true);
        react(&mut m2, "🎉", &[&alice]);
        let alice_chat = store.seed_chat(
            "Alice Johnson",
            "avatars/alice.png",
            ChatKind::Direct,
            [me.clone(), alice.clone()],
            2,
            true,
            vec![
                message(&alice, "Hey! How are you doing today? 😊", 60, true),
                m2,
                message(&alice, "That's amazing! What kind of project was it?", 50, false),
                message(&alice, "Tell me everything!", 45, false),
            ],
        );

        // Direct chat with Bob: fully read.
        let mut coffee = message(&me, "Absolutely! 2 PM at the usual place?", 118, true);
        react(&mut coffee, "👍", &[&bob]);
        store.seed_chat(
            "Bob Smith",
            "avatars/bob.png",
            ChatKind::Direct,
            [me.clone(), bob.clone()],
            0,
            false,
            vec![
                message(&bob, "Are we still on for coffee tomorrow? ☕", 120, true),
                coffee,
                message(&bob, "Perfect! See you then 👋", 115, true),
            ],
        );

        // Group chat: one own message with a group reaction.
        let mut thanks = message(&me, "Thanks for all the help 🙏", 25, false);
        react(&mut thanks, "🙏", &[&alice, &bob]);
        store.seed_chat(
            "Team Updates",
            "avatars/team.png",
            ChatKind::Group,
            [me, alice.clone(), bob.clone()],
            1,
            true,
            vec![
                message(&alice, "Good morning team! 🌅", 30, true),
                message(&bob, "Ready for the big presentation today?", 28, true),
                thanks,
            ],
        );

        // Alice has started typing in her chat.
        let _ = store.set_typing(alice_chat, alice, true);

        store
    }

    fn seed_chat(
        &mut self,
        name: &str,
        avatar: &str,
        kind: ChatKind,
        participants: impl IntoIterator<Item = UserId>,
        unread: u32,
        pinned: bool,
        messages: Vec<Message>,
    ) -> ChatId {
        let now = Utc::now();
        let chat = Chat {
            id: ChatId::new(),
            name: name.to_string(),
            avatar: avatar.to_string(),
            kind,
            participants: participants.into_iter().collect(),
            last_message: None,
            unread_count: unread,
            pinned,
            muted: false,
            archived: false,
            typing: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        };
        let id = chat.id;
        self.add_chat(chat);
        self.messages.insert(id, messages);
        self.refresh_summary(id);
        id
    }
}
