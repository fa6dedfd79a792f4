//! Conversation history with scratch turns.
//!
//! Intermediate turns, such as the refined search query produced while
//! deciding how to ground an answer, are recorded with `scratch` set. They
//! stay in the history the model sees but are filtered out when the
//! conversation is rendered. Nothing is ever removed after the fact.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions or injected context.
    System,
    /// The person talking to the assistant.
    User,
    /// The assistant.
    Assistant,
}

/// A recorded chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sequential identifier assigned on push.
    pub id: u64,
    pub role: Role,
    pub content: String,
    /// Hidden from rendered history when set.
    #[serde(default)]
    pub scratch: bool,
}

/// Chat history with fixed capacity.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    /// Messages in insertion order (oldest first).
    messages: VecDeque<ChatMessage>,
    max_messages: usize,
    next_id: u64,
}

impl ChatHistory {
    /// Create a new history with the given capacity.
    #[must_use]
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(max_messages),
            max_messages: max_messages.max(1),
            next_id: 1,
        }
    }

    /// Record a message, evicting the oldest if at capacity. Returns its id.
    pub fn push(&mut self, role: Role, content: impl Into<String>, scratch: bool) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        if self.messages.len() >= self.max_messages {
            self.messages.pop_front();
        }
        self.messages.push_back(ChatMessage {
            id,
            role,
            content: content.into(),
            scratch,
        });
        id
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> u64 {
        self.push(Role::User, content, false)
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> u64 {
        self.push(Role::Assistant, content, false)
    }

    /// Record a turn that is part of the model's working context only.
    pub fn push_scratch(&mut self, role: Role, content: impl Into<String>) -> u64 {
        self.push(role, content, true)
    }

    /// Messages to render, oldest first, with scratch turns filtered out.
    #[must_use]
    pub fn visible(&self) -> Vec<&ChatMessage> {
        self.messages.iter().filter(|m| !m.scratch).collect()
    }

    /// Every message, scratch turns included, oldest first.
    #[must_use]
    pub fn model_context(&self) -> Vec<&ChatMessage> {
        self.messages.iter().collect()
    }

    /// The most recent visible user message.
    #[must_use]
    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User && !m.scratch)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new(200)
    }
}
