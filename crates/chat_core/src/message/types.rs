//! Message - One turn of a chat session
//!
//! A user message is complete when created. An assistant message starts as an
//! empty loading placeholder and is patched once with its answer or error text.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque message identifier. Freshly generated identifiers are never reused.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who authored a message.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Assistant => f.write_str("assistant"),
        }
    }
}

/// A single chat turn.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    id: MessageId,
    role: Role,
    /// Question text, answer text, or error text.
    pub content: String,
    /// Citation labels, in the order the backend returned them.
    pub sources: Vec<String>,
    /// True only while an assistant placeholder awaits its response.
    pub is_loading: bool,
    /// Whether the content should be revealed incrementally once.
    pub use_typing_effect: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a user message with the given (already trimmed) text.
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
            is_loading: false,
            use_typing_effect: false,
            created_at: Utc::now(),
        }
    }

    /// Create an empty assistant placeholder awaiting its response.
    pub fn assistant_placeholder(id: MessageId) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: String::new(),
            sources: Vec::new(),
            is_loading: true,
            use_typing_effect: false,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}
