//! MessageStore - Ordered, id-addressable session transcript
//!
//! Messages are kept in insertion order for display, with a keyed index for
//! patch-by-id. Both structures are mutated together on every operation.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::message::{Message, MessageId, MessagePatch};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Message already present: {0}")]
    DuplicateId(MessageId),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The messages of one chat session.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    index: HashMap<MessageId, usize>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the end of the transcript.
    ///
    /// The caller supplies a unique identifier; an identifier already in the
    /// store is rejected and nothing changes.
    pub fn append(&mut self, message: Message) -> Result<()> {
        let id = message.id();
        if self.index.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        self.index.insert(id, self.messages.len());
        self.messages.push(message);
        Ok(())
    }

    /// Append `messages` in order as a single step.
    ///
    /// If any identifier is already in the store, or repeats within
    /// `messages`, nothing is appended.
    pub fn append_all<I>(&mut self, messages: I) -> Result<()>
    where
        I: IntoIterator<Item = Message>,
    {
        let messages: Vec<Message> = messages.into_iter().collect();
        let mut seen = HashSet::with_capacity(messages.len());
        for message in &messages {
            let id = message.id();
            if self.index.contains_key(&id) || !seen.insert(id) {
                return Err(StoreError::DuplicateId(id));
            }
        }
        for message in messages {
            self.index.insert(message.id(), self.messages.len());
            self.messages.push(message);
        }
        Ok(())
    }

    /// Merge `patch` into the message with `id`.
    ///
    /// Unknown identifiers (for instance ones discarded by [`clear`](Self::clear))
    /// are ignored: the message is not recreated. Returns whether a message
    /// was updated.
    pub fn patch(&mut self, id: MessageId, patch: MessagePatch) -> bool {
        match self.index.get(&id) {
            Some(&position) => {
                patch.apply_to(&mut self.messages[position]);
                true
            }
            None => {
                debug!("Dropping patch for unknown message {}", id);
                false
            }
        }
    }

    /// Discard every message.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.index.clear();
    }

    /// Messages in display order.
    pub fn list(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.index.get(&id).map(|&position| &self.messages[position])
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages still awaiting a response.
    pub fn loading_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_loading).count()
    }
}
