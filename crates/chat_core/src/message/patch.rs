use serde::{Deserialize, Serialize};

use super::types::Message;

/// A partial update to a message. `None` fields are left untouched.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MessagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_loading: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_typing_effect: Option<bool>,
}

impl MessagePatch {
    /// Terminal patch for a successful answer: revealed once by typing.
    pub fn answer(content: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            content: Some(content.into()),
            sources: Some(sources),
            is_loading: Some(false),
            use_typing_effect: Some(true),
        }
    }

    /// Terminal patch for a failed request: shown immediately, no citations.
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            sources: Some(Vec::new()),
            is_loading: Some(false),
            use_typing_effect: Some(false),
        }
    }

    /// Merge the present fields into `message`.
    pub fn apply_to(self, message: &mut Message) {
        if let Some(content) = self.content {
            message.content = content;
        }
        if let Some(sources) = self.sources {
            message.sources = sources;
        }
        if let Some(is_loading) = self.is_loading {
            message.is_loading = is_loading;
        }
        if let Some(use_typing_effect) = self.use_typing_effect {
            message.use_typing_effect = use_typing_effect;
        }
    }
}
