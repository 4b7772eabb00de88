//! ChatView - What each message shows, and which answer is being typed
//!
//! Only the most recent successful answer is ever typed, and only if it has
//! not finished typing before. Loading placeholders and error messages are
//! not answers, so a newer turn that is still pending or failed leaves the
//! reveal of the previous answer running. Once an answer has been typed it
//! is shown statically from then on.

use std::collections::HashSet;

use chat_core::{Message, MessageId};
use tracing::debug;

use crate::typing::{RevealRate, TypingAnimator, TypingFrame};

/// Shown in place of an answer that is still being fetched.
pub const THINKING_TEXT: &str = "Searching documents...";

/// How a message should be presented right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageDisplay<'a> {
    /// Awaiting the backend.
    Thinking,
    /// Partially revealed answer; citations are withheld until typing ends.
    Typing { shown: &'a str },
    /// Full content with its citations.
    Static {
        content: &'a str,
        sources: &'a [String],
    },
    /// Nothing to show (an assistant message with empty content).
    Empty,
}

/// A frame of the typed answer, tagged with the message it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewUpdate {
    pub id: MessageId,
    pub frame: TypingFrame,
}

#[derive(Debug)]
pub struct ChatView {
    animator: TypingAnimator,
    rate: RevealRate,
    typing_enabled: bool,
    animating: Option<MessageId>,
    typed: HashSet<MessageId>,
}

impl ChatView {
    pub fn new(rate: RevealRate, typing_enabled: bool) -> Self {
        Self {
            animator: TypingAnimator::new(),
            rate,
            typing_enabled,
            animating: None,
            typed: HashSet::new(),
        }
    }

    /// Reconcile with the current transcript.
    ///
    /// Starts typing the latest successful answer if it has not been typed
    /// yet. A reveal is only stopped when a newer answer takes its place or
    /// the answer is gone from the transcript; it is then shown statically.
    /// Returns the id of the message being typed, if any.
    pub fn sync(&mut self, messages: &[Message]) -> Option<MessageId> {
        let latest = messages.iter().rev().find(|m| is_answer(m));
        let target = latest.filter(|m| self.should_type(m));

        if let Some(current) = self.animating {
            if target.map(Message::id) != Some(current) {
                debug!("Stopping reveal of {}", current);
                self.animator.cancel();
                self.typed.insert(current);
                self.animating = None;
            }
        }

        if let Some(message) = target {
            if self.animator.animate(&message.content, self.rate) {
                debug!("Typing answer {} at {}", message.id(), self.rate);
            }
            self.animating = Some(message.id());
        }
        self.animating
    }

    fn should_type(&self, message: &Message) -> bool {
        self.typing_enabled && !self.typed.contains(&message.id())
    }

    /// Wait for the next frame of the answer being typed.
    pub async fn next_update(&mut self) -> Option<ViewUpdate> {
        let id = self.animating?;
        let frame = self.animator.next().await?;
        if frame == TypingFrame::Complete {
            self.typed.insert(id);
            self.animating = None;
            self.animator.cancel();
        }
        Some(ViewUpdate { id, frame })
    }

    pub fn is_typing(&self) -> bool {
        self.animating.is_some() && self.animator.is_active()
    }

    pub fn typing_message(&self) -> Option<MessageId> {
        self.animating
    }

    /// Presentation of `message` given the current typing state.
    pub fn display<'a>(&'a self, message: &'a Message) -> MessageDisplay<'a> {
        if message.is_loading {
            return MessageDisplay::Thinking;
        }
        if self.animating == Some(message.id()) {
            return MessageDisplay::Typing {
                shown: self.animator.displayed(),
            };
        }
        if message.content.is_empty() {
            return MessageDisplay::Empty;
        }
        MessageDisplay::Static {
            content: &message.content,
            sources: &message.sources,
        }
    }

    /// Forget everything shown so far and release the animator's timer.
    pub fn teardown(&mut self) {
        self.animator.cancel();
        self.animating = None;
        self.typed.clear();
    }
}

/// A settled, successful assistant answer.
fn is_answer(message: &Message) -> bool {
    message.is_assistant()
        && !message.is_loading
        && !message.content.is_empty()
        && message.use_typing_effect
}
