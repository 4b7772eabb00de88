//! chat_render - Presentation logic for chat sessions
//!
//! - `typing` - TypingAnimator, a cancellable time-driven reveal of a fixed text
//! - `view` - ChatView, which decides what each message shows and which answer types
//! - `citations` - Text layout for answer citations

pub mod citations;
pub mod typing;
pub mod view;

pub use citations::format_citations;
pub use typing::{RevealRate, RevealRateError, TypingAnimator, TypingFrame};
pub use view::{ChatView, MessageDisplay, ViewUpdate, THINKING_TEXT};
