//! Message module - Chat turn types
//!
//! Shared message types used across the system.

mod patch;
mod types;

pub use patch::MessagePatch;
pub use types::{Message, MessageId, Role};
