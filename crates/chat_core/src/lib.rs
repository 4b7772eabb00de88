//! chat_core - Core types for the chat client
//!
//! This crate provides the foundational types used across all chat-related crates:
//! - `message` - Message, Role, MessageId and MessagePatch
//! - `store` - MessageStore, the ordered and id-addressable session transcript
//! - `config` - Client configuration (file + environment)

pub mod config;
pub mod message;
pub mod paths;
pub mod store;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use message::{Message, MessageId, MessagePatch, Role};
pub use store::{MessageStore, StoreError};
