//! chat_session - Chat session orchestration
//!
//! Provides the submission controller that turns a question into a user
//! message, an assistant placeholder and one backend request, and patches the
//! placeholder when the request settles.

pub mod controller;
pub mod error_adapter;
pub mod session;

// Re-exports
pub use controller::{PendingRequest, QuerySubmissionController, SubmitRejection};
pub use error_adapter::{error_patch, error_text, FALLBACK_DETAIL};
pub use session::ChatSession;
