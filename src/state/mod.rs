//! Application state module.
//!
//! Replaces implicit reactive state with an explicit struct owned by the
//! daemon, loaded at startup and persisted on mutation.

pub mod app;
pub mod feed;

// Re-export commonly used types
pub use app::{AppState, GenerationTicket, StateSnapshot};
pub use feed::Feed;
