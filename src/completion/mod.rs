//! Completion service access.
//!
//! Provides the [`CompletionClient`] seam used by the playlist pipeline and
//! its HTTP implementation.

pub mod client;

// Re-export commonly used types
pub use client::{CompletionClient, HttpCompletionClient};
