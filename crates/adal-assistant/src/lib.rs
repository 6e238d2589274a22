//! Assistant reply pipeline for the Adal chat widget.
//!
//! An [`Assistant`] first asks a hosted [`CompletionClient`] for a reply and,
//! when that is unconfigured or fails, answers from the local keyword table in
//! [`fallback`]. Either way the caller gets a [`Reply`] with usage metadata.

pub mod assistant;
pub mod completion;
pub mod fallback;
pub mod history;
pub mod prompt;

pub use assistant::{Assistant, AssistantConfig, Reply, ReplySource};
pub use completion::{AnthropicClient, AnthropicConfig, Completion, CompletionClient, CompletionError};
pub use fallback::Topic;
pub use prompt::SYSTEM_PROMPT;
