//! LLM integration module for the cows demo
//!
//! Everything the demo needs to talk to a language model:
//!
//! - **Generation**: the `TextGenerator` seam plus an HTTP client for
//!   OpenAI-compatible local servers
//! - **Prompting**: message construction from live tool metadata
//! - **Extraction**: recovering and validating a JSON tool call from
//!   free-form model output

pub mod extract;
pub mod generate;
pub mod prompt;

// Re-export main types
pub use extract::{extract_tool_call, ExtractError, ValidatedInvocation};
pub use generate::{GenerationOptions, HttpGenerator, Message, Role, TextGenerator};
pub use prompt::{
    follow_up_messages, initial_messages, system_prompt, FollowUpStyle, THEMES,
};
