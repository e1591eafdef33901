pub mod client;
pub mod prompt;
pub mod retry;
pub mod service;

pub use client::{GenerateError, Generator, OpenAiChatClient};
pub use prompt::{build_messages, render_user_message, ChatMessage, Role, LANDON_SYSTEM_PROMPT};
pub use retry::{RetryPolicy, RetryingGenerator};
pub use service::{Answer, AnsweringService};
