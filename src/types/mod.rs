pub mod context_window;
pub mod identifiers;
pub mod question;

pub use context_window::{CharSpan, ContextWindow, MatchedRule};
pub use identifiers::DocumentVersion;
pub use question::Question;
