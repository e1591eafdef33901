use serde::{Deserialize, Serialize};

/// Half-open character range `[start, end)` into the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharSpan {
    pub start: usize,
    pub end: usize,
}

impl CharSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// Which rule produced a context window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MatchedRule {
    /// Several anchors stitched together (the typography rule).
    Composite { name: String, anchors: Vec<String> },
    /// A themed rule, with the anchor that won inside it.
    Theme { name: String, anchor: String },
    /// A generic fallback anchor.
    Fallback { anchor: String },
    /// Nothing matched: head of the document.
    Head,
}

/// The excerpt forwarded to the model for one question.
///
/// `spans` lists the source windows in document coordinates. For a composite
/// window they describe the stitched windows before truncation to the budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    /// We own the text because it leaves the process as part of the prompt.
    pub text: String,
    pub chars: usize,
    pub spans: Vec<CharSpan>,
    pub matched: MatchedRule,
}

impl ContextWindow {
    pub fn new(text: String, spans: Vec<CharSpan>, matched: MatchedRule) -> Self {
        let chars = text.chars().count();
        Self {
            text,
            chars,
            spans,
            matched,
        }
    }
}
