use std::sync::Arc;

use tracing::{info, instrument};

use super::client::{GenerateError, Generator};
use super::prompt::LANDON_SYSTEM_PROMPT;
use crate::document::Document;
use crate::selection::ContextSelector;
use crate::types::context_window::ContextWindow;

/// A model reply together with the context it was grounded on.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub context: ContextWindow,
}

/// Selects context for a question and asks the model.
///
/// Holds the document and rule table for the life of the process; both are
/// read-only, so one instance is shared by every request.
pub struct AnsweringService {
    document: Document,
    selector: ContextSelector,
    generator: Arc<dyn Generator>,
    system_prompt: String,
}

impl AnsweringService {
    pub fn new(document: Document, selector: ContextSelector, generator: Arc<dyn Generator>) -> Self {
        Self {
            document,
            selector,
            generator,
            system_prompt: LANDON_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selector(&self) -> &ContextSelector {
        &self.selector
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn context_for(&self, question: &str) -> ContextWindow {
        self.selector.select(question, &self.document)
    }

    #[instrument(skip(self), fields(question_chars = question.chars().count()))]
    pub async fn answer(&self, question: &str) -> Result<Answer, GenerateError> {
        let context = self.context_for(question);

        let text = self
            .generator
            .generate(&self.system_prompt, &context.text, question)
            .await?;

        info!(
            rule = ?context.matched,
            context_chars = context.chars,
            answer_chars = text.chars().count(),
            "Question answered"
        );

        Ok(Answer { text, context })
    }
}
