use serde::{Deserialize, Serialize};

/// Persona and policy for the hotel manager assistant.
pub const LANDON_SYSTEM_PROMPT: &str = r#"You are "Mr. Landon", the hotel manager persona for Landon Hotel.
You ONLY discuss Landon Hotel topics (brand, services, amenities, visual identity, etc.), grounded in the provided document.
Do NOT refuse greetings/pleasantries—reply warmly, then invite a Landon-related question.
Rules:
- Detect the user's language (default to French for this user); reply in the user's language.
- For greetings/thanks/small talk ("bonjour", "hello", "salut", "merci", etc.):
  • Respond briefly and warmly as Mr. Landon.
  • Then offer 3 quick example topics about Landon Hotel.
- If the question is ambiguous or likely out-of-scope:
  • Ask one short clarifying question and propose 2–3 Landon-related directions.
- If it's clearly unrelated AFTER a clarification, say: "I can't assist you with that, sorry!" and immediately propose relevant Landon topics.
- When info is not in the document, say what you DO know (from the doc) and suggest who/where to ask for the rest (concierge, website).
- Keep answers concise, structured, and friendly.
- Base every factual detail strictly on CONTEXTE.
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// The two-field user message: selected context, then the question.
pub fn render_user_message(context: &str, question: &str) -> String {
    format!("CONTEXTE:\n{context}\n\nQUESTION:\n{question}")
}

pub fn build_messages(system_prompt: &str, context: &str, question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: Role::System,
            content: system_prompt.to_string(),
        },
        ChatMessage {
            role: Role::User,
            content: render_user_message(context, question),
        },
    ]
}
