/// A question as received, plus the lower-cased form rules are matched against.
///
/// Normalization rules:
/// - Lowercase (Unicode aware, so `É` matches `é`)
/// - No trimming, no tokenization: keywords are literal substrings
#[derive(Debug, Clone)]
pub struct Question {
    pub raw: String,
    pub normalized: String,
}

impl Question {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.to_lowercase();

        Self { raw, normalized }
    }

    /// Only the literal empty question; whitespace still goes through the rules.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn contains_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        keywords
            .iter()
            .any(|k| self.normalized.contains(k.as_ref()))
    }
}
