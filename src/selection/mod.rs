pub mod anchors;
pub mod window;

use tracing::debug;

use crate::config::SelectionConfig;
use crate::document::Document;
use crate::types::context_window::{CharSpan, ContextWindow, MatchedRule};
use crate::types::question::Question;
pub use anchors::{AnchorTable, AnchorTableError, CompositeRule, ThemeRule};
pub use window::{slice_around, truncate_chars, window_bounds, WindowSpan};

/// Character budget used when none is configured.
pub const DEFAULT_MAX_CHARS: usize = 15_000;

/// Maps a question to a bounded excerpt of the document.
///
/// Selection is total: it never fails and degrades from the composite rule to
/// themed rules, then fallback anchors, then the head of the document.
#[derive(Debug, Clone)]
pub struct ContextSelector {
    table: AnchorTable,
    max_chars: usize,
}

impl Default for ContextSelector {
    fn default() -> Self {
        Self {
            table: AnchorTable::landon(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl ContextSelector {
    pub fn new(table: AnchorTable, max_chars: usize) -> Self {
        Self { table, max_chars }
    }

    /// Built-in table unless `anchors_path` names a JSON table.
    pub fn from_config(config: &SelectionConfig) -> Result<Self, AnchorTableError> {
        let table = match &config.anchors_path {
            Some(path) => AnchorTable::load(path)?,
            None => AnchorTable::landon(),
        };
        Ok(Self::new(table, config.max_chars))
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn table(&self) -> &AnchorTable {
        &self.table
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn select(&self, question: &str, document: &Document) -> ContextWindow {
        let question = Question::new(question);

        let window = if question.is_empty() {
            None
        } else {
            self.composite(&question, document)
                .or_else(|| self.themed(&question, document))
                .or_else(|| self.fallback(document))
        };
        let window = window.unwrap_or_else(|| self.head(document));

        debug_assert!(window.chars <= self.max_chars);
        debug!(
            rule = ?window.matched,
            chars = window.chars,
            max_chars = self.max_chars,
            "Context selected"
        );

        window
    }

    // Every anchor of the composite rule found in the document, stitched in
    // table order.
    fn composite(&self, question: &Question, document: &Document) -> Option<ContextWindow> {
        let rule = self.table.composite.as_ref()?;
        if !question.contains_any(&rule.keywords) {
            return None;
        }

        let span = WindowSpan {
            before: rule.before,
            after: rule.after,
        };
        let mut spans = Vec::new();
        let mut parts = Vec::new();
        let mut anchors = Vec::new();

        for anchor in &rule.anchors {
            let Some(index) = document.find(anchor) else {
                continue;
            };
            let (bounds, chunk) = slice_around(document, index, span);
            if !chunk.is_empty() {
                spans.push(bounds);
                parts.push(chunk);
                anchors.push(anchor.clone());
            }
        }

        if parts.is_empty() {
            return None;
        }

        let joined = parts.join(rule.separator.as_str());
        let text = truncate_chars(&joined, self.max_chars).to_string();

        Some(ContextWindow::new(
            text,
            spans,
            MatchedRule::Composite {
                name: rule.name.clone(),
                anchors,
            },
        ))
    }

    // Themes are tried in order; a theme whose keywords match but whose
    // anchors are all absent hands over to the next matching theme.
    fn themed(&self, question: &Question, document: &Document) -> Option<ContextWindow> {
        self.table
            .themes
            .iter()
            .filter(|theme| question.contains_any(&theme.keywords))
            .find_map(|theme| {
                let (anchor, index) = first_found(&theme.anchors, document)?;
                Some(self.window_at(
                    document,
                    index,
                    MatchedRule::Theme {
                        name: theme.name.clone(),
                        anchor: anchor.to_string(),
                    },
                ))
            })
    }

    fn fallback(&self, document: &Document) -> Option<ContextWindow> {
        let (anchor, index) = first_found(&self.table.fallback, document)?;
        Some(self.window_at(
            document,
            index,
            MatchedRule::Fallback {
                anchor: anchor.to_string(),
            },
        ))
    }

    fn head(&self, document: &Document) -> ContextWindow {
        let text = document.head(self.max_chars).to_string();
        let end = text.chars().count();
        ContextWindow::new(text, vec![CharSpan { start: 0, end }], MatchedRule::Head)
    }

    fn window_at(&self, document: &Document, index: usize, matched: MatchedRule) -> ContextWindow {
        let (bounds, text) = slice_around(document, index, WindowSpan::for_budget(self.max_chars));
        ContextWindow::new(text.to_string(), vec![bounds], matched)
    }
}

/// First anchor, in list order, that occurs anywhere in the document.
fn first_found<'a>(anchors: &'a [String], document: &Document) -> Option<(&'a str, usize)> {
    anchors
        .iter()
        .find_map(|anchor| document.find(anchor).map(|index| (anchor.as_str(), index)))
}

/// Select the context for `question` with the built-in rules and a budget of
/// `max_chars` characters.
pub fn select_context(question: &str, document: &Document, max_chars: usize) -> String {
    ContextSelector::default()
        .with_max_chars(max_chars)
        .select(question, document)
        .text
}
