use crate::document::Document;
use crate::types::context_window::CharSpan;

/// Asymmetric margins around an anchor occurrence, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpan {
    pub before: usize,
    pub after: usize,
}

impl WindowSpan {
    /// Margins for single-anchor windows: a quarter of the budget before the
    /// anchor, half of it after. Together they never exceed the budget.
    pub fn for_budget(max_chars: usize) -> Self {
        Self {
            before: max_chars / 4,
            after: max_chars / 2,
        }
    }
}

/// `[max(0, index - before), min(len, index + after))`, clamped silently.
pub fn window_bounds(index: usize, len: usize, span: WindowSpan) -> CharSpan {
    let end = index.saturating_add(span.after).min(len);
    let start = index.saturating_sub(span.before).min(end);
    CharSpan { start, end }
}

/// Slice the window around a character index of `document`.
pub fn slice_around(document: &Document, index: usize, span: WindowSpan) -> (CharSpan, &str) {
    let bounds = window_bounds(index, document.char_len(), span);
    (bounds, document.slice_chars(bounds.start, bounds.end))
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_clamp_at_document_start() {
        let span = WindowSpan { before: 10, after: 5 };
        assert_eq!(window_bounds(0, 100, span), CharSpan { start: 0, end: 5 });
        assert_eq!(window_bounds(3, 100, span), CharSpan { start: 0, end: 8 });
    }

    #[test]
    fn bounds_clamp_at_document_end() {
        let span = WindowSpan { before: 10, after: 50 };
        assert_eq!(window_bounds(95, 100, span), CharSpan { start: 85, end: 100 });
    }

    #[test]
    fn budget_margins_fit_inside_budget() {
        for max_chars in [0, 1, 3, 4, 7, 15_000] {
            let span = WindowSpan::for_budget(max_chars);
            assert!(span.before + span.after <= max_chars);
        }
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("éèêë", 2), "éè");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
