//! Token counting module - Approximate token estimation
//!
//! The count is the number of whitespace-delimited segments in the text. It
//! is a rough stand-in for an LLM tokenizer, not a match for any particular
//! BPE encoding, and it stays dependency-free so results are reproducible.
//!
//! Usage:
//! ```ignore
//! use crate::core::tokenizer::{count_tokens, TokenCounter, WhitespaceCounter};
//!
//! assert_eq!(count_tokens("a  b\tc\nd"), 4);
//! assert_eq!(WhitespaceCounter.count("x y"), 2);
//! ```

/// Strategy for turning text into a token count.
pub trait TokenCounter {
    fn count(&self, text: &str) -> usize;
}

/// Whitespace-split counting (the default strategy).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhitespaceCounter;

impl TokenCounter for WhitespaceCounter {
    fn count(&self, text: &str) -> usize {
        count_tokens(text)
    }
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> usize,
{
    fn count(&self, text: &str) -> usize {
        self(text)
    }
}

/// Count whitespace-delimited segments.
///
/// Runs of any Unicode whitespace (space, tab, newline, form feed, NBSP, ...)
/// count as one delimiter, and leading/trailing whitespace produces no empty
/// segments.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_tokens_empty() {
        assert_eq!(count_tokens(""), 0);
        assert_eq!(count_tokens(" \t\n\r\n  "), 0);
    }

    #[test]
    fn test_count_tokens_collapses_runs() {
        assert_eq!(count_tokens("a  b\tc\nd"), 4);
    }

    #[test]
    fn test_count_tokens_ignores_edges() {
        assert_eq!(count_tokens("\n\n  hello world  \n"), 2);
    }

    #[test]
    fn test_count_tokens_code_is_not_split_on_symbols() {
        assert_eq!(count_tokens("print(1)"), 1);
        assert_eq!(count_tokens("fn main() { println!(\"hi\"); }"), 6);
    }

    #[test]
    fn test_count_tokens_unicode_whitespace() {
        // NBSP and ideographic space are whitespace too
        assert_eq!(count_tokens("a\u{00A0}b\u{3000}c"), 3);
        assert_eq!(count_tokens("你好 世界"), 2);
    }

    #[test]
    fn test_whitespace_counter_strategy() {
        assert_eq!(WhitespaceCounter.count("x y"), 2);
    }

    #[test]
    fn test_closure_strategy() {
        let bytes = |text: &str| text.len();
        assert_eq!(bytes.count("abc"), 3);
    }
}
