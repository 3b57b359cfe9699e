//! Emoji Guard
//!
//! Every extended grapheme cluster that the emoji database recognises is one
//! span, so ZWJ families, flags, keycaps and skin-tone variants travel as a
//! single unit. Sentinels are `Emoji0`, `Emoji1`, ... in detection order, one
//! per occurrence: the same emoji twice gets two sentinels.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use super::vault::{Guard, SpanKind};

/// Locate every emoji in `text` as `(matched text, byte offset)`
pub fn detect_emoji(text: &str) -> Vec<(&str, usize)> {
    text.grapheme_indices(true)
        .filter(|(_, grapheme)| is_emoji(grapheme))
        .map(|(offset, grapheme)| (grapheme, offset))
        .collect()
}

fn is_emoji(grapheme: &str) -> bool {
    // Plain ASCII digits, '#' and '*' are emoji bases only as keycap sequences
    if grapheme.is_ascii() {
        return false;
    }
    emojis::get(grapheme).is_some()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmojiGuard;

impl EmojiGuard {
    pub fn new() -> Self {
        EmojiGuard
    }
}

impl Guard for EmojiGuard {
    fn kind(&self) -> SpanKind {
        SpanKind::Emoji
    }

    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        detect_emoji(text)
            .into_iter()
            .map(|(emoji, offset)| offset..offset + emoji.len())
            .collect()
    }

    fn assign(&mut self, occurrence: usize, _literal: &str) -> usize {
        occurrence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::vault::{protect, restore};

    #[test]
    fn test_detects_nothing_in_plain_text() {
        assert!(detect_emoji("Hello, world! 123 #tag *bold*").is_empty());
        assert!(detect_emoji("Ça coûte 5 €").is_empty());
    }

    #[test]
    fn test_single_emoji() {
        let (text, mapping) = protect(&mut EmojiGuard::new(), "Hello 😀!");
        assert_eq!(text, "Hello Emoji0!");
        assert_eq!(mapping.original(0), Some("😀"));
    }

    #[test]
    fn test_adjacent_emoji_get_distinct_sentinels() {
        let (text, mapping) = protect(&mut EmojiGuard::new(), "🎉🚀");
        assert_eq!(text, "Emoji0Emoji1");
        assert_eq!(mapping.original(0), Some("🎉"));
        assert_eq!(mapping.original(1), Some("🚀"));
    }

    #[test]
    fn test_repeated_emoji_is_protected_per_occurrence() {
        let (text, mapping) = protect(&mut EmojiGuard::new(), "👍 yes 👍");
        assert_eq!(text, "Emoji0 yes Emoji1");
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.original(0), Some("👍"));
        assert_eq!(mapping.original(1), Some("👍"));
    }

    #[test]
    fn test_zwj_sequence_is_one_unit() {
        let family = "👨\u{200D}👩\u{200D}👧";
        let source = format!("The {} is here", family);
        let (text, mapping) = protect(&mut EmojiGuard::new(), &source);
        assert_eq!(text, "The Emoji0 is here");
        assert_eq!(mapping.original(0), Some(family));
    }

    #[test]
    fn test_roundtrip_mixed_text() {
        let source = "Good morning ☀️, time for ☕ and 🥐🥐";
        let (text, mapping) = protect(&mut EmojiGuard::new(), source);
        assert!(!text.contains('☕'));
        assert_eq!(restore(&text, &mapping), source);
    }

    #[test]
    fn test_detect_reports_offsets() {
        let found = detect_emoji("a😀b");
        assert_eq!(found, vec![("😀", 1)]);
    }
}
