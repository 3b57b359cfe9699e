//! Tag Guard
//!
//! Protects a fixed allow-list of markup tags. Unlike the other guards, tags
//! are protected per *type*: every `<b>` in a string becomes the same
//! sentinel, `Tag3`, because `<b>` is the third entry of [`ALLOWED_TAGS`].

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::vault::{Guard, SpanKind};

/// Allow-listed tag literals; the sentinel ordinal is the 1-based position here
pub const ALLOWED_TAGS: [&str; 16] = [
    "<i>",
    "</i>",
    "<b>",
    "</b>",
    "<span>",
    "</span>",
    "<div>",
    "</div>",
    "<p>",
    "</p>",
    "<strong>",
    "</strong>",
    "<strike>",
    "</strike>",
    "<blockquote>",
    "</blockquote>",
];

static ANY_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// True when stripping tags would leave the text unchanged
pub fn has_no_markup(text: &str) -> bool {
    !ANY_TAG_REGEX.is_match(text)
}

/// 1-based allow-list position of a tag literal
pub fn tag_ordinal(tag: &str) -> Option<usize> {
    ALLOWED_TAGS
        .iter()
        .position(|allowed| *allowed == tag)
        .map(|position| position + 1)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TagGuard;

impl TagGuard {
    pub fn new() -> Self {
        TagGuard
    }
}

impl Guard for TagGuard {
    fn kind(&self) -> SpanKind {
        SpanKind::Tag
    }

    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        if has_no_markup(text) {
            return Vec::new();
        }

        let mut spans: Vec<Range<usize>> = ALLOWED_TAGS
            .iter()
            .flat_map(|tag| {
                text.match_indices(tag)
                    .map(|(start, matched)| start..start + matched.len())
            })
            .collect();
        spans.sort_by_key(|span| span.start);
        spans
    }

    fn assign(&mut self, _occurrence: usize, literal: &str) -> usize {
        // find_spans only yields allow-listed literals
        tag_ordinal(literal).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::vault::{protect, restore};

    #[test]
    fn test_allow_list_ordinals() {
        assert_eq!(tag_ordinal("<i>"), Some(1));
        assert_eq!(tag_ordinal("</b>"), Some(4));
        assert_eq!(tag_ordinal("</blockquote>"), Some(16));
        assert_eq!(tag_ordinal("<a>"), None);
    }

    #[test]
    fn test_plain_text_fast_path() {
        assert!(has_no_markup("No tags, just 2 < 3"));
        assert!(!has_no_markup("a <em>b</em>"));
        let (text, mapping) = protect(&mut TagGuard::new(), "Plain text");
        assert_eq!(text, "Plain text");
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_repeated_tag_shares_one_sentinel() {
        let (text, mapping) = protect(&mut TagGuard::new(), "<b>one</b> and <b>two</b>");
        assert_eq!(text, "Tag3oneTag4 and Tag3twoTag4");
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.original(3), Some("<b>"));
        assert_eq!(mapping.original(4), Some("</b>"));
    }

    #[test]
    fn test_nested_tags() {
        let (text, _) = protect(
            &mut TagGuard::new(),
            "<p><strong>Bold</strong> move</p>",
        );
        assert_eq!(text, "Tag9Tag11BoldTag12 moveTag10");
    }

    #[test]
    fn test_unlisted_tags_are_left_alone() {
        let source = "<a>link</a> and <em>emphasis</em> and <b class=\"x\">attr</b>";
        let (text, mapping) = protect(&mut TagGuard::new(), source);
        assert_eq!(
            text,
            "<a>link</a> and <em>emphasis</em> and <b class=\"x\">attrTag4"
        );
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let (text, _) = protect(&mut TagGuard::new(), "<B>loud</B>");
        assert_eq!(text, "<B>loud</B>");
    }

    #[test]
    fn test_roundtrip() {
        let source = "<div><i>Hi</i> <span>there</span></div><blockquote>q</blockquote>";
        let (text, mapping) = protect(&mut TagGuard::new(), source);
        assert!(!text.contains('<'));
        assert_eq!(restore(&text, &mapping), source);
    }
}
