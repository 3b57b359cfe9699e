//! Token Vault: the span-protection mechanism shared by every guard.
//!
//! A guard only knows how to *find* its spans and how to *number* them. The
//! vault does the rest: it walks the span list left to right, asks the guard
//! for a sentinel index per occurrence, and rebuilds the string once.
//!
//! ```ignore
//! Source:      "Hello :name!"
//! Protected:   "Hello Variable1!"           mapping: Variable1 → ":name"
//! Translated:  "Bonjour VARIABLE1 !"
//! Restored:    "Bonjour :name !"
//! ```
//!
//! Restoration tolerates engines that re-case opaque tokens (`EMOJI0`,
//! `variable1`). A lowercased or mixed-case prefix only counts at a word
//! boundary, so a translated word such as `Montag3` is left alone. The index
//! is always read as the whole digit run.
//!
//! Two rules keep a protect/restore round trip lossless:
//!
//! - a sentinel followed by a digit or `_` in the source gets a `_`
//!   separator, which restore consumes (`<i>0` becomes `Tag1_0`)
//! - source text that already looks like a sentinel of the guard's kind is
//!   protected as well, under a fresh index

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Written between a sentinel and a following digit or underscore
const SEPARATOR: char = '_';

fn build_sentinel_regex(prefix: &str) -> Regex {
    let exact = regex::escape(prefix);
    let upper = regex::escape(&prefix.to_uppercase());
    Regex::new(&format!(r"(?:\b(?i:{exact})|{exact}|{upper})([0-9]+)({SEPARATOR}?)"))
        .expect("sentinel pattern is valid")
}

static EMOJI_SENTINEL: LazyLock<Regex> = LazyLock::new(|| build_sentinel_regex("Emoji"));
static TAG_SENTINEL: LazyLock<Regex> = LazyLock::new(|| build_sentinel_regex("Tag"));
static VARIABLE_SENTINEL: LazyLock<Regex> = LazyLock::new(|| build_sentinel_regex("Variable"));

/// The kind of substring a guard protects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Emoji,
    Tag,
    Variable,
}

impl SpanKind {
    /// Word used in front of every sentinel of this kind
    pub fn prefix(self) -> &'static str {
        match self {
            SpanKind::Emoji => "Emoji",
            SpanKind::Tag => "Tag",
            SpanKind::Variable => "Variable",
        }
    }

    /// Matches anything restore would treat as a sentinel of this kind
    ///
    /// Group 1 is the index, group 2 the optional separator.
    fn sentinel_regex(self) -> &'static Regex {
        match self {
            SpanKind::Emoji => &*EMOJI_SENTINEL,
            SpanKind::Tag => &*TAG_SENTINEL,
            SpanKind::Variable => &*VARIABLE_SENTINEL,
        }
    }
}

/// A translation-safe placeholder token, rendered as `Prefix<N>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sentinel {
    pub kind: SpanKind,
    pub index: usize,
}

impl Sentinel {
    pub fn new(kind: SpanKind, index: usize) -> Self {
        Sentinel { kind, index }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.index)
    }
}

/// A substring that must survive translation unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub kind: SpanKind,
    /// The literal text that was taken out of the string
    pub literal: String,
    pub sentinel: Sentinel,
}

/// Detection and numbering policy for one span kind
pub trait Guard {
    fn kind(&self) -> SpanKind;

    /// Byte ranges of every span in `text`, left to right, non-overlapping
    fn find_spans(&self, text: &str) -> Vec<Range<usize>>;

    /// Sentinel index for the `occurrence`-th span (0-based) whose text is `literal`
    fn assign(&mut self, occurrence: usize, literal: &str) -> usize;
}

/// Per-string, per-guard record of sentinel → original text
///
/// Entries are unique by sentinel and kept in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelMapping {
    kind: SpanKind,
    spans: Vec<ProtectedSpan>,
}

impl SentinelMapping {
    pub fn new(kind: SpanKind) -> Self {
        SentinelMapping {
            kind,
            spans: Vec::new(),
        }
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn spans(&self) -> &[ProtectedSpan] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Original text recorded for a sentinel index
    pub fn original(&self, index: usize) -> Option<&str> {
        self.spans
            .iter()
            .find(|span| span.sentinel.index == index)
            .map(|span| span.literal.as_str())
    }

    fn record(&mut self, sentinel: Sentinel, literal: &str) {
        if self.spans.iter().any(|span| span.sentinel == sentinel) {
            return;
        }
        self.spans.push(ProtectedSpan {
            kind: self.kind,
            literal: literal.to_string(),
            sentinel,
        });
    }

    /// Put every recorded original back in place of its sentinel
    ///
    /// Sentinels that the engine dropped are simply absent from the output;
    /// text that merely looks like a sentinel of an unknown index is kept.
    pub fn restore(&self, text: &str) -> String {
        if self.spans.is_empty() {
            return text.to_string();
        }

        self.kind
            .sentinel_regex()
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.original(index))
                    .unwrap_or(&caps[0])
                    .to_string()
            })
            .into_owned()
    }
}

/// Source text of `kind` that restore would mistake for a sentinel
fn look_alikes(kind: SpanKind, text: &str) -> Vec<Range<usize>> {
    kind.sentinel_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(whole.start()..caps.get(1)?.end())
        })
        .collect()
}

/// Replace every span the guard finds with its sentinel
///
/// The output is built in a single pass over the span list, so a sentinel
/// inserted for one span can never be rewritten by another. Look-alikes in
/// `text` are numbered after the highest index the guard handed out.
pub fn protect<G: Guard + ?Sized>(guard: &mut G, text: &str) -> (String, SentinelMapping) {
    let kind = guard.kind();
    let mut mapping = SentinelMapping::new(kind);
    let spans = guard.find_spans(text);
    if spans.is_empty() {
        return (text.to_string(), mapping);
    }

    let mut planned: Vec<(Range<usize>, Sentinel)> = spans
        .into_iter()
        .enumerate()
        .map(|(occurrence, range)| {
            let index = guard.assign(occurrence, &text[range.clone()]);
            (range, Sentinel::new(kind, index))
        })
        .collect();

    let mut next_index = planned
        .iter()
        .map(|(_, sentinel)| sentinel.index + 1)
        .max()
        .unwrap_or(0);
    for range in look_alikes(kind, text) {
        let overlaps = planned
            .iter()
            .any(|(span, _)| span.start < range.end && range.start < span.end);
        if !overlaps {
            planned.push((range, Sentinel::new(kind, next_index)));
            next_index += 1;
        }
    }
    planned.sort_by_key(|(range, _)| range.start);

    let mut sanitized = String::with_capacity(text.len());
    let mut cursor = 0;
    for (range, sentinel) in planned {
        debug_assert!(range.start >= cursor, "spans must be sorted and disjoint");
        let literal = &text[range.clone()];

        sanitized.push_str(&text[cursor..range.start]);
        sanitized.push_str(&sentinel.to_string());
        if text[range.end..].starts_with(|c: char| c.is_ascii_digit() || c == SEPARATOR) {
            sanitized.push(SEPARATOR);
        }
        mapping.record(sentinel, literal);
        cursor = range.end;
    }
    sanitized.push_str(&text[cursor..]);

    (sanitized, mapping)
}

/// Inverse of [`protect`] for a single mapping
pub fn restore(text: &str, mapping: &SentinelMapping) -> String {
    mapping.restore(text)
}
