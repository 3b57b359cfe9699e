/// Span guards: keep emoji, markup tags and `:variables` out of the engine's hands
///
/// Three guards run in a fixed order over a source string, each replacing
/// its spans with sentinels that a translation engine leaves alone:
///
/// 1. **Emoji Guard** - `😀` becomes `Emoji0`
/// 2. **Tag Guard** - `<b>` becomes `Tag3` (one sentinel per allow-listed tag)
/// 3. **Variable Guard** - `:name` becomes `Variable1`
///
/// Restoration undoes them in reverse: variables, then tags, then emoji. Each
/// guard only ever saw the output of the guards before it, so unwinding in
/// reverse hands every mapping exactly the text it produced.
///
/// # Example
///
/// ```ignore
/// use magic_translate::guard::{ProtectedText, VariableCounter};
///
/// let mut counter = VariableCounter::new();
/// let protected = ProtectedText::protect("Hello :name! 😀 <b>Welcome</b>", &mut counter);
/// assert_eq!(protected.text(), "Hello Variable1! Emoji0 Tag3WelcomeTag4");
///
/// let restored = protected.restore("Bonjour Variable1! Emoji0 Tag3BienvenueTag4");
/// assert_eq!(restored, "Bonjour :name! 😀 <b>Bienvenue</b>");
/// ```
pub mod emoji;
pub mod tag;
pub mod variable;
pub mod vault;

pub use emoji::{EmojiGuard, detect_emoji};
pub use tag::{ALLOWED_TAGS, TagGuard};
pub use variable::{CounterScope, VariableCounter, VariableGuard};
pub use vault::{Guard, ProtectedSpan, Sentinel, SentinelMapping, SpanKind, protect, restore};

/// A string with all three span kinds swapped for sentinels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedText {
    text: String,
    emoji: SentinelMapping,
    tags: SentinelMapping,
    variables: SentinelMapping,
}

impl ProtectedText {
    /// Run the Emoji, Tag and Variable guards, in that order
    pub fn protect(source: &str, counter: &mut VariableCounter) -> Self {
        let (text, emoji) = protect(&mut EmojiGuard::new(), source);
        let (text, tags) = protect(&mut TagGuard::new(), &text);
        let (text, variables) = protect(&mut VariableGuard::new(counter), &text);

        ProtectedText {
            text,
            emoji,
            tags,
            variables,
        }
    }

    /// The sanitized text to hand to the translation engine
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mappings(&self) -> [&SentinelMapping; 3] {
        [&self.emoji, &self.tags, &self.variables]
    }

    /// Every protected span, in guard order
    pub fn spans(&self) -> impl Iterator<Item = &ProtectedSpan> {
        self.mappings().into_iter().flat_map(|mapping| mapping.spans())
    }

    /// Put the protected spans back into a translation of [`Self::text`]
    pub fn restore(&self, translated: &str) -> String {
        let restored = self.variables.restore(translated);
        let restored = self.tags.restore(&restored);
        self.emoji.restore(&restored)
    }
}
