//! Mock Machine Translator for testing
//!
//! A deterministic, API-free translator for exercising the pipeline without
//! API keys or network access. It also counts calls, so tests can assert that
//! reused entries never reach the engine.
//!
//! # Example
//!
//! ```ignore
//! use magic_translate::mt::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "en", "fr").await.unwrap();
//!     assert_eq!(result, "hello_fr");
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "hello" → "hello_fr"
    /// Leaves sentinel tokens untouched
    Suffix,

    /// Use predefined mappings for realistic translations
    /// (text, target_locale) → translation, falling back to Suffix
    Mappings(HashMap<(String, String), String>),

    /// Reverse the order of whitespace-separated words
    /// (simulates word-order-changing languages)
    Reorder,

    /// Upper-case everything, sentinels included
    /// (simulates engines that re-case opaque tokens)
    Uppercase,

    /// Simulate API errors
    Error(String),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    calls: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Convenience constructor for `MockMode::Mappings`
    pub fn with_mappings<I, S>(target_locale: &str, mappings: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let map: HashMap<(String, String), String> = mappings
            .into_iter()
            .map(|(source, translated)| {
                let source: String = source.into();
                let translated: String = translated.into();
                ((source, target_locale.to_string()), translated)
            })
            .collect();
        Self::new(MockMode::Mappings(map))
    }

    /// Number of `translate` calls made so far (shared between clones)
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Apply translation logic based on the mode
    fn apply_translation(&self, text: &str, _source: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Reorder => {
                let words: Vec<&str> = text.split_whitespace().rev().collect();
                Ok(words.join(" "))
            }
            MockMode::Uppercase => Ok(text.to_uppercase()),
            MockMode::Error(msg) => Err(MtError::TranslationError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_translation(text, source_locale, target_locale)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
