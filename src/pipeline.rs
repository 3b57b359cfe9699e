//! Translation Pipeline: one table entry from source text to stored translation
//!
//! ```ignore
//! Stored source:  "Hello :name! 😀 <b>Welcome</b>"
//! Protected:      "Hello Variable1! Emoji0 Tag3WelcomeTag4"
//! Engine (fr):    "Bonjour Variable1! Emoji0 Tag3BienvenueTag4"
//! Restored:       "Bonjour :name! 😀 <b>Bienvenue</b>"
//! ```
//!
//! Entries already present in the target table short-circuit before any of
//! this happens, which is what makes re-running a merge idempotent.

use tracing::debug;

use crate::confirm::{AutoConfirm, Confirmer, Decision};
use crate::error::Result;
use crate::guard::{CounterScope, ProtectedText, VariableCounter};
use crate::mt::MachineTranslator;
use crate::table::{LocalizationTable, escape, unescape};

pub struct TranslationPipeline<'a> {
    translator: &'a dyn MachineTranslator,
    confirmer: Box<dyn Confirmer + 'a>,
    counter: VariableCounter,
    counter_scope: CounterScope,
    source_locale: String,
    target_locale: String,
}

impl<'a> TranslationPipeline<'a> {
    /// A pipeline that accepts every machine translation, counter scoped to the run
    pub fn new(
        translator: &'a dyn MachineTranslator,
        source_locale: &str,
        target_locale: &str,
    ) -> Self {
        TranslationPipeline {
            translator,
            confirmer: Box::new(AutoConfirm),
            counter: VariableCounter::new(),
            counter_scope: CounterScope::PerRun,
            source_locale: source_locale.to_string(),
            target_locale: target_locale.to_string(),
        }
    }

    pub fn with_confirmer(mut self, confirmer: impl Confirmer + 'a) -> Self {
        self.confirmer = Box::new(confirmer);
        self
    }

    pub fn with_counter_scope(mut self, scope: CounterScope) -> Self {
        self.counter_scope = scope;
        self
    }

    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    pub fn target_locale(&self) -> &str {
        &self.target_locale
    }

    pub fn translator_name(&self) -> &str {
        self.translator.provider_name()
    }

    /// Variable sentinels handed out so far in the current scope
    pub fn variables_issued(&self) -> usize {
        self.counter.issued()
    }

    /// Produce the stored target value for `key`
    ///
    /// `source_text` and the returned value are both in stored (escaped) form.
    /// If `target` already has `key`, its value is returned as-is without
    /// touching the engine or the confirmer.
    pub async fn translate_entry(
        &mut self,
        key: &str,
        source_text: &str,
        target: &LocalizationTable,
    ) -> Result<String> {
        if let Some(existing) = target.get(key) {
            debug!(key, "reusing existing translation");
            return Ok(existing.to_string());
        }

        let original = unescape(source_text);
        if self.counter_scope == CounterScope::PerEntry {
            self.counter.reset();
        }

        let protected = ProtectedText::protect(&original, &mut self.counter);
        debug!(
            key,
            sanitized = protected.text(),
            spans = protected.spans().count(),
            "protected source text"
        );

        let translated = self
            .translator
            .translate(protected.text(), &self.source_locale, &self.target_locale)
            .await?;
        let restored = protected.restore(&translated);
        debug!(key, translated = %translated, restored = %restored, "restored translation");

        let final_text = match self.confirmer.confirm(key, &original, &restored)? {
            Decision::Accept => restored,
            Decision::Replace(manual) => {
                debug!(key, "translation replaced by hand");
                manual
            }
        };

        Ok(escape(&final_text))
    }
}
