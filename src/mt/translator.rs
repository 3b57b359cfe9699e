//! Machine Translation trait and utilities
//!
//! This module defines the `MachineTranslator` trait for provider abstraction,
//! so the translation pipeline can run against Google Translate, the mock
//! provider, or anything else that turns text in one language into another.
//!
//! # Example
//!
//! ```ignore
//! use magic_translate::mt::{MachineTranslator, GoogleTranslateProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!     let result = provider.translate("Hello Variable1!", "en", "fr").await?;
//!     println!("{}", result); // "Bonjour Variable1 !"
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use async_trait::async_trait;

/// Generic trait for machine translation providers
///
/// The pipeline calls `translate` strictly one entry at a time, so
/// implementations never see concurrent requests from this crate.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate one protected string
    ///
    /// `text` carries sentinels such as `Variable3` or `Emoji0`; providers
    /// pass them through as ordinary words. Locales are the codes the user
    /// gave on the command line (`en`, `pt-BR`) and may need normalizing.
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Human readable provider name, logged once per table
    fn provider_name(&self) -> &str;
}

/// Normalize a locale code by stripping region information
///
/// - `en-US` → `en`
/// - `zh-Hans` → `zh`
/// - `pt_BR` → `pt`
/// - `en` → `en` (unchanged)
pub fn normalize_locale(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}

/// Validate that a locale code is in acceptable format
///
/// Locale codes double as directory names for the table files, so only
/// ASCII alphanumerics, hyphens and underscores are accepted.
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}
