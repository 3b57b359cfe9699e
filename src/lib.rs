//! Machine-translate localization tables without mangling what must not change
//!
//! Each new source string goes through three guards (emoji, allow-listed
//! markup tags, `:variables`), the protected text is sent to a
//! [`mt::MachineTranslator`], the guarded spans are restored, a
//! [`confirm::Confirmer`] gets the final say, and the result is merged into
//! the target-language table.
//!
//! # Workflow Example
//!
//! ```ignore
//! use magic_translate::{Config, TablePaths, TranslationPipeline, translate_table};
//! use magic_translate::mt::GoogleTranslateProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let provider = GoogleTranslateProvider::from_env()?;
//!     let mut pipeline = TranslationPipeline::new(&provider, &config.source_locale, "fr");
//!
//!     let paths = TablePaths::resolve(&config, "messages", "fr");
//!     let summary = translate_table(&paths, &mut pipeline, config.alignment_column).await?;
//!     println!("{} new translations", summary.translated);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod confirm;
pub mod error;
pub mod guard;
pub mod loader;
pub mod merge;
pub mod mt;
pub mod pipeline;
pub mod table;


// Re-export main types for convenient access
pub use config::Config;
pub use confirm::{AutoConfirm, Confirmer, Decision, InteractivePrompt};
pub use error::{Error, Result};
pub use guard::{CounterScope, ProtectedText, VariableCounter};
pub use loader::{load_table, render_table, save_table};
pub use merge::{MergeSummary, TablePaths, merge_tables, translate_table};
pub use pipeline::TranslationPipeline;
pub use table::{LocalizationTable, escape, unescape};
