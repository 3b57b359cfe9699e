//! Table Merge: bring a target-language table up to date with its source
//!
//! Source keys are visited in source order. Keys the target already has keep
//! their value and position, new keys are appended, and keys only the target
//! knows about are carried through. The target file is written exactly once,
//! after every entry succeeded.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::loader::{load_table, load_table_or_default, save_table};
use crate::pipeline::TranslationPipeline;
use crate::table::LocalizationTable;

/// What a merge did, for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Entries sent through the pipeline
    pub translated: usize,
    /// Source keys whose target value was kept
    pub reused: usize,
    /// Target-only keys carried through untouched
    pub carried: usize,
}

/// Merge `source` into `target` through the pipeline
pub async fn merge_tables(
    source: &LocalizationTable,
    mut target: LocalizationTable,
    pipeline: &mut TranslationPipeline<'_>,
) -> Result<(LocalizationTable, MergeSummary)> {
    let mut summary = MergeSummary {
        carried: target
            .keys()
            .filter(|key| !source.contains_key(key))
            .count(),
        ..MergeSummary::default()
    };

    for (key, source_text) in source {
        if target.contains_key(key) {
            summary.reused += 1;
        } else {
            summary.translated += 1;
        }

        let value = pipeline.translate_entry(key, source_text, &target).await?;
        target.insert(key.clone(), value);
    }

    Ok((target, summary))
}

/// Source and target file locations for one `translate <file> <target>` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePaths {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl TablePaths {
    pub fn resolve(config: &Config, file: &str, target_locale: &str) -> Self {
        TablePaths {
            source: config.table_path(file, &config.source_locale),
            target: config.table_path(file, target_locale),
        }
    }
}

/// Load, merge and write one table
///
/// Fails with [`Error::SourceNotFound`] before reading anything else when the
/// source table is missing; the target file is never touched on failure.
pub async fn translate_table(
    paths: &TablePaths,
    pipeline: &mut TranslationPipeline<'_>,
    alignment_column: usize,
) -> Result<MergeSummary> {
    if !paths.source.is_file() {
        return Err(Error::SourceNotFound(paths.source.clone()));
    }

    let source = load_table(&paths.source)?;
    let target = load_table_or_default(&paths.target)?;
    info!(
        source = %paths.source.display(),
        target = %paths.target.display(),
        entries = source.len(),
        existing = target.len(),
        provider = pipeline.translator_name(),
        "translating table {} → {}",
        pipeline.source_locale(),
        pipeline.target_locale()
    );

    let (merged, summary) = merge_tables(&source, target, pipeline).await?;
    save_table(&paths.target, &merged, alignment_column)?;
    debug!(?summary, "table written");

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::{MockMode, MockTranslator};
    use pretty_assertions::assert_eq;

    fn table(entries: &[(&str, &str)]) -> LocalizationTable {
        entries.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_new_keys_follow_source_order() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let mut pipeline = TranslationPipeline::new(&mock, "en", "fr");
        let source = table(&[("zeta", "Z"), ("alpha", "A"), ("mid", "M")]);

        let (merged, summary) = merge_tables(&source, LocalizationTable::new(), &mut pipeline)
            .await
            .unwrap();

        let keys: Vec<&str> = merged.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(merged.get("alpha"), Some("A_fr"));
        assert_eq!(summary.translated, 3);
    }

    #[tokio::test]
    async fn test_existing_keys_untouched_and_extra_keys_carried() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let mut pipeline = TranslationPipeline::new(&mock, "en", "fr");
        let source = table(&[("a", "A"), ("b", "B"), ("c", "C")]);
        let target = table(&[("legacy", "Ancien"), ("b", "Bé")]);

        let (merged, summary) = merge_tables(&source, target, &mut pipeline).await.unwrap();

        assert_eq!(
            merged,
            table(&[("legacy", "Ancien"), ("b", "Bé"), ("a", "A_fr"), ("c", "C_fr")])
        );
        let keys: Vec<&str> = merged.keys().collect();
        assert_eq!(keys, vec!["legacy", "b", "a", "c"]);
        assert_eq!(
            summary,
            MergeSummary {
                translated: 2,
                reused: 1,
                carried: 1
            }
        );
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_merge_is_idempotent() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let source = table(&[("a", "A"), ("b", "B")]);

        let mut first = TranslationPipeline::new(&mock, "en", "fr");
        let (merged, _) = merge_tables(&source, LocalizationTable::new(), &mut first)
            .await
            .unwrap();
        let calls_after_first = mock.call_count();

        let mut second = TranslationPipeline::new(&mock, "en", "fr");
        let (again, summary) = merge_tables(&source, merged.clone(), &mut second)
            .await
            .unwrap();

        assert_eq!(again, merged);
        assert_eq!(summary.translated, 0);
        assert_eq!(mock.call_count(), calls_after_first);
    }

    #[tokio::test]
    async fn test_engine_failure_aborts_merge() {
        let mock = MockTranslator::new(MockMode::Error("down".to_string()));
        let mut pipeline = TranslationPipeline::new(&mock, "en", "fr");
        let source = table(&[("a", "A")]);

        let result = merge_tables(&source, LocalizationTable::new(), &mut pipeline).await;
        assert!(matches!(result, Err(Error::Translation(_))));
    }

    #[test]
    fn test_resolve_paths() {
        let config = Config {
            lang_root: PathBuf::from("resources/lang"),
            ..Config::default()
        };
        let paths = TablePaths::resolve(&config, "auth", "fr");
        assert_eq!(paths.source, PathBuf::from("resources/lang/en/auth.php"));
        assert_eq!(paths.target, PathBuf::from("resources/lang/fr/auth.php"));
    }
}
