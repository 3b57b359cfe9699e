//! Reading and writing localization table files
//!
//! Tables are PHP array literals, one entry per line:
//!
//! ```text
//! <?php
//! return [
//!     'greeting'                       => 'Hello :name!',
//! ];
//! ```
//!
//! Both quote styles are accepted on read. Values are normalised to the
//! canonical escaped form so that a table written by this crate reads back
//! to the same [`LocalizationTable`].

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::table::{LocalizationTable, escape, unescape};

/// Column that keys are right-padded to when a table is written
pub const DEFAULT_ALIGNMENT_COLUMN: usize = 30;

static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:'(?P<sk>(?:[^'\\]|\\.)*)'|"(?P<dk>(?:[^"\\]|\\.)*)")\s*=>\s*(?:'(?P<sv>(?:[^'\\]|\\.)*)'|"(?P<dv>(?:[^"\\]|\\.)*)")\s*,?$"#,
    )
    .expect("entry pattern is valid")
});

fn is_scaffolding(line: &str) -> bool {
    line.is_empty()
        || line == "<?php"
        || line == "];"
        || line.starts_with("//")
        || line.starts_with('#')
        || line.replace(char::is_whitespace, "") == "return["
}

/// Parse table file contents; `path` is only used in error messages
pub fn parse_table(content: &str, path: &Path) -> Result<LocalizationTable> {
    let mut table = LocalizationTable::new();

    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if is_scaffolding(line) {
            continue;
        }

        let caps = ENTRY_REGEX
            .captures(line)
            .ok_or_else(|| Error::MalformedTable {
                path: path.to_path_buf(),
                line: number + 1,
                message: format!("expected 'key' => 'value', found `{}`", line),
            })?;

        let key = caps
            .name("sk")
            .or_else(|| caps.name("dk"))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let value = caps
            .name("sv")
            .or_else(|| caps.name("dv"))
            .map(|m| m.as_str())
            .unwrap_or_default();

        table.insert(escape(&unescape(key)), escape(&unescape(value)));
    }

    Ok(table)
}

/// Load a table file
pub fn load_table(path: &Path) -> Result<LocalizationTable> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&content, path)
}

/// Load a table file, or an empty table if it does not exist yet
pub fn load_table_or_default(path: &Path) -> Result<LocalizationTable> {
    if path.exists() {
        load_table(path)
    } else {
        Ok(LocalizationTable::new())
    }
}

/// Render a table in file form, keys padded to `alignment_column`
pub fn render_table(table: &LocalizationTable, alignment_column: usize) -> String {
    let mut output = String::from("<?php\nreturn [\n");

    for (key, value) in table {
        let padding = " ".repeat(alignment_column.saturating_sub(key.len()));
        output.push_str(&format!("    '{}' {} => '{}',\n", key, padding, value));
    }

    output.push_str("];\n");
    output
}

/// Write a table file, creating the language directory if needed
pub fn save_table(path: &Path, table: &LocalizationTable, alignment_column: usize) -> Result<()> {
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, render_table(table, alignment_column)).map_err(write_error)
}
