use indexmap::IndexMap;
use indexmap::map::Iter;

/// One language's strings for one logical file, in key order
///
/// Values are kept in their stored (escaped) form, exactly as they appear
/// between quotes in the table file. Use [`unescape`] to get display text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizationTable(IndexMap<String, String>);

impl LocalizationTable {
    pub fn new() -> Self {
        LocalizationTable(IndexMap::new())
    }

    /// Insert or overwrite a stored value
    ///
    /// A new key goes to the end; an existing key keeps its position.
    pub fn with_entry(&mut self, key: &str, value: &str) -> &mut Self {
        self.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a LocalizationTable {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizationTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        LocalizationTable(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Backslash-escape quotes, backslashes and NUL for storage
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\'' | '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\0' => escaped.push_str("\\0"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reverse [`escape`]: drop one level of backslashes
///
/// `\0` becomes NUL, any other escaped character stands for itself and a
/// dangling backslash at the end is dropped.
pub fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => unescaped.push('\0'),
            Some(next) => unescaped.push(next),
            None => {}
        }
    }
    unescaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position_of_existing_key() {
        let mut table = LocalizationTable::new();
        table
            .with_entry("a", "1")
            .with_entry("b", "2")
            .with_entry("a", "3");
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(table.get("a"), Some("3"));
    }

    #[test]
    fn test_from_iterator_preserves_order() {
        let table: LocalizationTable = [("z", "last"), ("a", "first")].into_iter().collect();
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_escape_quotes_and_backslashes() {
        assert_eq!(escape(r#"It's "ok" \o/"#), r#"It\'s \"ok\" \\o/"#);
        assert_eq!(escape("nul\0byte"), "nul\\0byte");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        for text in [r#"It's "ok" \o/"#, "nul\0byte", "", "trailing\\", "😀 'x'"] {
            assert_eq!(unescape(&escape(text)), text);
        }
    }

    #[test]
    fn test_unescape_edge_cases() {
        assert_eq!(unescape(r"a\nb"), "anb");
        assert_eq!(unescape("dangling\\"), "dangling");
        assert_eq!(unescape(r"\\\'"), r"\'");
    }
}
