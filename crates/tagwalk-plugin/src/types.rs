//! Commit type vocabulary.

/// Maps commit type keys (`feat`, `fix`, ...) to section titles and names the
/// keys that call for a minor bump.
///
/// Several keys may share a title (`doc` and `docs` both render as `Docs`).
/// Tables are plain values: conventions receive one at construction and
/// never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeTable {
    entries: Vec<(String, String)>,
    minor: Vec<String>,
}

impl TypeTable {
    /// Creates a table from `(key, title)` pairs, with no minor types.
    #[must_use]
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, title)| (key.into(), title.into()))
                .collect(),
            minor: Vec::new(),
        }
    }

    /// Replaces the minor-type keys.
    #[must_use]
    pub fn with_minor_types<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.minor = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the type entries, keeping the minor-type keys.
    #[must_use]
    pub fn with_types<I, K, V>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            minor: self.minor,
            ..Self::new(entries)
        }
    }

    /// Returns the title for a key.
    #[must_use]
    pub fn title(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, title)| title.as_str())
    }

    /// Returns the keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Returns the distinct titles in table order.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = Vec::new();
        for (_, title) in &self.entries {
            if !titles.contains(&title.as_str()) {
                titles.push(title);
            }
        }
        titles
    }

    /// Returns the minor-type keys.
    #[must_use]
    pub fn minor_types(&self) -> &[String] {
        &self.minor
    }

    /// Returns true if `title` is the title of a minor-type key.
    #[must_use]
    pub fn is_minor(&self, title: &str) -> bool {
        !title.is_empty()
            && self
                .minor
                .iter()
                .any(|key| self.title(key) == Some(title))
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a regex alternation matching any key, longest keys first.
    #[must_use]
    pub fn alternation(&self) -> String {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keys.iter()
            .map(|key| regex::escape(key))
            .collect::<Vec<_>>()
            .join("|")
    }
}
