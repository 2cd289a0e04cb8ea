use std::collections::HashMap;

/// Single-value header map with case-insensitive names.
///
/// Header names are stored lower-cased, and lookups lower-case the requested
/// name, so `get("Cookie")` and `get("cookie")` resolve to the same entry.
/// Inserting an existing name replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMap {
    entries: HashMap<String, String>,
}

/// Multi-value header map with case-insensitive names.
///
/// Like [`HeaderMap`], but each name maps to an ordered list of values.
/// Appending to an existing name preserves the order in which values arrived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderValuesMap {
    entries: HashMap<String, Vec<String>>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Sets a header value, replacing any previous value for the name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Retrieves a header value by name (case-insensitive).
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(lower-cased name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl HeaderValuesMap {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Appends a value to the list for the given name (case-insensitive).
    pub fn append(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .entry(name.as_ref().to_ascii_lowercase())
            .or_default()
            .push(value.into());
    }

    /// Replaces the whole value list for the given name.
    pub fn insert_all(&mut self, name: impl AsRef<str>, values: Vec<String>) {
        self.entries
            .insert(name.as_ref().to_ascii_lowercase(), values);
    }

    /// Retrieves the ordered value list for a name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
