// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Insertion-ordered mapping of parameter names to string values.
///
/// Order matters because template substitution walks parameters in the order they were
/// given, which keeps the substituted command line deterministic.
///
/// # Examples
/// ```
/// use pipewrap::utils::ParameterMap;
///
/// let mut params = ParameterMap::new();
/// params.insert("input", "a.txt");
/// params.insert("mode", "fast");
/// params.insert("input", "b.txt");
///
/// assert_eq!(params.get("input"), Some("b.txt"));
/// assert_eq!(params.keys().collect::<Vec<_>>(), vec!["input", "mode"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap(Vec<(String, String)>);

impl ParameterMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or overwrite a value. An existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParameterMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_position() {
        let mut params = ParameterMap::new();
        params.insert("a", "1");
        params.insert("b", "2");
        params.insert("a", "3");

        let entries: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }
}
