use std::{
    collections::{BTreeMap, BTreeSet, btree_map::Entry},
    ffi::OsString,
};

/// Immutable snapshot of the key/value configuration surface.
///
/// Entries are kept ordered by key so that everything derived from a source
/// (most importantly the compiled argument vector) is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSource {
    entries: BTreeMap<String, String>,
    /// Keys (lossily decoded) whose key or value was not valid UTF-8.
    invalid: BTreeSet<String>,
}

impl ParameterSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current process environment.
    pub fn from_env() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Builds a snapshot from raw OS strings. Entries whose key or value is
    /// not valid UTF-8 are left out of the snapshot but remembered by key, see
    /// [`ParameterSource::invalid_keys`].
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut source = Self::default();
        for (key, value) in vars {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    source.entries.insert(key, value);
                }
                (Ok(key), Err(_)) => {
                    source.invalid.insert(key);
                }
                (Err(key), _) => {
                    source.invalid.insert(key.to_string_lossy().into_owned());
                }
            }
        }
        source
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` was set but could not be decoded as UTF-8.
    pub fn is_invalid(&self, key: &str) -> bool {
        self.invalid.contains(key)
    }

    /// Keys dropped at capture because they were not valid UTF-8, in order.
    pub fn invalid_keys(&self) -> impl Iterator<Item = &str> {
        self.invalid.iter().map(String::as_str)
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Inserts `value` only when `key` is absent. Returns whether it was inserted.
    pub(crate) fn insert_if_absent(&mut self, key: String, value: &str) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                true
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            invalid: BTreeSet::new(),
        }
    }
}
