use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Canonical side of a mailmap line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailmapEntry {
    pub canonical_name: String,
    pub canonical_email: String,
}

/// Parsed mailmap keyed by `"<alias name>|<alias email>"`, or `"|<alias email>"`
/// when the line gives no alias name. Keys keep file order; a later line for
/// the same key replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct Mailmap {
    entries: Vec<(String, MailmapEntry)>,
    index: HashMap<String, usize>,
}

impl Mailmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(alias_name: Option<&str>, alias_email: &str) -> String {
        format!("{}|{}", alias_name.unwrap_or(""), alias_email.to_lowercase())
    }

    pub fn insert(&mut self, key: String, entry: MailmapEntry) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = entry,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, entry));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&MailmapEntry> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Name-qualified entry first, then the email-only entry.
    pub fn resolve(&self, name: &str, email: &str) -> Option<&MailmapEntry> {
        self.get(&Self::key(Some(name), email))
            .or_else(|| self.get(&Self::key(None, email)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MailmapEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
