use serde::{Deserialize, Serialize};

/// One observed (name, email) attribution in history with its commit count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub commits: u64,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>, commits: u64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            commits,
        }
    }

    /// Key used by mailmap lookups: `"name|email"` with the email lowercased.
    pub fn mailmap_key(&self) -> String {
        format!("{}|{}", self.name, self.email.to_lowercase())
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
