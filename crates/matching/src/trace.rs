use std::fmt;
use std::str::FromStr;

use authormap_store::Identity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchReason {
    ExactEmail,
    SameLocalPart,
    GithubNoreplyUsername,
    GithubNoreplyMatch,
    SimilarNameSameDomain,
    SimilarName,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactEmail => "exact-email",
            Self::SameLocalPart => "same-local-part",
            Self::GithubNoreplyUsername => "github-noreply-username",
            Self::GithubNoreplyMatch => "github-noreply-match",
            Self::SimilarNameSameDomain => "similar-name-same-domain",
            Self::SimilarName => "similar-name",
        }
    }

    /// Whether the reason came from comparing email addresses.
    pub fn is_email_based(&self) -> bool {
        matches!(
            self,
            Self::ExactEmail
                | Self::SameLocalPart
                | Self::GithubNoreplyUsername
                | Self::GithubNoreplyMatch
        )
    }
}

impl FromStr for MatchReason {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "exact-email" => Ok(Self::ExactEmail),
            "same-local-part" => Ok(Self::SameLocalPart),
            "github-noreply-username" => Ok(Self::GithubNoreplyUsername),
            "github-noreply-match" => Ok(Self::GithubNoreplyMatch),
            "similar-name-same-domain" => Ok(Self::SimilarNameSameDomain),
            "similar-name" => Ok(Self::SimilarName),
            _ => Err(format!("unknown match reason: {value}")),
        }
    }
}

const NAME_MISMATCH_SUFFIX: &str = "-name-mismatch";

/// A match reason plus the discount flag, serialized as one tag such as
/// `exact-email` or `exact-email-name-mismatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ReasonTag {
    pub reason: MatchReason,
    pub name_mismatch: bool,
}

impl ReasonTag {
    pub fn new(reason: MatchReason) -> Self {
        Self {
            reason,
            name_mismatch: false,
        }
    }

    pub fn with_name_mismatch(self) -> Self {
        Self {
            name_mismatch: true,
            ..self
        }
    }
}

impl fmt::Display for ReasonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason.as_str())?;
        if self.name_mismatch {
            f.write_str(NAME_MISMATCH_SUFFIX)?;
        }
        Ok(())
    }
}

impl FromStr for ReasonTag {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.strip_suffix(NAME_MISMATCH_SUFFIX) {
            Some(base) => Ok(Self::new(base.parse()?).with_name_mismatch()),
            None => Ok(Self::new(value.parse()?)),
        }
    }
}

impl From<ReasonTag> for String {
    fn from(tag: ReasonTag) -> Self {
        tag.to_string()
    }
}

impl TryFrom<String> for ReasonTag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// What one pair rule left behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: String,
    pub fired: bool,
    pub confidence: f64,
    pub reason: Option<ReasonTag>,
}

/// Why an alias was merged: the pair score against the cluster member it was
/// matched with (normally the seed), with the per-rule trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasMatch {
    pub matched_email: String,
    pub alias: Identity,
    pub confidence: f64,
    pub reason: ReasonTag,
    pub rules: Vec<RuleOutcome>,
}
