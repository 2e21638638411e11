use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::email_local;
use crate::trace::{MatchReason, ReasonTag};

use super::{Pair, PairRule, PairScore};

/// Result of comparing two email addresses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmailMatchVerdict {
    #[serde(rename = "match")]
    pub matched: bool,
    pub confidence: f64,
    pub reason: Option<MatchReason>,
}

impl EmailMatchVerdict {
    fn matched(confidence: f64, reason: MatchReason) -> Self {
        Self {
            matched: true,
            confidence,
            reason: Some(reason),
        }
    }

    pub fn no_match() -> Self {
        Self {
            matched: false,
            confidence: 0.0,
            reason: None,
        }
    }
}

fn github_noreply() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:\d+\+)?([^@]+)@users\.noreply\.github\.com$").expect("valid regex")
    })
}

/// GitHub username embedded in a `[id+]user@users.noreply.github.com` address.
pub fn github_noreply_username(email: &str) -> Option<&str> {
    github_noreply()
        .captures(email)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Compare two emails, case-insensitively.
///
/// Rules, first hit wins: exact address (1.0), same local part longer than
/// three chars (0.8), both GitHub noreply with the same username (0.95), one
/// GitHub noreply whose username is the other's local part (0.7).
pub fn emails_match(e1: &str, e2: &str) -> EmailMatchVerdict {
    let a = e1.trim().to_lowercase();
    let b = e2.trim().to_lowercase();

    if a == b {
        return EmailMatchVerdict::matched(1.0, MatchReason::ExactEmail);
    }

    let local_a = email_local(&a);
    let local_b = email_local(&b);
    if local_a == local_b && local_a.chars().count() > 3 {
        return EmailMatchVerdict::matched(0.8, MatchReason::SameLocalPart);
    }

    match (github_noreply_username(&a), github_noreply_username(&b)) {
        (Some(ua), Some(ub)) if ua == ub => {
            EmailMatchVerdict::matched(0.95, MatchReason::GithubNoreplyUsername)
        }
        (Some(ua), None) if ua == local_b => {
            EmailMatchVerdict::matched(0.7, MatchReason::GithubNoreplyMatch)
        }
        (None, Some(ub)) if ub == local_a => {
            EmailMatchVerdict::matched(0.7, MatchReason::GithubNoreplyMatch)
        }
        _ => EmailMatchVerdict::no_match(),
    }
}

/// First rule in the chain: score the pair by email alone.
pub struct EmailRule;

impl PairRule for EmailRule {
    fn name(&self) -> &'static str {
        "email"
    }

    fn apply(&self, pair: &Pair<'_>, current: Option<PairScore>) -> Option<PairScore> {
        if current.is_some() {
            return current;
        }

        let verdict = emails_match(&pair.a.email, &pair.b.email);
        match verdict.reason {
            Some(reason) if verdict.matched => Some(PairScore {
                confidence: verdict.confidence,
                reason: ReasonTag::new(reason),
            }),
            _ => None,
        }
    }
}
