use std::collections::HashSet;

use crate::config::{ScorerWeights, Thresholds};
use crate::normalize::{email_domain, normalize_name};
use crate::trace::{MatchReason, ReasonTag};

use super::{Pair, PairRule, PairScore};

/// Similarity in [0, 1] between two free-text names.
///
/// Equal normalized forms score 1, containment ("John" in "John Doe") 0.9,
/// strong token overlap `0.7 + 0.2 * jaccard`, otherwise normalized
/// Levenshtein similarity. An empty input scores 0.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let na = normalize_name(a);
    let nb = normalize_name(b);
    if na == nb {
        return 1.0;
    }
    if na.is_empty() || nb.is_empty() {
        return 0.0;
    }
    if na.contains(nb.as_str()) || nb.contains(na.as_str()) {
        return 0.9;
    }

    let jaccard = token_jaccard(&na, &nb);
    if jaccard > 0.5 {
        return 0.7 + 0.2 * jaccard;
    }

    edit_similarity(&na, &nb)
}

/// Jaccard index over whitespace-separated tokens.
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    let ta: HashSet<&str> = a.split_whitespace().collect();
    let tb: HashSet<&str> = b.split_whitespace().collect();

    let union = ta.union(&tb).count();
    if union == 0 {
        return 0.0;
    }
    ta.intersection(&tb).count() as f64 / union as f64
}

/// `1 - levenshtein / max_len`, lengths in chars.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - strsim::levenshtein(a, b) as f64 / max_len as f64
}

/// Matches pairs no email rule claimed when their names are close enough.
pub struct SimilarNameRule {
    pub threshold: f64,
    pub same_domain_weight: f64,
    pub cross_domain_weight: f64,
}

impl SimilarNameRule {
    pub fn from_config(thresholds: &Thresholds, weights: &ScorerWeights) -> Self {
        Self {
            threshold: thresholds.name_similarity,
            same_domain_weight: weights.same_domain,
            cross_domain_weight: weights.cross_domain,
        }
    }
}

impl PairRule for SimilarNameRule {
    fn name(&self) -> &'static str {
        "similar_name"
    }

    fn apply(&self, pair: &Pair<'_>, current: Option<PairScore>) -> Option<PairScore> {
        if current.is_some() {
            return current;
        }

        let similarity = pair.name_similarity();
        if similarity <= self.threshold {
            return None;
        }

        let domain_a = email_domain(&pair.a.email);
        let shared_domain = !domain_a.is_empty() && domain_a == email_domain(&pair.b.email);
        let (weight, reason) = if shared_domain {
            (self.same_domain_weight, MatchReason::SimilarNameSameDomain)
        } else {
            (self.cross_domain_weight, MatchReason::SimilarName)
        };

        Some(PairScore {
            confidence: similarity * weight,
            reason: ReasonTag::new(reason),
        })
    }
}
