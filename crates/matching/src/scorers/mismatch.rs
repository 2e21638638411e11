use crate::config::{ScorerWeights, Thresholds};

use super::{Pair, PairRule, PairScore};

/// Discounts email-based matches whose names disagree, which usually means a
/// shared mailbox rather than one person.
pub struct NameMismatchRule {
    pub threshold: f64,
    pub discount: f64,
}

impl NameMismatchRule {
    pub fn from_config(thresholds: &Thresholds, weights: &ScorerWeights) -> Self {
        Self {
            threshold: thresholds.name_mismatch,
            discount: weights.name_mismatch_discount,
        }
    }
}

impl PairRule for NameMismatchRule {
    fn name(&self) -> &'static str {
        "name_mismatch"
    }

    fn apply(&self, pair: &Pair<'_>, current: Option<PairScore>) -> Option<PairScore> {
        match current {
            Some(score)
                if score.reason.reason.is_email_based()
                    && pair.name_similarity() < self.threshold =>
            {
                Some(PairScore {
                    confidence: score.confidence * self.discount,
                    reason: score.reason.with_name_mismatch(),
                })
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{MatchReason, ReasonTag};
    use authormap_store::Identity;

    fn rule() -> NameMismatchRule {
        NameMismatchRule::from_config(&Thresholds::default(), &ScorerWeights::default())
    }

    fn email_score(confidence: f64) -> Option<PairScore> {
        Some(PairScore {
            confidence,
            reason: ReasonTag::new(MatchReason::ExactEmail),
        })
    }

    #[test]
    fn discounts_shared_mailbox() {
        let a = Identity::new("Alice", "team@corp.com", 1);
        let b = Identity::new("Bob", "team@corp.com", 1);
        let out = rule().apply(&Pair::new(&a, &b), email_score(1.0)).unwrap();
        assert!((out.confidence - 0.6).abs() < 1e-9);
        assert_eq!(out.reason.to_string(), "exact-email-name-mismatch");
    }

    #[test]
    fn leaves_agreeing_names_alone() {
        let a = Identity::new("Alice Smith", "alice@corp.com", 1);
        let b = Identity::new("Alice", "alice@corp.com", 1);
        let out = rule().apply(&Pair::new(&a, &b), email_score(1.0)).unwrap();
        assert_eq!(out, email_score(1.0).unwrap());
    }

    #[test]
    fn ignores_name_based_scores_and_misses() {
        let a = Identity::new("Alice", "a@corp.com", 1);
        let b = Identity::new("Bob", "b@corp.com", 1);
        let pair = Pair::new(&a, &b);
        assert!(rule().apply(&pair, None).is_none());

        let name_score = PairScore {
            confidence: 0.7,
            reason: ReasonTag::new(MatchReason::SimilarName),
        };
        assert_eq!(rule().apply(&pair, Some(name_score)), Some(name_score));
    }
}
