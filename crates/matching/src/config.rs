use serde::{Deserialize, Serialize};

/// Multipliers applied by the pair rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerWeights {
    pub same_domain: f64,
    pub cross_domain: f64,
    pub name_mismatch_discount: f64,
}

impl Default for ScorerWeights {
    fn default() -> Self {
        Self {
            same_domain: 0.9,
            cross_domain: 0.7,
            name_mismatch_discount: 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Pairs scoring below this are not merged.
    pub min_confidence: f64,
    /// Name similarity must exceed this for a name-only match.
    pub name_similarity: f64,
    /// Email matches whose names score below this get discounted.
    pub name_mismatch: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_confidence: 0.6,
            name_similarity: 0.8,
            name_mismatch: 0.3,
        }
    }
}

/// Heuristic weights for picking the canonical identity of a cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalWeights {
    pub noreply_penalty: f64,
    pub generic_penalty: f64,
    pub company_bonus: f64,
    /// Relative score gap under which the fuller name wins.
    pub tie_margin: f64,
}

impl Default for CanonicalWeights {
    fn default() -> Self {
        Self {
            noreply_penalty: 0.1,
            generic_penalty: 0.01,
            company_bonus: 1.5,
            tie_margin: 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub weights: ScorerWeights,
    pub thresholds: Thresholds,
    pub canonical: CanonicalWeights,
    /// When false the highest-commit seed of a cluster is always canonical.
    pub rerank_canonical: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: ScorerWeights::default(),
            thresholds: Thresholds::default(),
            canonical: CanonicalWeights::default(),
            rerank_canonical: true,
        }
    }
}

impl MatchingConfig {
    pub fn with_min_confidence(min_confidence: f64) -> Self {
        Self {
            thresholds: Thresholds {
                min_confidence,
                ..Thresholds::default()
            },
            ..Self::default()
        }
    }
}
