use authormap_store::Identity;
use serde::{Deserialize, Serialize};

use crate::canonical::best_index;
use crate::config::MatchingConfig;
use crate::scorers::{evaluate_pair, rule_chain, PairScore};
use crate::trace::{AliasMatch, ReasonTag};

/// Cluster-level confidence reported on every cluster. Informational only;
/// per-alias confidence is in [`IdentityCluster::matches`].
pub const CLUSTER_CONFIDENCE: f64 = 0.8;

/// A canonical identity and the aliases believed to be the same person.
/// Always has at least one alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityCluster {
    pub canonical: Identity,
    pub aliases: Vec<Identity>,
    pub confidence: f64,
    pub reason: ReasonTag,
    pub matches: Vec<AliasMatch>,
}

impl IdentityCluster {
    /// Saturates at `u64::MAX`.
    pub fn alias_commits(&self) -> u64 {
        self.aliases
            .iter()
            .fold(0u64, |acc, a| acc.saturating_add(a.commits))
    }

    pub fn total_commits(&self) -> u64 {
        self.canonical.commits.saturating_add(self.alias_commits())
    }
}

/// Cluster with default settings and the given confidence floor.
pub fn find_clusters(identities: &[Identity], min_confidence: f64) -> Vec<IdentityCluster> {
    find_clusters_with(&MatchingConfig::with_min_confidence(min_confidence), identities)
}

/// Greedy clustering over identities ordered by commits (descending, stable).
///
/// Each unconsumed identity seeds a cluster and absorbs every later
/// unconsumed identity whose pair score reaches `min_confidence`. Seeds that
/// absorb nothing are dropped. Clusters come back ordered by total commits.
pub fn find_clusters_with(config: &MatchingConfig, identities: &[Identity]) -> Vec<IdentityCluster> {
    let mut sorted: Vec<&Identity> = identities.iter().collect();
    sorted.sort_by(|a, b| b.commits.cmp(&a.commits));

    let rules = rule_chain(config);
    let min_confidence = config.thresholds.min_confidence;
    let mut consumed = vec![false; sorted.len()];
    let mut clusters = Vec::new();

    for i in 0..sorted.len() {
        if consumed[i] {
            continue;
        }
        let seed = sorted[i];
        let mut members: Vec<&Identity> = vec![seed];
        let mut matches = Vec::new();
        let mut reason: Option<ReasonTag> = None;

        for j in (i + 1)..sorted.len() {
            if consumed[j] {
                continue;
            }
            let candidate = sorted[j];
            let evaluation = evaluate_pair(&rules, seed, candidate);
            let Some(score) = evaluation.score else {
                continue;
            };
            if score.confidence < min_confidence {
                continue;
            }

            consumed[j] = true;
            reason.get_or_insert(score.reason);
            tracing::debug!(
                seed = %seed,
                alias = %candidate,
                confidence = score.confidence,
                reason = %score.reason,
                "merged alias"
            );

            members.push(candidate);
            matches.push(AliasMatch {
                matched_email: seed.email.clone(),
                alias: candidate.clone(),
                confidence: score.confidence,
                reason: score.reason,
                rules: evaluation.steps.into_iter().map(Into::into).collect(),
            });
        }

        let Some(reason) = reason else {
            continue;
        };
        consumed[i] = true;

        let canonical_idx = if config.rerank_canonical {
            best_index(&config.canonical, &members).unwrap_or(0)
        } else {
            0
        };
        let canonical = members.remove(canonical_idx).clone();
        if canonical_idx != 0 {
            // promoted member's record is replaced by one for the demoted seed
            let promoted = matches.remove(canonical_idx - 1);
            let evaluation = evaluate_pair(&rules, &canonical, seed);
            let score = evaluation.score.unwrap_or(PairScore {
                confidence: promoted.confidence,
                reason: promoted.reason,
            });
            matches.insert(
                0,
                AliasMatch {
                    matched_email: canonical.email.clone(),
                    alias: seed.clone(),
                    confidence: score.confidence,
                    reason: score.reason,
                    rules: evaluation.steps.into_iter().map(Into::into).collect(),
                },
            );
        }

        clusters.push(IdentityCluster {
            canonical,
            aliases: members.into_iter().cloned().collect(),
            confidence: CLUSTER_CONFIDENCE,
            reason,
            matches,
        });
    }

    clusters.sort_by(|a, b| b.total_commits().cmp(&a.total_commits()));

    tracing::info!(
        identities = identities.len(),
        clusters = clusters.len(),
        aliases = clusters.iter().map(|c| c.aliases.len()).sum::<usize>(),
        "clustering complete"
    );
    clusters
}
