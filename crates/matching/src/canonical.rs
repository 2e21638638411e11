//! Picking the best representative among identities of one person.

use authormap_common::error::{AuthormapError, AuthormapResult};
use authormap_store::Identity;

use crate::config::CanonicalWeights;
use crate::normalize::{
    email_domain, is_free_mail_domain, is_generic_identity, is_noreply, significant_tokens,
};

/// Composite desirability: commits, penalised for noreply and placeholder
/// identities, boosted for company domains.
pub fn canonical_score(weights: &CanonicalWeights, identity: &Identity) -> f64 {
    let mut score = identity.commits as f64 + 1.0;

    let noreply = is_noreply(&identity.email);
    if noreply {
        score *= weights.noreply_penalty;
    }
    if is_generic_identity(&identity.name, &identity.email) {
        score *= weights.generic_penalty;
    }

    let domain = email_domain(&identity.email);
    if !noreply && !domain.is_empty() && !is_free_mail_domain(&domain) {
        score *= weights.company_bonus;
    }

    score
}

struct Ranked {
    score: f64,
    tokens: usize,
}

impl Ranked {
    fn of(weights: &CanonicalWeights, identity: &Identity) -> Self {
        Self {
            score: canonical_score(weights, identity),
            tokens: significant_tokens(&identity.name),
        }
    }

    /// Within the tie margin the fuller name wins; otherwise the higher score.
    /// Exact ties never outrank, so the earliest candidate is kept.
    fn outranks(&self, other: &Ranked, margin: f64) -> bool {
        let top = self.score.max(other.score);
        let close = top > 0.0 && (self.score - other.score).abs() <= margin * top;
        if close && self.tokens != other.tokens {
            self.tokens > other.tokens
        } else {
            self.score > other.score
        }
    }
}

/// Index of the best candidate, or `None` when there are none.
pub(crate) fn best_index(weights: &CanonicalWeights, candidates: &[&Identity]) -> Option<usize> {
    let (first, rest) = candidates.split_first()?;
    let mut best = 0;
    let mut best_rank = Ranked::of(weights, first);

    for (offset, candidate) in rest.iter().enumerate() {
        let rank = Ranked::of(weights, candidate);
        if rank.outranks(&best_rank, weights.tie_margin) {
            best = offset + 1;
            best_rank = rank;
        }
    }
    Some(best)
}

pub fn select_canonical(identities: &[Identity]) -> AuthormapResult<&Identity> {
    select_canonical_with(&CanonicalWeights::default(), identities)
}

pub fn select_canonical_with<'a>(
    weights: &CanonicalWeights,
    identities: &'a [Identity],
) -> AuthormapResult<&'a Identity> {
    let candidates: Vec<&Identity> = identities.iter().collect();
    let idx = best_index(weights, &candidates).ok_or_else(|| {
        AuthormapError::EmptyInput("cannot select a canonical identity from an empty set".into())
    })?;

    let chosen = candidates[idx];
    tracing::debug!(name = %chosen.name, email = %chosen.email, "selected canonical identity");
    Ok(chosen)
}
