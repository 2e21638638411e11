//! Pairwise scoring as an ordered rule chain.
//!
//! Each rule sees the score left by the rules before it. The reason is set by
//! the first rule that matches; later rules may only rescale the confidence
//! and flag the reason.

pub mod email;
pub mod mismatch;
pub mod name;

use std::cell::OnceCell;

use authormap_store::Identity;

use crate::config::MatchingConfig;
use crate::trace::{ReasonTag, RuleOutcome};

pub use email::{emails_match, EmailMatchVerdict};
pub use name::name_similarity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub confidence: f64,
    pub reason: ReasonTag,
}

/// Two identities under comparison. Name similarity is computed at most once.
pub struct Pair<'a> {
    pub a: &'a Identity,
    pub b: &'a Identity,
    similarity: OnceCell<f64>,
}

impl<'a> Pair<'a> {
    pub fn new(a: &'a Identity, b: &'a Identity) -> Self {
        Self {
            a,
            b,
            similarity: OnceCell::new(),
        }
    }

    pub fn name_similarity(&self) -> f64 {
        *self
            .similarity
            .get_or_init(|| name_similarity(&self.a.name, &self.b.name))
    }
}

pub trait PairRule {
    fn name(&self) -> &'static str;
    fn apply(&self, pair: &Pair<'_>, current: Option<PairScore>) -> Option<PairScore>;
}

/// The default chain: email, then similar name, then name-mismatch discount.
pub fn rule_chain(config: &MatchingConfig) -> Vec<Box<dyn PairRule>> {
    vec![
        Box::new(email::EmailRule),
        Box::new(name::SimilarNameRule::from_config(
            &config.thresholds,
            &config.weights,
        )),
        Box::new(mismatch::NameMismatchRule::from_config(
            &config.thresholds,
            &config.weights,
        )),
    ]
}

#[derive(Debug, Clone, Copy)]
pub struct RuleStep {
    pub rule: &'static str,
    pub fired: bool,
    pub score: Option<PairScore>,
}

impl From<RuleStep> for RuleOutcome {
    fn from(step: RuleStep) -> Self {
        RuleOutcome {
            rule: step.rule.to_string(),
            fired: step.fired,
            confidence: step.score.map_or(0.0, |s| s.confidence),
            reason: step.score.map(|s| s.reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PairEvaluation {
    pub score: Option<PairScore>,
    pub steps: Vec<RuleStep>,
}

pub fn evaluate_pair(rules: &[Box<dyn PairRule>], a: &Identity, b: &Identity) -> PairEvaluation {
    let pair = Pair::new(a, b);
    let mut score = None;
    let mut steps = Vec::with_capacity(rules.len());

    for rule in rules {
        let next = rule.apply(&pair, score);
        steps.push(RuleStep {
            rule: rule.name(),
            fired: next != score,
            score: next,
        });
        score = next;
    }

    PairEvaluation { score, steps }
}
