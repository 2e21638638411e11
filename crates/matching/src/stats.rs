use std::collections::HashSet;

use authormap_store::Identity;
use serde::{Deserialize, Serialize};

use crate::engine::IdentityCluster;
use crate::normalize::{is_noreply, normalize_name};

/// Aggregates over one set of clusters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStats {
    pub clusters_found: usize,
    pub aliases_consolidated: usize,
    /// Commits attributed to aliases; canonical commits are not counted.
    pub commits_affected: u64,
    pub authors_after: usize,
    pub reduction_percent: u32,
}

pub fn generate_stats(clusters: &[IdentityCluster], total_authors_before: usize) -> ClusterStats {
    let aliases_consolidated: usize = clusters.iter().map(|c| c.aliases.len()).sum();
    let commits_affected = clusters
        .iter()
        .map(IdentityCluster::alias_commits)
        .fold(0u64, u64::saturating_add);

    let reduction_percent = if total_authors_before == 0 {
        0
    } else {
        (aliases_consolidated as f64 / total_authors_before as f64 * 100.0).round() as u32
    };

    ClusterStats {
        clusters_found: clusters.len(),
        aliases_consolidated,
        commits_affected,
        authors_after: total_authors_before.saturating_sub(aliases_consolidated),
        reduction_percent,
    }
}

/// Aggregates over a raw identity list, before clustering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub total_identities: usize,
    pub unique_names: usize,
    pub unique_emails: usize,
    pub total_commits: u64,
    pub noreply_identities: usize,
}

pub fn analyze_identities(identities: &[Identity]) -> AnalysisStats {
    let names: HashSet<String> = identities.iter().map(|i| normalize_name(&i.name)).collect();
    let emails: HashSet<String> = identities
        .iter()
        .map(|i| i.email.trim().to_lowercase())
        .collect();

    AnalysisStats {
        total_identities: identities.len(),
        unique_names: names.len(),
        unique_emails: emails.len(),
        total_commits: identities
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(i.commits)),
        noreply_identities: identities.iter().filter(|i| is_noreply(&i.email)).count(),
    }
}
