//! Author identity resolution: normalize names and emails, score identity
//! pairs, cluster identities of the same person, pick a canonical identity
//! per cluster and render the result as a mailmap.

pub mod canonical;
pub mod config;
pub mod engine;
pub mod normalize;
pub mod report;
pub mod scorers;
pub mod stats;
pub mod trace;

pub use canonical::{select_canonical, select_canonical_with};
pub use config::MatchingConfig;
pub use engine::{find_clusters, find_clusters_with, IdentityCluster, CLUSTER_CONFIDENCE};
pub use report::{format_mapping_summary, generate_mailmap, MailmapOptions};
pub use scorers::{emails_match, name_similarity, EmailMatchVerdict};
pub use stats::{analyze_identities, generate_stats, AnalysisStats, ClusterStats};
pub use trace::{AliasMatch, MatchReason, ReasonTag, RuleOutcome};
