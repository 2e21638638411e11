use authormap_matching::{AnalysisStats, ClusterStats, IdentityCluster};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub clusters: Vec<IdentityCluster>,
    pub mailmap: String,
    pub summary: String,
    pub stats: ClusterStats,
    pub analysis: AnalysisStats,
}
