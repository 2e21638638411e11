use authormap_store::Identity;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub identities: Vec<Identity>,
    pub min_confidence: Option<f64>,
    pub comments: Option<bool>,
    /// Existing mailmap text applied to the identities before clustering.
    pub mailmap: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CanonicalRequest {
    pub identities: Vec<Identity>,
}
