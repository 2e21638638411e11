use authormap_store::Identity;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub text: String,
    pub identities: Vec<Identity>,
}
