use authormap_store::Identity;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MailmapEntryResponse {
    pub key: String,
    pub canonical_name: String,
    pub canonical_email: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub entries: Vec<MailmapEntryResponse>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub identities: Vec<Identity>,
    pub count: usize,
}
