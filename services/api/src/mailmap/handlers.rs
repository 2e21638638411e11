use authormap_store::mailmap::{apply_mailmap, parse_mailmap};
use axum::Json;

use crate::error::ApiError;
use crate::mailmap::requests::{ApplyRequest, ParseRequest};
use crate::mailmap::responses::{ApplyResponse, MailmapEntryResponse, ParseResponse};

pub async fn parse(Json(body): Json<ParseRequest>) -> Result<Json<ParseResponse>, ApiError> {
    let map = parse_mailmap(&body.text)?;
    let entries: Vec<MailmapEntryResponse> = map
        .iter()
        .map(|(key, entry)| MailmapEntryResponse {
            key: key.to_string(),
            canonical_name: entry.canonical_name.clone(),
            canonical_email: entry.canonical_email.clone(),
        })
        .collect();
    let count = entries.len();
    Ok(Json(ParseResponse { entries, count }))
}

pub async fn apply(Json(body): Json<ApplyRequest>) -> Result<Json<ApplyResponse>, ApiError> {
    let map = parse_mailmap(&body.text)?;
    let identities = apply_mailmap(&body.identities, &map);
    let count = identities.len();
    Ok(Json(ApplyResponse { identities, count }))
}
