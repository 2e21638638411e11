use authormap_common::error::AuthormapError;
use authormap_matching::{
    analyze_identities, find_clusters_with, format_mapping_summary, generate_mailmap,
    generate_stats, select_canonical_with, MailmapOptions,
};
use authormap_store::mailmap::{apply_mailmap, parse_mailmap};
use authormap_store::Identity;
use axum::extract::State;
use axum::Json;

use crate::analysis::requests::{AnalyzeRequest, CanonicalRequest};
use crate::analysis::responses::AnalyzeResponse;
use crate::error::ApiError;
use crate::AppState;

fn validate_confidence(value: f64) -> Result<(), AuthormapError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(AuthormapError::Validation(
            "min_confidence must be between 0.0 and 1.0".to_string(),
        ));
    }
    Ok(())
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let min_confidence = body.min_confidence.unwrap_or(state.config.min_confidence);
    validate_confidence(min_confidence)?;

    let identities = match body.mailmap.as_deref() {
        Some(text) => apply_mailmap(&body.identities, &parse_mailmap(text)?),
        None => body.identities,
    };
    let options = MailmapOptions {
        comments: body.comments.unwrap_or(state.config.mailmap_comments),
    };
    let mut matching = (*state.matching).clone();
    matching.thresholds.min_confidence = min_confidence;

    tracing::info!(identities = identities.len(), min_confidence, "analyzing identities");

    // clustering is quadratic; keep it off the async workers
    let response = tokio::task::spawn_blocking(move || {
        let analysis = analyze_identities(&identities);
        let clusters = find_clusters_with(&matching, &identities);
        AnalyzeResponse {
            mailmap: generate_mailmap(&clusters, &options),
            summary: format_mapping_summary(&clusters),
            stats: generate_stats(&clusters, identities.len()),
            analysis,
            clusters,
        }
    })
    .await
    .map_err(|e| AuthormapError::Internal(format!("analysis task failed: {e}")))?;

    Ok(Json(response))
}

pub async fn canonical(
    State(state): State<AppState>,
    Json(body): Json<CanonicalRequest>,
) -> Result<Json<Identity>, ApiError> {
    let chosen = select_canonical_with(&state.matching.canonical, &body.identities)?;
    Ok(Json(chosen.clone()))
}
