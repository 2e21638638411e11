pub mod handlers;
pub mod requests;
pub mod responses;

use axum::routing::post;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/canonical", post(handlers::canonical))
}
