pub mod handlers;
pub mod requests;
pub mod responses;

use axum::routing::post;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mailmap/parse", post(handlers::parse))
        .route("/mailmap/apply", post(handlers::apply))
}
