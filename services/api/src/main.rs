mod analysis;
mod error;
mod mailmap;

use std::net::SocketAddr;
use std::sync::Arc;

use authormap_common::types::ServiceInfo;
use authormap_config::{init_tracing, AppConfig};
use authormap_matching::MatchingConfig;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub matching: Arc<MatchingConfig>,
    pub service: Arc<ServiceInfo>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let matching = MatchingConfig::with_min_confidence(config.min_confidence);
        Self {
            config: Arc::new(config),
            matching: Arc::new(matching),
            service: Arc::new(ServiceInfo::new("authormap-api")),
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let service = &state.service;
    Json(serde_json::json!({
        "name": service.name,
        "version": service.version,
        "instance_id": service.instance_id,
        "started_at": service.started_at,
        "uptime_secs": service.uptime_secs(Utc::now()),
    }))
}

async fn metrics() -> impl IntoResponse {
    let body = format!(
        "\
# HELP authormap_up Service up indicator\n\
# TYPE authormap_up gauge\n\
authormap_up 1\n\
# HELP authormap_info Service info\n\
# TYPE authormap_info gauge\n\
authormap_info{{service=\"authormap-api\",version=\"{}\"}} 1\n",
        env!("CARGO_PKG_VERSION")
    );

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/metrics", get(metrics))
        .merge(analysis::router())
        .merge(mailmap::router())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_level);
    tracing::info!(service = "authormap-api", "starting");

    let addr: SocketAddr = config.bind_addr().parse()?;
    let app = build_router(AppState::new(config));

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(AppConfig::default())
    }

    async fn read_body(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn read_body_string(resp: axum::http::Response<Body>) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // ── Health / Info ───────────────────────────────────────────────

    #[tokio::test]
    async fn health_returns_ok() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn info_returns_service_name() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::get("/info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = read_body(resp).await;
        assert_eq!(json["name"], "authormap-api");
        assert!(json["uptime_secs"].as_i64().unwrap() >= 0);
    }

    #[tokio::test]
    async fn info_instance_id_stable_across_requests() {
        let state = test_state();
        let first = build_router(state.clone())
            .oneshot(Request::get("/info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let second = build_router(state)
            .oneshot(Request::get("/info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            read_body(first).await["instance_id"],
            read_body(second).await["instance_id"]
        );
    }

    #[tokio::test]
    async fn metrics_returns_prometheus_format() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body_string(resp).await;
        assert!(body.contains("authormap_up 1"));
    }

    // ── POST /analyze ───────────────────────────────────────────────

    #[tokio::test]
    async fn analyze_clusters_shared_email() {
        let app = build_router(test_state());
        let body = serde_json::json!({
            "identities": [
                { "name": "Jane Roe", "email": "jane@corp.com", "commits": 40 },
                { "name": "Jane", "email": "JANE@corp.com", "commits": 3 },
                { "name": "Bob Stone", "email": "bob@other.org", "commits": 7 }
            ],
            "comments": false
        });
        let resp = app.oneshot(post_json("/analyze", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = read_body(resp).await;
        assert_eq!(json["clusters"].as_array().unwrap().len(), 1);
        assert_eq!(json["clusters"][0]["reason"], "exact-email");
        assert_eq!(json["clusters"][0]["canonical"]["name"], "Jane Roe");
        assert_eq!(
            json["mailmap"],
            "Jane Roe <jane@corp.com> Jane <JANE@corp.com>\n"
        );
        assert_eq!(json["stats"]["aliases_consolidated"], 1);
        assert_eq!(json["stats"]["authors_after"], 2);
        assert_eq!(json["analysis"]["total_identities"], 3);
    }

    #[tokio::test]
    async fn analyze_applies_existing_mailmap_first() {
        let app = build_router(test_state());
        let body = serde_json::json!({
            "identities": [
                { "name": "Jane Roe", "email": "jane@corp.com", "commits": 40 },
                { "name": "jr", "email": "jr@home.net", "commits": 3 }
            ],
            "mailmap": "Jane Roe <jane@corp.com> <jr@home.net>\n"
        });
        let resp = app.oneshot(post_json("/analyze", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = read_body(resp).await;
        assert_eq!(json["analysis"]["total_identities"], 1);
        assert_eq!(json["analysis"]["total_commits"], 43);
        assert!(json["clusters"].as_array().unwrap().is_empty());
        assert_eq!(json["mailmap"], "");
    }

    #[tokio::test]
    async fn analyze_rejects_bad_confidence() {
        let app = build_router(test_state());
        let body = serde_json::json!({ "identities": [], "min_confidence": 1.5 });
        let resp = app.oneshot(post_json("/analyze", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = read_body(resp).await;
        assert!(json["error"].as_str().unwrap().contains("min_confidence"));
    }

    #[tokio::test]
    async fn analyze_rejects_bad_mailmap() {
        let app = build_router(test_state());
        let body = serde_json::json!({ "identities": [], "mailmap": "no email here" });
        let resp = app.oneshot(post_json("/analyze", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_empty_input() {
        let app = build_router(test_state());
        let body = serde_json::json!({ "identities": [] });
        let resp = app.oneshot(post_json("/analyze", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = read_body(resp).await;
        assert_eq!(json["stats"]["reduction_percent"], 0);
        assert_eq!(json["summary"], "");
    }

    // ── POST /canonical ─────────────────────────────────────────────

    #[tokio::test]
    async fn canonical_prefers_real_address() {
        let app = build_router(test_state());
        let body = serde_json::json!({
            "identities": [
                { "name": "John", "email": "9+john@users.noreply.github.com", "commits": 100 },
                { "name": "John Doe", "email": "john@example.com", "commits": 50 }
            ]
        });
        let resp = app.oneshot(post_json("/canonical", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await["email"], "john@example.com");
    }

    #[tokio::test]
    async fn canonical_empty_returns_400() {
        let app = build_router(test_state());
        let body = serde_json::json!({ "identities": [] });
        let resp = app.oneshot(post_json("/canonical", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // ── POST /mailmap/* ─────────────────────────────────────────────

    #[tokio::test]
    async fn mailmap_parse_lists_entries() {
        let app = build_router(test_state());
        let body = serde_json::json!({
            "text": "# comment\nJane Roe <jane@corp.com> jr <jr@home.net>\nBob <bob@corp.com>\n"
        });
        let resp = app.oneshot(post_json("/mailmap/parse", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = read_body(resp).await;
        assert_eq!(json["count"], 2);
        assert_eq!(json["entries"][0]["key"], "jr|jr@home.net");
        assert_eq!(json["entries"][1]["key"], "|bob@corp.com");
    }

    #[tokio::test]
    async fn mailmap_parse_error_returns_400() {
        let app = build_router(test_state());
        let body = serde_json::json!({ "text": "Jane <jane@corp.com\n" });
        let resp = app.oneshot(post_json("/mailmap/parse", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = read_body(resp).await;
        assert!(json["error"].as_str().unwrap().contains("line 1"));
    }

    #[tokio::test]
    async fn mailmap_apply_merges() {
        let app = build_router(test_state());
        let body = serde_json::json!({
            "text": "Jane Roe <jane@corp.com> <jr@home.net>",
            "identities": [
                { "name": "jr", "email": "jr@home.net", "commits": 2 },
                { "name": "Jane Roe", "email": "jane@corp.com", "commits": 5 }
            ]
        });
        let resp = app.oneshot(post_json("/mailmap/apply", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = read_body(resp).await;
        assert_eq!(json["count"], 1);
        assert_eq!(json["identities"][0]["commits"], 7);
    }
}
