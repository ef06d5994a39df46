use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use linkrank_core::ingest::load_corpus;
use linkrank_core::{RankConfig, SearchEngine, SearchHit};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub doc_id: String,
    pub text: String,
    pub links: Vec<String>,
    pub rank: Option<f64>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

/// Load the corpus, rank and index it, and return the router serving it.
pub fn build_app(corpus_path: &str, config: &RankConfig) -> Result<Router> {
    config.validate()?;
    let corpus = load_corpus(corpus_path)?;
    let engine = SearchEngine::build(corpus, config);
    Ok(router(Arc::new(engine)))
}

pub fn router(engine: Arc<SearchEngine>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let mut results = state.engine.search(&params.q);
    let total_hits = results.len();
    results.truncate(params.k.clamp(1, 100));
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, "search");
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<DocResponse>, (StatusCode, Json<serde_json::Value>)> {
    match state.engine.corpus().get(&doc_id) {
        Some(doc) => Ok(Json(DocResponse {
            doc_id: doc.id.clone(),
            text: doc.text.clone(),
            links: doc.links.clone(),
            rank: state.engine.ranks().get(&doc.id),
        })),
        None => Err((StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" })))),
    }
}
