use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use linkrank_core::RankConfig;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

fn build_tiny_corpus(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("corpus.jsonl");
    let lines = [
        r#"{"id":"home.html","text":"Rust search engine home","links":["about.html","blog.html"]}"#,
        r#"{"id":"about.html","text":"About this Rust project","links":["home.html"]}"#,
        r#"{"id":"blog.html","text":"Le café du blog","links":["home.html","about.html"]}"#,
    ];
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn app(dir: &std::path::Path) -> Router {
    let path = build_tiny_corpus(dir);
    server::build_app(&path.to_string_lossy(), &RankConfig::default()).unwrap()
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let dir = tempdir().unwrap();
    let (status, json) = call(app(dir.path()), "/search?q=rust&k=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"].as_u64(), Some(2));
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["doc_id"], "home.html");
    assert_eq!(arr[1]["doc_id"], "about.html");
    assert!(arr[0]["score"].as_f64().unwrap() > arr[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn search_folds_accents_and_clamps_k() {
    let dir = tempdir().unwrap();
    let (status, json) = call(app(dir.path()), "/search?q=CAF%C3%89&k=0").await;
    assert_eq!(status, StatusCode::OK);
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["doc_id"], "blog.html");
}

#[tokio::test]
async fn empty_query_has_no_hits() {
    let dir = tempdir().unwrap();
    let (status, json) = call(app(dir.path()), "/search?q=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"].as_u64(), Some(0));
}

#[tokio::test]
async fn doc_returns_original_text() {
    let dir = tempdir().unwrap();
    let (status, json) = call(app(dir.path()), "/doc/blog.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "Le café du blog");
    assert_eq!(json["links"].as_array().unwrap().len(), 2);

    let (status, json) = call(app(dir.path()), "/doc/missing.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not found");
}
