//! Router-level tests for the embeddings API
//!
//! These run against the full router with a deterministic stub encoder wired
//! in through the `SentenceEncoder` seam, so no model files are needed.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use embeddings_api::api::handlers::{AppState, SERVICE_NAME};
use embeddings_api::api::models::EmbeddingRecord;
use embeddings_api::api::routes::build_router;
use embeddings_api::error::ModelError;
use embeddings_api::model::SentenceEncoder;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

const STUB_DIMENSION: usize = 32;

/// Deterministic stub: each vector is a function of the sentence bytes, so
/// identical inputs always produce identical embeddings.
struct StubEncoder;

impl SentenceEncoder for StubEncoder {
    fn encode(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        Ok(sentences
            .iter()
            .map(|sentence| {
                let seed: u32 = sentence.bytes().map(u32::from).sum();
                (0..STUB_DIMENSION)
                    .map(|i| (seed + i as u32) as f32 / 100.0)
                    .collect()
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        STUB_DIMENSION
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

fn test_app() -> Router {
    let state = AppState {
        encoder: Arc::new(StubEncoder),
    };
    build_router(state, 1024 * 1024)
}

fn post_embeddings(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/embeddings/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_returns_fixed_name() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body, json!({ "Name": SERVICE_NAME }));
}

#[tokio::test]
async fn test_embeddings_pairs_each_sentence_in_order() {
    let sentences = vec!["hello world", "bonjour", "hallo wereld"];
    let response = test_app()
        .oneshot(post_embeddings(json!({ "sentences": sentences })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let records: Vec<EmbeddingRecord> = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(records.len(), sentences.len());
    for (record, sentence) in records.iter().zip(&sentences) {
        assert_eq!(&record.sentence, sentence);
        assert_eq!(record.embedding.len(), STUB_DIMENSION);
    }
}

#[tokio::test]
async fn test_embeddings_single_sentence_has_fixed_dimension() {
    let response = test_app()
        .oneshot(post_embeddings(json!({ "sentences": ["hello world"] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["sentence"], "hello world");
    assert_eq!(
        records[0]["embedding"].as_array().unwrap().len(),
        STUB_DIMENSION
    );
}

#[tokio::test]
async fn test_embeddings_identical_input_is_deterministic() {
    let app = test_app();
    let request_body = json!({ "sentences": ["same input", "twice"] });

    let first = app
        .clone()
        .oneshot(post_embeddings(request_body.clone()))
        .await
        .unwrap();
    let second = app.oneshot(post_embeddings(request_body)).await.unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(read_json(first).await, read_json(second).await);
}

#[tokio::test]
async fn test_embeddings_empty_batch_returns_empty_list() {
    let response = test_app()
        .oneshot(post_embeddings(json!({ "sentences": [] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn test_missing_sentences_field_is_rejected() {
    let response = test_app()
        .oneshot(post_embeddings(json!({ "text": "hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_non_string_sentences_are_rejected() {
    let response = test_app()
        .oneshot(post_embeddings(json!({ "sentences": [1, 2, 3] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_sentences_as_plain_string_is_rejected() {
    let response = test_app()
        .oneshot(post_embeddings(json!({ "sentences": "not a list" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unicode_sentences_round_trip() {
    let sentence = "Jusqu'à 180,- remboursés sur la série Samsung Galaxy S23";
    let response = test_app()
        .oneshot(post_embeddings(json!({ "sentences": [sentence] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body[0]["sentence"], sentence);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let state = AppState {
        encoder: Arc::new(StubEncoder),
    };
    // 1 KiB cap; the request below is well past it.
    let app = build_router(state, 1024);

    let big_sentence = "x".repeat(8 * 1024);
    let response = app
        .oneshot(post_embeddings(json!({ "sentences": [big_sentence] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
