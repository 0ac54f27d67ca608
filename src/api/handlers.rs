//! API request handlers

use axum::{extract::State, Json};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::api::models::{EmbeddingRecord, SentenceBatch};
use crate::error::ApiError;
use crate::model::SentenceEncoder;

/// Fixed service title, returned by the root endpoint
pub const SERVICE_NAME: &str = "API returning short embeddings for each sentence.";

/// Application state
///
/// The encoder is loaded once by the composition root and shared read-only
/// across requests.
#[derive(Clone)]
pub struct AppState {
    pub encoder: Arc<dyn SentenceEncoder>,
}

/// `GET /` - fixed service name payload
pub async fn service_info() -> Json<serde_json::Value> {
    Json(json!({ "Name": SERVICE_NAME }))
}

/// `POST /embeddings/` - embed a batch of sentences
///
/// Runs one batch-inference call over the whole input and pairs each sentence
/// with its vector, preserving input order. An empty batch is accepted and
/// yields an empty list. The encode call blocks this request's task until the
/// model finishes.
pub async fn embeddings(
    State(state): State<AppState>,
    Json(batch): Json<SentenceBatch>,
) -> Result<Json<Vec<EmbeddingRecord>>, ApiError> {
    info!(sentences = batch.sentences.len(), "Start processing");

    let inference_started = Instant::now();
    let vectors = state.encoder.encode(&batch.sentences)?;
    info!(
        elapsed_ms = inference_started.elapsed().as_millis() as u64,
        "Embeddings obtained"
    );

    let records: Vec<EmbeddingRecord> = batch
        .sentences
        .into_iter()
        .zip(vectors)
        .map(|(sentence, embedding)| EmbeddingRecord {
            sentence,
            embedding,
        })
        .collect();

    info!("End processing");
    Ok(Json(records))
}
