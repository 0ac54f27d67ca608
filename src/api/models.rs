//! Request and response models for the embeddings endpoint

use serde::{Deserialize, Serialize};

/// Request body: an ordered batch of sentences to embed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceBatch {
    /// Input sentences; response order matches this order
    pub sentences: Vec<String>,
}

/// One input sentence paired with its embedding vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// The original input sentence
    pub sentence: String,

    /// Fixed-length embedding vector
    pub embedding: Vec<f32>,
}
