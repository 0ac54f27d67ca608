//! Embeddings API - HTTP service returning sentence embeddings
//!
//! This library exposes a small HTTP surface around a locally loaded
//! sentence-embedding model: a batch of sentences goes in, an ordered list of
//! `(sentence, vector)` pairs comes out. The model is loaded once at startup
//! and stays resident for the process lifetime.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use embeddings_api::prelude::*;
//! use embeddings_api::model::OnnxSentenceEncoder;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default_config();
//!     let encoder: Arc<dyn SentenceEncoder> =
//!         Arc::new(OnnxSentenceEncoder::load(&config.model)?);
//!     let app = build_router(
//!         AppState { encoder },
//!         config.server.max_body_size_mb * 1024 * 1024,
//!     );
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;
pub use error::{ApiError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::handlers::AppState;
    pub use crate::api::models::{EmbeddingRecord, SentenceBatch};
    pub use crate::api::routes::build_router;
    pub use crate::config::Config;
    pub use crate::error::{ApiError, Result};
    pub use crate::model::SentenceEncoder;
}
