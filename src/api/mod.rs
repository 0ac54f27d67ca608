//! HTTP API surface: request/response models, handlers and routing

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::AppState;
pub use models::{EmbeddingRecord, SentenceBatch};
pub use routes::build_router;
