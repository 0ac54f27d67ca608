//! Sentence embedding model loaded from local ONNX files

pub mod onnx;

pub use onnx::OnnxSentenceEncoder;

use crate::error::ModelError;

/// Trait for sentence encoders
///
/// The call is synchronous: inference runs to completion on the calling task
/// with no suspension point. Implementations must be safe for concurrent use
/// behind an `Arc`.
pub trait SentenceEncoder: Send + Sync {
    /// Map an ordered batch of sentences to an ordered batch of vectors,
    /// one per sentence, all of [`Self::dimension`] length.
    fn encode(&self, sentences: &[String]) -> std::result::Result<Vec<Vec<f32>>, ModelError>;

    /// Fixed output dimensionality of this encoder
    fn dimension(&self) -> usize;

    /// Name of the loaded model
    fn model_name(&self) -> &str;
}
