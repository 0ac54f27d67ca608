//! ONNX-backed sentence encoder
//!
//! Wraps an ONNX Runtime session and a HuggingFace tokenizer loaded from a
//! local model directory. The model outputs token-level embeddings
//! `[batch, seq_len, hidden_dim]`; sentence vectors are produced by
//! attention-mask-weighted mean pooling over the sequence dimension.

use crate::config::ModelConfig;
use crate::error::ModelError;
use ndarray::{Array2, Axis};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::sync::Mutex;
use tokenizers::Tokenizer;
use tracing::info;

const MODEL_FILE: &str = "model.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";

/// Sentence encoder backed by a local ONNX model
///
/// Loaded once at startup; read-only afterwards. `ort::Session::run` takes
/// `&mut self`, so the session sits behind a `Mutex` and concurrent requests
/// serialize on inference.
pub struct OnnxSentenceEncoder {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    model_name: String,
    dimension: usize,
}

impl std::fmt::Debug for OnnxSentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxSentenceEncoder")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl OnnxSentenceEncoder {
    /// Load the model and tokenizer from `config.dir`
    ///
    /// Runs one probe inference to pin the output dimensionality. Any failure
    /// here (missing files, corrupt weights, unexpected output shape) must be
    /// treated as fatal by the caller; there is no fallback model.
    pub fn load(config: &ModelConfig) -> Result<Self, ModelError> {
        let model_path = config.dir.join(MODEL_FILE);
        let tokenizer_path = config.dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            return Err(ModelError::ModelFileNotFound(
                model_path.display().to_string(),
            ));
        }
        if !tokenizer_path.exists() {
            return Err(ModelError::TokenizerFileNotFound(
                tokenizer_path.display().to_string(),
            ));
        }

        let mut session = Session::builder()?
            .with_execution_providers([CPUExecutionProvider::default().build()])?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .commit_from_file(&model_path)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ModelError::Tokenization(e.to_string()))?;

        // Probe inference: discovers the hidden dimension and fails fast on a
        // model that does not produce [batch, seq_len, hidden_dim] output.
        let probe = run_inference(&mut session, &tokenizer, &["dimension probe".to_string()])?;
        let dimension = probe
            .first()
            .map(Vec::len)
            .filter(|&d| d > 0)
            .ok_or_else(|| ModelError::OutputShape("probe produced no output".to_string()))?;

        info!(
            model = %config.name,
            dimension,
            "ONNX sentence encoder loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            model_name: config.name.clone(),
            dimension,
        })
    }
}

impl super::SentenceEncoder for OnnxSentenceEncoder {
    fn encode(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        if sentences.is_empty() {
            return Ok(vec![]);
        }

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("inference session poisoned".to_string()))?;
        let embeddings = run_inference(&mut session, &self.tokenizer, sentences)?;

        for embedding in &embeddings {
            if embedding.len() != self.dimension {
                return Err(ModelError::InvalidDimension {
                    expected: self.dimension,
                    actual: embedding.len(),
                });
            }
        }

        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Tokenize a batch, pad to the longest sequence, run the session and
/// mean-pool the token embeddings into one vector per sentence.
fn run_inference(
    session: &mut Session,
    tokenizer: &Tokenizer,
    sentences: &[String],
) -> Result<Vec<Vec<f32>>, ModelError> {
    let encodings = tokenizer
        .encode_batch(sentences.to_vec(), true)
        .map_err(|e| ModelError::Tokenization(e.to_string()))?;

    let max_len = encodings
        .iter()
        .map(|enc| enc.get_ids().len())
        .max()
        .unwrap_or(0);
    if max_len == 0 {
        return Err(ModelError::Tokenization(
            "tokenizer produced empty encodings".to_string(),
        ));
    }

    let batch = sentences.len();
    let mut input_ids = Vec::with_capacity(batch * max_len);
    let mut attention_mask = Vec::with_capacity(batch * max_len);

    for encoding in &encodings {
        let ids = encoding.get_ids();
        let mask = encoding.get_attention_mask();

        input_ids.extend(ids.iter().map(|&id| id as i64));
        attention_mask.extend(mask.iter().map(|&m| m as i64));

        // Right-pad to the longest sequence in the batch
        let padding = max_len - ids.len();
        input_ids.extend(std::iter::repeat(0i64).take(padding));
        attention_mask.extend(std::iter::repeat(0i64).take(padding));
    }

    // BERT-style models take token_type_ids as a third input; all zeros for
    // single-segment sentence embedding.
    let token_type_ids = vec![0i64; batch * max_len];
    let mask_for_pooling = attention_mask.clone();

    let input_ids_array = Array2::from_shape_vec((batch, max_len), input_ids)
        .map_err(|e| ModelError::Inference(e.to_string()))?;
    let attention_mask_array = Array2::from_shape_vec((batch, max_len), attention_mask)
        .map_err(|e| ModelError::Inference(e.to_string()))?;
    let token_type_ids_array = Array2::from_shape_vec((batch, max_len), token_type_ids)
        .map_err(|e| ModelError::Inference(e.to_string()))?;

    let outputs = session.run(ort::inputs![
        "input_ids" => Value::from_array(input_ids_array)?,
        "attention_mask" => Value::from_array(attention_mask_array)?,
        "token_type_ids" => Value::from_array(token_type_ids_array)?
    ])?;

    // Index 0 rather than a name: output naming varies between exports.
    let output_array = outputs[0]
        .try_extract_array::<f32>()
        .map_err(ModelError::Session)?;

    let shape = output_array.shape();
    if shape.len() != 3 || shape[0] != batch {
        return Err(ModelError::OutputShape(format!(
            "{:?} (expected [batch, seq_len, hidden_dim])",
            shape
        )));
    }

    let mut embeddings = Vec::with_capacity(batch);
    for batch_idx in 0..batch {
        let token_embeddings = output_array.index_axis(Axis(0), batch_idx);
        let seq_len = token_embeddings.shape()[0];
        let hidden_dim = token_embeddings.shape()[1];
        let item_mask = &mask_for_pooling[batch_idx * max_len..(batch_idx + 1) * max_len];

        // Mean pooling weighted by the attention mask, so padding tokens do
        // not contribute.
        let mut pooled = vec![0.0f32; hidden_dim];
        let mut mask_sum = 0.0f32;
        for token_idx in 0..seq_len {
            let weight = item_mask[token_idx] as f32;
            mask_sum += weight;
            for (value, pooled_value) in token_embeddings
                .index_axis(Axis(0), token_idx)
                .iter()
                .zip(pooled.iter_mut())
            {
                *pooled_value += value * weight;
            }
        }
        for value in &mut pooled {
            *value /= mask_sum.max(1e-9);
        }

        embeddings.push(pooled);
    }

    Ok(embeddings)
}
