//! Trained classifier: loaded once at startup, queried once per prediction.
//!
//! `ReadmissionClassifier` is the seam between the HTTP layer and whatever
//! runtime evaluates the model. The ONNX Runtime backend lives behind the
//! default `onnx` feature; `MockClassifier` stands in for it in tests.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::models::ModelRow;

mod mock;
#[cfg(feature = "onnx")]
mod onnx;

pub use mock::MockClassifier;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Model artifact not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Model initialization: {0}")]
    ModelInit(String),

    #[error("Model inputs do not match the expected columns (expected {expected:?}, found {found:?})")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Classifier returned a probability outside [0, 1]: {0}")]
    InvalidProbability(f64),

    #[error("No model runtime compiled in (rebuild with the `onnx` feature)")]
    BackendUnavailable,
}

/// Binary classifier scoring one patient row.
///
/// Implementations are shared read-only across requests, hence `&self`.
pub trait ReadmissionClassifier: Send + Sync {
    /// Probability of the positive ("readmitted") class for a single row.
    fn predict_proba(&self, row: &ModelRow) -> Result<f64, ClassifierError>;

    /// Short backend name for logs and `/health`.
    fn backend(&self) -> &'static str;
}

/// Widen a single-precision model output through its shortest decimal
/// form, so `0.35f32` scores as `0.35` and not `0.3499999940395355`.
///
/// Binary widening can land just under a tier threshold while the
/// rendered percentage still rounds to it.
pub fn widen_probability(p: f32) -> f64 {
    p.to_string().parse().unwrap_or(f64::NAN)
}

/// Load the classifier named by the configuration.
///
/// Any failure here is fatal to startup: there is no fallback model.
pub fn load_classifier(
    config: &ServerConfig,
) -> Result<Arc<dyn ReadmissionClassifier>, ClassifierError> {
    if !config.model_path.exists() {
        return Err(ClassifierError::ModelNotFound(config.model_path.clone()));
    }

    #[cfg(feature = "onnx")]
    {
        let model = OnnxClassifier::load(&config.model_path, &config.probability_output)?;
        Ok(Arc::new(model))
    }

    #[cfg(not(feature = "onnx"))]
    {
        Err(ClassifierError::BackendUnavailable)
    }
}
