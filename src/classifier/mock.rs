use std::sync::Mutex;

use super::{ClassifierError, ReadmissionClassifier};
use crate::models::ModelRow;

/// Mock classifier for testing: returns a fixed probability and records
/// every row it was asked to score.
pub struct MockClassifier {
    outcome: Result<f64, String>,
    calls: Mutex<Vec<ModelRow>>,
}

impl MockClassifier {
    pub fn with_probability(probability: f64) -> Self {
        Self {
            outcome: Ok(probability),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Classifier whose every call fails with `ClassifierError::Inference`.
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Rows received so far, in call order.
    pub fn calls(&self) -> Vec<ModelRow> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }
}

impl ReadmissionClassifier for MockClassifier {
    fn predict_proba(&self, row: &ModelRow) -> Result<f64, ClassifierError> {
        self.calls
            .lock()
            .map_err(|_| ClassifierError::Inference("Mock call log poisoned".to_string()))?
            .push(row.clone());

        self.outcome.clone().map_err(ClassifierError::Inference)
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatientRecord;

    #[test]
    fn mock_returns_configured_probability() {
        let mock = MockClassifier::with_probability(0.42);
        let row = PatientRecord::default().to_model_row();
        assert_eq!(mock.predict_proba(&row).unwrap(), 0.42);
    }

    #[test]
    fn mock_records_each_call() {
        let mock = MockClassifier::with_probability(0.1);
        let row = PatientRecord::default().to_model_row();
        mock.predict_proba(&row).unwrap();
        mock.predict_proba(&row).unwrap();
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.calls()[0], row);
    }

    #[test]
    fn failing_mock_surfaces_inference_error() {
        let mock = MockClassifier::failing("bad tensor");
        let row = PatientRecord::default().to_model_row();
        let err = mock.predict_proba(&row).unwrap_err();
        assert!(matches!(err, ClassifierError::Inference(ref m) if m == "bad tensor"));
        assert_eq!(mock.call_count(), 1);
    }
}
