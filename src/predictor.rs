//! Inference Adapter: record → model row → probability → risk tier.

use crate::classifier::{ClassifierError, ReadmissionClassifier};
use crate::models::PatientRecord;
use crate::risk::RiskAssessment;

/// Score one patient record.
///
/// Calls the classifier exactly once. Errors are returned as-is, never
/// mapped to a default tier. A probability outside [0, 1] (or NaN) is an
/// inference error.
pub fn assess(
    classifier: &dyn ReadmissionClassifier,
    record: &PatientRecord,
) -> Result<RiskAssessment, ClassifierError> {
    let row = record.to_model_row();
    let probability = classifier.predict_proba(&row)?;

    if !(0.0..=1.0).contains(&probability) {
        return Err(ClassifierError::InvalidProbability(probability));
    }

    let assessment = RiskAssessment::new(probability);
    tracing::debug!(
        backend = classifier.backend(),
        probability,
        tier = assessment.tier.as_str(),
        "Readmission risk assessed"
    );
    Ok(assessment)
}
