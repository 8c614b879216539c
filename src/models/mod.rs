//! Domain types: the closed choice lists of the form and the patient record.

pub mod enums;
pub mod patient;

pub use enums::{
    AgeBracket, DiabetesMedication, Gender, InsulinUsage, MedicalSpecialty, MedicationChange,
};
pub use patient::{FeatureValue, ModelColumn, ModelRow, PatientRecord, COLUMN_COUNT, UNKNOWN};
