//! Form Renderer: control definitions and submission parsing.
//!
//! Every submission is parsed into a fresh `PatientRecord`; nothing is kept
//! between requests. Bounded controls (selects, sliders) are enforced here
//! the way the browser widget would enforce them. Diagnosis codes are free
//! text and pass through untouched.

pub mod render;

use serde::Deserialize;

use crate::models::{
    AgeBracket, DiabetesMedication, Gender, InsulinUsage, MedicalSpecialty, MedicationChange,
    PatientRecord,
};

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("'{value}' is not a valid choice for {field}")]
    InvalidChoice { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: &'static str, value: String },
}

// ═══════════════════════════════════════════════════════════
// Sliders
// ═══════════════════════════════════════════════════════════

/// Bounded integer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub field: &'static str,
    pub label: &'static str,
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

impl Slider {
    fn check(&self, value: Option<i64>) -> Result<Option<i64>, FormError> {
        match value {
            Some(v) if v < self.min || v > self.max => Err(FormError::OutOfRange {
                field: self.field,
                value: v,
                min: self.min,
                max: self.max,
            }),
            other => Ok(other),
        }
    }

    /// Parse the raw form text; blank means "not submitted".
    fn parse(&self, raw: Option<&str>) -> Result<Option<i64>, FormError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse::<i64>().map(Some).map_err(|_| FormError::NotANumber {
                field: self.field,
                value: s.to_string(),
            }),
        }
    }
}

pub const TIME_IN_HOSPITAL: Slider = Slider {
    field: "time_in_hospital",
    label: "Time in hospital (days)",
    min: 1,
    max: 14,
    default: 3,
};

pub const NUM_LAB_PROCEDURES: Slider = Slider {
    field: "num_lab_procedures",
    label: "Number of lab procedures",
    min: 1,
    max: 120,
    default: 40,
};

pub const NUM_PROCEDURES: Slider = Slider {
    field: "num_procedures",
    label: "Number of procedures",
    min: 0,
    max: 10,
    default: 1,
};

pub const NUM_MEDICATIONS: Slider = Slider {
    field: "num_medications",
    label: "Number of medications",
    min: 1,
    max: 60,
    default: 10,
};

pub const NUMBER_DIAGNOSES: Slider = Slider {
    field: "number_diagnoses",
    label: "Number of diagnoses",
    min: 1,
    max: 10,
    default: 3,
};

// ═══════════════════════════════════════════════════════════
// Submissions
// ═══════════════════════════════════════════════════════════

/// Typed prediction request. Every field is optional: absent values are
/// filled with `"Unknown"` before inference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    pub age: Option<String>,
    pub gender: Option<String>,
    pub time_in_hospital: Option<i64>,
    pub medical_specialty: Option<String>,
    pub num_lab_procedures: Option<i64>,
    pub num_procedures: Option<i64>,
    pub num_medications: Option<i64>,
    pub number_diagnoses: Option<i64>,
    pub diag_1: Option<String>,
    pub diag_2: Option<String>,
    pub diag_3: Option<String>,
    pub insulin: Option<String>,
    pub change: Option<String>,
    #[serde(rename = "diabetesMed")]
    pub diabetes_med: Option<String>,
}

fn parse_choice<T>(raw: Option<String>) -> Result<Option<T>, FormError>
where
    T: std::str::FromStr<Err = FormError>,
{
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

impl PredictRequest {
    /// Validate bounded controls and build the request-scoped record.
    pub fn into_record(self) -> Result<PatientRecord, FormError> {
        Ok(PatientRecord {
            age: parse_choice::<AgeBracket>(self.age)?,
            gender: parse_choice::<Gender>(self.gender)?,
            time_in_hospital: TIME_IN_HOSPITAL.check(self.time_in_hospital)?,
            medical_specialty: parse_choice::<MedicalSpecialty>(self.medical_specialty)?,
            num_lab_procedures: NUM_LAB_PROCEDURES.check(self.num_lab_procedures)?,
            num_procedures: NUM_PROCEDURES.check(self.num_procedures)?,
            num_medications: NUM_MEDICATIONS.check(self.num_medications)?,
            number_diagnoses: NUMBER_DIAGNOSES.check(self.number_diagnoses)?,
            diag_1: self.diag_1,
            diag_2: self.diag_2,
            diag_3: self.diag_3,
            insulin: parse_choice::<InsulinUsage>(self.insulin)?,
            change: parse_choice::<MedicationChange>(self.change)?,
            diabetes_med: parse_choice::<DiabetesMedication>(self.diabetes_med)?,
        })
    }
}

/// Raw `application/x-www-form-urlencoded` body of the HTML form.
///
/// Browsers send every control as text, so slider values arrive as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormSubmission {
    pub age: Option<String>,
    pub gender: Option<String>,
    pub time_in_hospital: Option<String>,
    pub medical_specialty: Option<String>,
    pub num_lab_procedures: Option<String>,
    pub num_procedures: Option<String>,
    pub num_medications: Option<String>,
    pub number_diagnoses: Option<String>,
    pub diag_1: Option<String>,
    pub diag_2: Option<String>,
    pub diag_3: Option<String>,
    pub insulin: Option<String>,
    pub change: Option<String>,
    #[serde(rename = "diabetesMed")]
    pub diabetes_med: Option<String>,
}

impl FormSubmission {
    pub fn into_request(self) -> Result<PredictRequest, FormError> {
        Ok(PredictRequest {
            time_in_hospital: TIME_IN_HOSPITAL.parse(self.time_in_hospital.as_deref())?,
            num_lab_procedures: NUM_LAB_PROCEDURES.parse(self.num_lab_procedures.as_deref())?,
            num_procedures: NUM_PROCEDURES.parse(self.num_procedures.as_deref())?,
            num_medications: NUM_MEDICATIONS.parse(self.num_medications.as_deref())?,
            number_diagnoses: NUMBER_DIAGNOSES.parse(self.number_diagnoses.as_deref())?,
            age: self.age,
            gender: self.gender,
            medical_specialty: self.medical_specialty,
            diag_1: self.diag_1,
            diag_2: self.diag_2,
            diag_3: self.diag_3,
            insulin: self.insulin,
            change: self.change,
            diabetes_med: self.diabetes_med,
        })
    }

    pub fn into_record(self) -> Result<PatientRecord, FormError> {
        self.into_request()?.into_record()
    }

    /// Best-effort record for re-rendering the form after a rejected
    /// submission: valid values are kept, invalid ones fall back to defaults.
    pub fn sticky_record(&self) -> PatientRecord {
        let defaults = PatientRecord::default();
        fn choice<T: std::str::FromStr>(raw: &Option<String>) -> Option<T> {
            raw.as_deref().and_then(|s| s.parse().ok())
        }
        fn slider(s: &Slider, raw: &Option<String>) -> Option<i64> {
            s.parse(raw.as_deref())
                .ok()
                .flatten()
                .filter(|v| (s.min..=s.max).contains(v))
        }

        PatientRecord {
            age: choice(&self.age).or(defaults.age),
            gender: choice(&self.gender).or(defaults.gender),
            time_in_hospital: slider(&TIME_IN_HOSPITAL, &self.time_in_hospital)
                .or(defaults.time_in_hospital),
            medical_specialty: choice(&self.medical_specialty).or(defaults.medical_specialty),
            num_lab_procedures: slider(&NUM_LAB_PROCEDURES, &self.num_lab_procedures)
                .or(defaults.num_lab_procedures),
            num_procedures: slider(&NUM_PROCEDURES, &self.num_procedures)
                .or(defaults.num_procedures),
            num_medications: slider(&NUM_MEDICATIONS, &self.num_medications)
                .or(defaults.num_medications),
            number_diagnoses: slider(&NUMBER_DIAGNOSES, &self.number_diagnoses)
                .or(defaults.number_diagnoses),
            diag_1: self.diag_1.clone().or(defaults.diag_1),
            diag_2: self.diag_2.clone().or(defaults.diag_2),
            diag_3: self.diag_3.clone().or(defaults.diag_3),
            insulin: choice(&self.insulin).or(defaults.insulin),
            change: choice(&self.change).or(defaults.change),
            diabetes_med: choice(&self.diabetes_med).or(defaults.diabetes_med),
        }
    }
}
