//! Patient record and the positional row handed to the classifier.
//!
//! The classifier consumes features by position, so the only place that
//! decides column order is `ModelColumn::ALL`. Everything that feeds the
//! model goes through `PatientRecord::to_model_row()`.

use super::enums::{
    AgeBracket, DiabetesMedication, Gender, InsulinUsage, MedicalSpecialty, MedicationChange,
};

/// Token substituted for any absent field before inference.
pub const UNKNOWN: &str = "Unknown";

/// Number of features the classifier expects.
pub const COLUMN_COUNT: usize = 14;

// ═══════════════════════════════════════════════════════════
// Model columns
// ═══════════════════════════════════════════════════════════

/// One feature column of the trained classifier.
///
/// Discriminants are positions in the model row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelColumn {
    Age = 0,
    Gender = 1,
    TimeInHospital = 2,
    MedicalSpecialty = 3,
    NumLabProcedures = 4,
    NumProcedures = 5,
    NumMedications = 6,
    NumberDiagnoses = 7,
    Diag1 = 8,
    Diag2 = 9,
    Diag3 = 10,
    Insulin = 11,
    Change = 12,
    DiabetesMed = 13,
}

impl ModelColumn {
    /// Model column order. Reordering this silently corrupts predictions.
    pub const ALL: [ModelColumn; COLUMN_COUNT] = [
        ModelColumn::Age,
        ModelColumn::Gender,
        ModelColumn::TimeInHospital,
        ModelColumn::MedicalSpecialty,
        ModelColumn::NumLabProcedures,
        ModelColumn::NumProcedures,
        ModelColumn::NumMedications,
        ModelColumn::NumberDiagnoses,
        ModelColumn::Diag1,
        ModelColumn::Diag2,
        ModelColumn::Diag3,
        ModelColumn::Insulin,
        ModelColumn::Change,
        ModelColumn::DiabetesMed,
    ];

    /// Column name as the classifier was trained with it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::TimeInHospital => "time_in_hospital",
            Self::MedicalSpecialty => "medical_specialty",
            Self::NumLabProcedures => "num_lab_procedures",
            Self::NumProcedures => "num_procedures",
            Self::NumMedications => "num_medications",
            Self::NumberDiagnoses => "number_diagnoses",
            Self::Diag1 => "diag_1",
            Self::Diag2 => "diag_2",
            Self::Diag3 => "diag_3",
            Self::Insulin => "insulin",
            Self::Change => "change",
            Self::DiabetesMed => "diabetesMed",
        }
    }

    /// Whether the classifier expects an integer for this column.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::TimeInHospital
                | Self::NumLabProcedures
                | Self::NumProcedures
                | Self::NumMedications
                | Self::NumberDiagnoses
        )
    }

    /// Model column names in order.
    pub fn names() -> [&'static str; COLUMN_COUNT] {
        Self::ALL.map(|c| c.name())
    }
}

// ═══════════════════════════════════════════════════════════
// Feature values
// ═══════════════════════════════════════════════════════════

/// A single cell of the model row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureValue {
    Integer(i64),
    Text(String),
}

impl FeatureValue {
    pub fn unknown() -> Self {
        FeatureValue::Text(UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, FeatureValue::Text(s) if s == UNKNOWN)
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Integer(n) => write!(f, "{n}"),
            FeatureValue::Text(s) => f.write_str(s),
        }
    }
}

/// Replace every missing cell with `"Unknown"`.
///
/// Idempotent: a row that already went through this is returned unchanged.
pub fn fill_unknown(cells: [Option<FeatureValue>; COLUMN_COUNT]) -> [FeatureValue; COLUMN_COUNT] {
    cells.map(|cell| cell.unwrap_or_else(FeatureValue::unknown))
}

/// One row of classifier input, in model column order, with no gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRow {
    values: [FeatureValue; COLUMN_COUNT],
}

impl ModelRow {
    pub fn new(cells: [Option<FeatureValue>; COLUMN_COUNT]) -> Self {
        Self {
            values: fill_unknown(cells),
        }
    }

    pub fn values(&self) -> &[FeatureValue; COLUMN_COUNT] {
        &self.values
    }

    /// Iterate `(column, value)` pairs in model order.
    pub fn iter(&self) -> impl Iterator<Item = (ModelColumn, &FeatureValue)> {
        ModelColumn::ALL.into_iter().zip(self.values.iter())
    }

    pub fn get(&self, column: ModelColumn) -> &FeatureValue {
        &self.values[column as usize]
    }
}

// ═══════════════════════════════════════════════════════════
// Patient record
// ═══════════════════════════════════════════════════════════

/// Snapshot of the form for one prediction.
///
/// `None` means the value was absent from the submission. `Default` gives
/// the form's initial values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    pub age: Option<AgeBracket>,
    pub gender: Option<Gender>,
    pub time_in_hospital: Option<i64>,
    pub medical_specialty: Option<MedicalSpecialty>,
    pub num_lab_procedures: Option<i64>,
    pub num_procedures: Option<i64>,
    pub num_medications: Option<i64>,
    pub number_diagnoses: Option<i64>,
    pub diag_1: Option<String>,
    pub diag_2: Option<String>,
    pub diag_3: Option<String>,
    pub insulin: Option<InsulinUsage>,
    pub change: Option<MedicationChange>,
    pub diabetes_med: Option<DiabetesMedication>,
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self {
            age: Some(AgeBracket::default()),
            gender: Some(Gender::default()),
            time_in_hospital: Some(3),
            medical_specialty: Some(MedicalSpecialty::default()),
            num_lab_procedures: Some(40),
            num_procedures: Some(1),
            num_medications: Some(10),
            number_diagnoses: Some(3),
            diag_1: Some("250".to_string()),
            diag_2: Some("401".to_string()),
            diag_3: Some("428".to_string()),
            insulin: Some(InsulinUsage::default()),
            change: Some(MedicationChange::default()),
            diabetes_med: Some(DiabetesMedication::default()),
        }
    }
}

impl PatientRecord {
    /// Record with every field absent.
    pub fn empty() -> Self {
        Self {
            age: None,
            gender: None,
            time_in_hospital: None,
            medical_specialty: None,
            num_lab_procedures: None,
            num_procedures: None,
            num_medications: None,
            number_diagnoses: None,
            diag_1: None,
            diag_2: None,
            diag_3: None,
            insulin: None,
            change: None,
            diabetes_med: None,
        }
    }

    /// Value for one model column, `None` when absent.
    pub fn value_of(&self, column: ModelColumn) -> Option<FeatureValue> {
        fn text(s: &str) -> FeatureValue {
            FeatureValue::Text(s.to_string())
        }

        match column {
            ModelColumn::Age => self.age.map(|v| text(v.as_str())),
            ModelColumn::Gender => self.gender.map(|v| text(v.as_str())),
            ModelColumn::TimeInHospital => self.time_in_hospital.map(FeatureValue::Integer),
            ModelColumn::MedicalSpecialty => self.medical_specialty.map(|v| text(v.as_str())),
            ModelColumn::NumLabProcedures => self.num_lab_procedures.map(FeatureValue::Integer),
            ModelColumn::NumProcedures => self.num_procedures.map(FeatureValue::Integer),
            ModelColumn::NumMedications => self.num_medications.map(FeatureValue::Integer),
            ModelColumn::NumberDiagnoses => self.number_diagnoses.map(FeatureValue::Integer),
            ModelColumn::Diag1 => self.diag_1.as_deref().map(text),
            ModelColumn::Diag2 => self.diag_2.as_deref().map(text),
            ModelColumn::Diag3 => self.diag_3.as_deref().map(text),
            ModelColumn::Insulin => self.insulin.map(|v| text(v.as_str())),
            ModelColumn::Change => self.change.map(|v| text(v.as_str())),
            ModelColumn::DiabetesMed => self.diabetes_med.map(|v| text(v.as_str())),
        }
    }

    /// Build the classifier input: model column order, `"Unknown"` for gaps.
    pub fn to_model_row(&self) -> ModelRow {
        ModelRow::new(ModelColumn::ALL.map(|column| self.value_of(column)))
    }
}
