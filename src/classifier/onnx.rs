use std::path::Path;
use std::sync::Mutex;

use ort::session::{Session, SessionInputValue};
use ort::value::Tensor;

use super::{ClassifierError, ReadmissionClassifier};
use crate::models::{FeatureValue, ModelColumn, ModelRow};

/// Readmission classifier evaluated with ONNX Runtime.
///
/// The graph must declare one input per model column, named and ordered
/// as `ModelColumn::ALL`, each shaped `[1, 1]`: `i64` for the numeric
/// columns, string for the rest. The positive-class probability is read
/// from element `[0, 1]` of the configured probability output.
///
/// Uses interior mutability (Mutex) because ort::Session::run requires `&mut self`
/// but `ReadmissionClassifier` exposes `&self` for sharing across requests.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    probability_output: String,
}

impl OnnxClassifier {
    /// Load and validate an ONNX classifier.
    pub fn load(model_path: &Path, probability_output: &str) -> Result<Self, ClassifierError> {
        if !model_path.exists() {
            return Err(ClassifierError::ModelNotFound(model_path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .with_intra_threads(1)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(format!("ONNX load failed: {e}")))?;

        let found: Vec<String> = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .collect();
        let expected: Vec<String> = ModelColumn::names().iter().map(|n| n.to_string()).collect();
        if found != expected {
            return Err(ClassifierError::SchemaMismatch { expected, found });
        }

        let has_output = session
            .outputs()
            .iter()
            .any(|output| output.name() == probability_output);
        if !has_output {
            return Err(ClassifierError::ModelInit(format!(
                "Model has no output named '{probability_output}'"
            )));
        }

        tracing::info!(
            path = %model_path.display(),
            inputs = expected.len(),
            output = probability_output,
            "ONNX classifier loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            probability_output: probability_output.to_string(),
        })
    }

    /// Build one `[1, 1]` tensor for a cell, typed by its column.
    fn cell_tensor(
        column: ModelColumn,
        value: &FeatureValue,
    ) -> Result<SessionInputValue<'static>, ClassifierError> {
        let to_err = |e: ort::Error| ClassifierError::Inference(format!("{}: {e}", column.name()));

        match (column.is_numeric(), value) {
            (true, FeatureValue::Integer(n)) => {
                let array = ndarray::Array2::from_elem((1, 1), *n);
                Ok(Tensor::from_array(array).map_err(to_err)?.into())
            }
            (true, FeatureValue::Text(s)) => Err(ClassifierError::Inference(format!(
                "column '{}' expects an integer, got '{s}'",
                column.name()
            ))),
            (false, value) => {
                let array = ndarray::Array2::from_elem((1, 1), value.to_string());
                Ok(Tensor::from_string_array(&array).map_err(to_err)?.into())
            }
        }
    }
}

impl ReadmissionClassifier for OnnxClassifier {
    fn predict_proba(&self, row: &ModelRow) -> Result<f64, ClassifierError> {
        let inputs = row
            .iter()
            .map(|(column, value)| Ok((column.name(), Self::cell_tensor(column, value)?)))
            .collect::<Result<Vec<_>, ClassifierError>>()?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::Inference("Session lock poisoned".to_string()))?;

        let outputs = session
            .run(inputs)
            .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

        let probabilities = outputs.get(self.probability_output.as_str()).ok_or_else(|| {
            ClassifierError::Inference(format!("Missing output '{}'", self.probability_output))
        })?;

        // Output shape: [1, 2], column 1 is the positive class
        let (shape, data) = probabilities
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("Output extraction: {e}")))?;

        if shape.len() != 2 || shape[0] != 1 || shape[1] != 2 {
            return Err(ClassifierError::Inference(format!(
                "Unexpected output shape: {shape:?}, expected [1, 2]"
            )));
        }

        Ok(super::widen_probability(data[1]))
    }

    fn backend(&self) -> &'static str {
        "onnx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatientRecord;
    use crate::predictor;
    use crate::risk::RiskTier;

    // Minimal protobuf writer for fixture graphs (onnx.proto field numbers).

    fn varint(out: &mut Vec<u8>, mut v: u64) {
        while v >= 0x80 {
            out.push((v as u8) | 0x80);
            v >>= 7;
        }
        out.push(v as u8);
    }

    fn int_field(out: &mut Vec<u8>, field: u64, v: u64) {
        varint(out, field << 3);
        varint(out, v);
    }

    fn bytes_field(out: &mut Vec<u8>, field: u64, data: &[u8]) {
        varint(out, (field << 3) | 2);
        varint(out, data.len() as u64);
        out.extend_from_slice(data);
    }

    const ELEM_FLOAT: u64 = 1;
    const ELEM_INT64: u64 = 7;
    const ELEM_STRING: u64 = 8;
    const ATTR_TENSOR: u64 = 4;

    fn value_info(name: &str, elem_type: u64, dims: &[u64]) -> Vec<u8> {
        let mut shape = Vec::new();
        for d in dims {
            let mut dim = Vec::new();
            int_field(&mut dim, 1, *d);
            bytes_field(&mut shape, 1, &dim);
        }
        let mut tensor_type = Vec::new();
        int_field(&mut tensor_type, 1, elem_type);
        bytes_field(&mut tensor_type, 2, &shape);
        let mut type_proto = Vec::new();
        bytes_field(&mut type_proto, 1, &tensor_type);

        let mut info = Vec::new();
        bytes_field(&mut info, 1, name.as_bytes());
        bytes_field(&mut info, 2, &type_proto);
        info
    }

    /// A graph declaring `inputs` (typed by column) whose only node is a
    /// `Constant` emitting `values` as a `[1, values.len()]` float tensor.
    fn fixture_model(inputs: &[&str], output: &str, values: &[f32]) -> Vec<u8> {
        let dims = [1, values.len() as u64];

        let mut tensor = Vec::new();
        for d in dims {
            int_field(&mut tensor, 1, d);
        }
        int_field(&mut tensor, 2, ELEM_FLOAT);
        let floats: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        bytes_field(&mut tensor, 4, &floats);

        let mut attr = Vec::new();
        bytes_field(&mut attr, 1, b"value");
        bytes_field(&mut attr, 5, &tensor);
        int_field(&mut attr, 20, ATTR_TENSOR);

        let mut node = Vec::new();
        bytes_field(&mut node, 2, output.as_bytes());
        bytes_field(&mut node, 3, b"fixed_probabilities");
        bytes_field(&mut node, 4, b"Constant");
        bytes_field(&mut node, 5, &attr);

        let mut graph = Vec::new();
        bytes_field(&mut graph, 1, &node);
        bytes_field(&mut graph, 2, b"readmission_fixture");
        for name in inputs {
            let numeric = ModelColumn::ALL
                .iter()
                .any(|c| c.name() == *name && c.is_numeric());
            let elem = if numeric { ELEM_INT64 } else { ELEM_STRING };
            bytes_field(&mut graph, 11, &value_info(name, elem, &[1, 1]));
        }
        bytes_field(&mut graph, 12, &value_info(output, ELEM_FLOAT, &dims));

        let mut opset = Vec::new();
        bytes_field(&mut opset, 1, b"");
        int_field(&mut opset, 2, 13);

        let mut model = Vec::new();
        int_field(&mut model, 1, 8);
        bytes_field(&mut model, 2, b"readmission-tests");
        bytes_field(&mut model, 7, &graph);
        bytes_field(&mut model, 8, &opset);
        model
    }

    fn load_fixture(
        inputs: &[&str],
        output: &str,
        values: &[f32],
    ) -> Result<OnnxClassifier, ClassifierError> {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("model.onnx");
        std::fs::write(&path, fixture_model(inputs, output, values)).unwrap();
        OnnxClassifier::load(&path, "probabilities")
    }

    #[test]
    fn unknown_in_numeric_column_is_inference_error() {
        let result =
            OnnxClassifier::cell_tensor(ModelColumn::TimeInHospital, &FeatureValue::unknown());
        match result {
            Err(ClassifierError::Inference(msg)) => {
                assert!(msg.contains("time_in_hospital"));
                assert!(msg.contains("Unknown"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("text accepted in a numeric column"),
        }
    }

    #[test]
    fn cells_are_typed_by_column() {
        let cells = [
            (ModelColumn::NumProcedures, FeatureValue::Integer(1)),
            (ModelColumn::Gender, FeatureValue::unknown()),
            (ModelColumn::Diag1, FeatureValue::Text("250".into())),
        ];
        for (column, value) in &cells {
            assert!(OnnxClassifier::cell_tensor(*column, value).is_ok(), "{column:?}");
        }
    }

    #[test]
    fn inputs_out_of_order_are_a_schema_mismatch() {
        let mut names = ModelColumn::names();
        names.swap(0, 1);

        match load_fixture(&names, "probabilities", &[0.5, 0.5]) {
            Err(ClassifierError::SchemaMismatch { expected, found }) => {
                assert_eq!(expected[0], "age");
                assert_eq!(found[0], "gender");
                assert_eq!(found.len(), 14);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("misordered inputs accepted"),
        }
    }

    #[test]
    fn missing_column_is_a_schema_mismatch() {
        let names = ModelColumn::names();
        assert!(matches!(
            load_fixture(&names[..13], "probabilities", &[0.5, 0.5]),
            Err(ClassifierError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn missing_probability_output_fails_to_load() {
        match load_fixture(&ModelColumn::names(), "label", &[0.5, 0.5]) {
            Err(ClassifierError::ModelInit(msg)) => assert!(msg.contains("probabilities")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("model without probability output accepted"),
        }
    }

    #[test]
    fn reads_positive_class_and_keeps_threshold_tier() {
        let model = load_fixture(&ModelColumn::names(), "probabilities", &[0.65, 0.35]).unwrap();
        assert_eq!(model.backend(), "onnx");

        let row = PatientRecord::default().to_model_row();
        assert_eq!(model.predict_proba(&row).unwrap(), 0.35);

        let assessment = predictor::assess(&model, &PatientRecord::default()).unwrap();
        assert_eq!(assessment.tier, RiskTier::High);
        assert_eq!(assessment.percentage(), "35.00%");
    }

    #[test]
    fn unexpected_output_shape_is_inference_error() {
        let model =
            load_fixture(&ModelColumn::names(), "probabilities", &[0.2, 0.3, 0.5]).unwrap();
        let row = PatientRecord::default().to_model_row();
        match model.predict_proba(&row) {
            Err(ClassifierError::Inference(msg)) => {
                assert!(msg.contains("Unexpected output shape"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_numeric_value_fails_inference() {
        let model = load_fixture(&ModelColumn::names(), "probabilities", &[0.9, 0.1]).unwrap();
        let record = PatientRecord {
            num_medications: None,
            ..PatientRecord::default()
        };
        match model.predict_proba(&record.to_model_row()) {
            Err(ClassifierError::Inference(msg)) => assert!(msg.contains("num_medications")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
