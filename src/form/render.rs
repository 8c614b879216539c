//! HTML rendering: one self-contained page (no external assets).
//!
//! Widgets are laid out in the order users fill them in, which is not the
//! model column order. Column order is applied later by `to_model_row()`.

use super::{
    Slider, NUMBER_DIAGNOSES, NUM_LAB_PROCEDURES, NUM_MEDICATIONS, NUM_PROCEDURES,
    TIME_IN_HOSPITAL,
};
use crate::models::{
    AgeBracket, DiabetesMedication, Gender, InsulinUsage, MedicalSpecialty, MedicationChange,
    PatientRecord,
};
use crate::risk::RiskAssessment;

pub const PAGE_TITLE: &str = "Hospital Readmission Risk Predictor";
pub const PREDICT_BUTTON: &str = "Predict Readmission Risk";

/// What to show below the form.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Prediction rendered.
    Assessment(RiskAssessment),
    /// Submission rejected or inference failed.
    Error(String),
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn select<T: Copy + PartialEq>(
    name: &str,
    label: &str,
    options: &[T],
    selected: Option<T>,
    as_str: fn(&T) -> &'static str,
) -> String {
    let options: String = options
        .iter()
        .map(|opt| {
            let value = escape_html(as_str(opt));
            let attr = if Some(*opt) == selected { " selected" } else { "" };
            format!(r#"<option value="{value}"{attr}>{value}</option>"#)
        })
        .collect();

    format!(
        r#"<label for="{name}">{label}</label>
<select id="{name}" name="{name}">{options}</select>
"#
    )
}

fn slider(spec: &Slider, value: Option<i64>) -> String {
    let value = value.unwrap_or(spec.default);
    format!(
        r#"<label for="{field}">{label}: <output id="{field}_out">{value}</output></label>
<input type="range" id="{field}" name="{field}" min="{min}" max="{max}" step="1" value="{value}" oninput="document.getElementById('{field}_out').value=this.value">
"#,
        field = spec.field,
        label = spec.label,
        min = spec.min,
        max = spec.max,
        value = value,
    )
}

fn text_input(name: &str, label: &str, value: Option<&str>) -> String {
    let value = escape_html(value.unwrap_or(""));
    format!(
        r#"<label for="{name}">{label}</label>
<input type="text" id="{name}" name="{name}" value="{value}">
"#
    )
}

fn render_outcome(outcome: Option<&Outcome>) -> String {
    match outcome {
        None => String::new(),
        Some(Outcome::Assessment(assessment)) => format!(
            r#"<section class="result">
<h2>Result</h2>
<p class="probability">Readmission Probability: <strong>{percentage}</strong></p>
<div class="banner {class}" role="status">{banner}</div>
</section>"#,
            percentage = assessment.percentage(),
            class = assessment.tier.css_class(),
            banner = assessment.banner(),
        ),
        Some(Outcome::Error(message)) => format!(
            r#"<section class="result">
<div class="banner error" role="alert">{}</div>
</section>"#,
            escape_html(message)
        ),
    }
}

/// Render the full page: form pre-filled from `record`, plus the outcome.
pub fn render_page(record: &PatientRecord, outcome: Option<&Outcome>) -> String {
    let fields = [
        select("age", "Age group", AgeBracket::ALL, record.age, AgeBracket::as_str),
        select("gender", "Gender", Gender::ALL, record.gender, Gender::as_str),
        slider(&TIME_IN_HOSPITAL, record.time_in_hospital),
        slider(&NUM_LAB_PROCEDURES, record.num_lab_procedures),
        slider(&NUM_PROCEDURES, record.num_procedures),
        slider(&NUM_MEDICATIONS, record.num_medications),
        slider(&NUMBER_DIAGNOSES, record.number_diagnoses),
        select(
            "medical_specialty",
            "Medical specialty",
            MedicalSpecialty::ALL,
            record.medical_specialty,
            MedicalSpecialty::as_str,
        ),
        text_input("diag_1", "Primary diagnosis (diag_1)", record.diag_1.as_deref()),
        text_input("diag_2", "Secondary diagnosis (diag_2)", record.diag_2.as_deref()),
        text_input("diag_3", "Tertiary diagnosis (diag_3)", record.diag_3.as_deref()),
        select(
            "insulin",
            "Insulin usage",
            InsulinUsage::ALL,
            record.insulin,
            InsulinUsage::as_str,
        ),
        select(
            "change",
            "Medication change during stay",
            MedicationChange::ALL,
            record.change,
            MedicationChange::as_str,
        ),
        select(
            "diabetesMed",
            "On diabetes medication",
            DiabetesMedication::ALL,
            record.diabetes_med,
            DiabetesMedication::as_str,
        ),
    ]
    .concat();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
*,*::before,*::after{{box-sizing:border-box}}
body{{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#fafaf9;color:#1c1917;padding:24px}}
main{{background:#fff;border-radius:16px;box-shadow:0 4px 24px rgba(0,0,0,.08);max-width:640px;margin:0 auto;padding:32px}}
h1{{font-size:1.5rem;margin:0 0 8px}}
.caption{{color:#78716c;font-size:.85rem}}
label{{display:block;font-weight:600;font-size:.9rem;margin:16px 0 6px}}
select,input[type=text]{{width:100%;padding:8px;border:1px solid #d6d3d1;border-radius:8px;font-size:1rem}}
input[type=range]{{width:100%}}
button{{display:block;width:100%;padding:14px;margin-top:24px;border:none;border-radius:12px;font-size:1rem;font-weight:600;background:#2DD4BF;color:#fff;cursor:pointer}}
.result{{margin-top:24px}}
.banner{{padding:14px 16px;border-radius:10px;font-weight:600}}
.risk-high{{background:#fee2e2;color:#991b1b;border:1px solid #fca5a5}}
.risk-moderate{{background:#fef3c7;color:#92400e;border:1px solid #fcd34d}}
.risk-low{{background:#dcfce7;color:#166534;border:1px solid #86efac}}
.error{{background:#fee2e2;color:#7f1d1d;border:1px solid #f87171}}
</style>
</head>
<body>
<main>
<h1>{title}</h1>
<p>Predicts 30-day hospital readmission risk for diabetic patients</p>
<p class="caption">Educational demo only. Not for clinical use.</p>
<form method="post" action="/predict">
{fields}<button type="submit">{button}</button>
</form>
{outcome}
</main>
</body>
</html>"##,
        title = PAGE_TITLE,
        button = PREDICT_BUTTON,
        fields = fields,
        outcome = render_outcome(outcome),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_page_has_form_and_no_result() {
        let html = render_page(&PatientRecord::default(), None);
        assert!(html.contains(PAGE_TITLE));
        assert!(html.contains(PREDICT_BUTTON));
        assert!(html.contains(r#"action="/predict""#));
        assert!(!html.contains("Readmission Probability"));
    }

    #[test]
    fn defaults_are_preselected() {
        let html = render_page(&PatientRecord::default(), None);
        assert!(html.contains(r#"<option value="[0-10)" selected>"#));
        assert!(html.contains(r#"<option value="Male" selected>"#));
        assert!(html.contains(r#"name="time_in_hospital" min="1" max="14" step="1" value="3""#));
        assert!(html.contains(r#"name="diag_1" value="250""#));
    }

    #[test]
    fn every_field_has_a_control() {
        let html = render_page(&PatientRecord::default(), None);
        for name in crate::models::ModelColumn::names() {
            assert!(html.contains(&format!(r#"name="{name}""#)), "missing control {name}");
        }
    }

    #[test]
    fn sliders_carry_their_bounds() {
        let html = render_page(&PatientRecord::default(), None);
        assert!(html.contains(r#"name="num_lab_procedures" min="1" max="120""#));
        assert!(html.contains(r#"name="num_procedures" min="0" max="10""#));
        assert!(html.contains(r#"name="num_medications" min="1" max="60""#));
        assert!(html.contains(r#"name="number_diagnoses" min="1" max="10""#));
    }

    #[test]
    fn assessment_renders_percentage_and_banner() {
        let outcome = Outcome::Assessment(RiskAssessment::new(0.5));
        let html = render_page(&PatientRecord::default(), Some(&outcome));
        assert!(html.contains("<strong>50.00%</strong>"));
        assert!(html.contains(r#"class="banner risk-high""#));
        assert!(html.contains("High risk of 30-day readmission"));
    }

    #[test]
    fn error_is_escaped() {
        let outcome = Outcome::Error("<script>bad</script>".into());
        let html = render_page(&PatientRecord::default(), Some(&outcome));
        assert!(html.contains("&lt;script&gt;bad&lt;/script&gt;"));
        assert!(!html.contains("<script>bad"));
    }

    #[test]
    fn diagnosis_value_is_escaped_in_attribute() {
        let record = PatientRecord {
            diag_2: Some(r#""><b>x"#.into()),
            ..PatientRecord::default()
        };
        let html = render_page(&record, None);
        assert!(html.contains(r#"value="&quot;&gt;&lt;b&gt;x""#));
    }

    #[test]
    fn escape_html_handles_ampersand_first() {
        assert_eq!(escape_html("a&<b>"), "a&amp;&lt;b&gt;");
    }
}
