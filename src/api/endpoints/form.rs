//! HTML form endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;

use super::assess_blocking;
use crate::api::types::AppContext;
use crate::form::render::{render_page, Outcome};
use crate::form::FormSubmission;
use crate::models::PatientRecord;

/// `GET /` — the form with default values, no result.
pub async fn index() -> Html<String> {
    Html(render_page(&PatientRecord::default(), None))
}

/// `POST /predict` — "Predict Readmission Risk" trigger.
///
/// Re-renders the form with the submitted values and either the
/// assessment or a visible error. Nothing is kept after the response.
pub async fn submit(
    State(ctx): State<AppContext>,
    Form(submission): Form<FormSubmission>,
) -> Response {
    let sticky = submission.sticky_record();

    let record = match submission.into_record() {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(error = %e, "Form submission rejected");
            let page = render_page(&sticky, Some(&Outcome::Error(e.to_string())));
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
        }
    };

    match assess_blocking(&ctx, &record).await {
        Ok(assessment) => Html(render_page(&record, Some(&Outcome::Assessment(assessment))))
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Prediction failed");
            let page = render_page(&record, Some(&Outcome::Error(err.user_message())));
            (err.status(), Html(page)).into_response()
        }
    }
}
