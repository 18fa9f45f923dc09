use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::doctor::{DoctorConsent, DoctorDecisionSubmission};
use super::domain::{AdvancedInputs, CaseId, FeedbackSubmission, SymptomInput, UserContext};
use super::repository::{AnalyticsSink, Case, CaseStore};
use super::service::{TriageService, TriageServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCaseRequest {
    pub user_context: UserContext,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DropOffRequest {
    pub stage: String,
}

/// Router builder exposing the triage case lifecycle over HTTP.
pub fn triage_router<S, A>(service: Arc<TriageService<S, A>>) -> Router
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    Router::new()
        .route("/api/v1/symptoms", get(catalog_handler::<S, A>))
        .route("/api/v1/cases", post(create_handler::<S, A>))
        .route("/api/v1/cases/:case_id", get(case_handler::<S, A>))
        .route(
            "/api/v1/cases/:case_id/symptoms",
            post(symptoms_handler::<S, A>),
        )
        .route(
            "/api/v1/cases/:case_id/advanced-inputs",
            post(advanced_inputs_handler::<S, A>),
        )
        .route(
            "/api/v1/cases/:case_id/doctor-review",
            post(doctor_review_handler::<S, A>),
        )
        .route(
            "/api/v1/cases/:case_id/doctor-decision",
            post(doctor_decision_handler::<S, A>),
        )
        .route(
            "/api/v1/cases/:case_id/feedback",
            post(feedback_handler::<S, A>),
        )
        .route("/api/v1/analytics/drop-off", post(drop_off_handler::<S, A>))
        .route("/api/v1/admin/stats", get(stats_handler::<S, A>))
        .with_state(service)
}

fn error_response(error: TriageServiceError) -> Response {
    let status = match &error {
        TriageServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        TriageServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        TriageServiceError::Store(_) | TriageServiceError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

fn case_response(status: StatusCode, result: Result<Case, TriageServiceError>) -> Response {
    match result {
        Ok(case) => (status, axum::Json(case.into_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn catalog_handler<S, A>(
    State(service): State<Arc<TriageService<S, A>>>,
) -> Response
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    (StatusCode::OK, axum::Json(service.catalog().entries())).into_response()
}

pub(crate) async fn create_handler<S, A>(
    State(service): State<Arc<TriageService<S, A>>>,
    axum::Json(request): axum::Json<CreateCaseRequest>,
) -> Response
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    case_response(
        StatusCode::CREATED,
        service.create_case(request.user_context),
    )
}

pub(crate) async fn case_handler<S, A>(
    State(service): State<Arc<TriageService<S, A>>>,
    Path(case_id): Path<String>,
) -> Response
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    case_response(StatusCode::OK, service.get(&CaseId(case_id)))
}

pub(crate) async fn symptoms_handler<S, A>(
    State(service): State<Arc<TriageService<S, A>>>,
    Path(case_id): Path<String>,
    axum::Json(input): axum::Json<SymptomInput>,
) -> Response
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    case_response(
        StatusCode::OK,
        service.submit_symptoms(&CaseId(case_id), input),
    )
}

pub(crate) async fn advanced_inputs_handler<S, A>(
    State(service): State<Arc<TriageService<S, A>>>,
    Path(case_id): Path<String>,
    axum::Json(evidence): axum::Json<AdvancedInputs>,
) -> Response
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    case_response(
        StatusCode::OK,
        service.submit_advanced_inputs(&CaseId(case_id), evidence),
    )
}

pub(crate) async fn doctor_review_handler<S, A>(
    State(service): State<Arc<TriageService<S, A>>>,
    Path(case_id): Path<String>,
    axum::Json(consent): axum::Json<DoctorConsent>,
) -> Response
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    case_response(
        StatusCode::OK,
        service.request_doctor_review(&CaseId(case_id), consent),
    )
}

pub(crate) async fn doctor_decision_handler<S, A>(
    State(service): State<Arc<TriageService<S, A>>>,
    Path(case_id): Path<String>,
    axum::Json(submission): axum::Json<DoctorDecisionSubmission>,
) -> Response
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    case_response(
        StatusCode::OK,
        service.record_doctor_decision(&CaseId(case_id), submission),
    )
}

pub(crate) async fn feedback_handler<S, A>(
    State(service): State<Arc<TriageService<S, A>>>,
    Path(case_id): Path<String>,
    axum::Json(submission): axum::Json<FeedbackSubmission>,
) -> Response
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    match service.submit_feedback(&CaseId(case_id), submission) {
        Ok(feedback) => {
            let payload = json!({
                "success": true,
                "feedback": feedback,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn drop_off_handler<S, A>(
    State(service): State<Arc<TriageService<S, A>>>,
    axum::Json(request): axum::Json<DropOffRequest>,
) -> Response
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    match service.record_drop_off(&request.stage) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stats_handler<S, A>(
    State(service): State<Arc<TriageService<S, A>>>,
) -> Response
where
    S: CaseStore + 'static,
    A: AnalyticsSink + 'static,
{
    match service.admin_stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}
