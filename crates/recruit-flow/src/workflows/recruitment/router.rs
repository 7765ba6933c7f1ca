use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::admission::{
    admit_application, admit_candidate, admit_job, ApplicationSubmission, CandidateSubmission,
    JobSubmission,
};
use super::repository::RecordStore;
use super::service::{RecruitmentError, RecruitmentService};

/// Router exposing candidate, job, and application endpoints under `/api`.
pub fn recruitment_router<S>(service: Arc<RecruitmentService<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route("/api/candidates", post(create_candidate_handler::<S>))
        .route("/api/jobs", post(create_job_handler::<S>))
        .route(
            "/api/applications",
            post(create_application_handler::<S>).get(list_applications_handler::<S>),
        )
        .route(
            "/api/applications/:id/shortlist",
            patch(shortlist_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListApplicationsQuery {
    #[serde(rename = "jobId")]
    pub(crate) job_id: Option<String>,
}

pub(crate) async fn create_candidate_handler<S>(
    State(service): State<Arc<RecruitmentService<S>>>,
    body: Result<Json<CandidateSubmission>, JsonRejection>,
) -> Response
where
    S: RecordStore + 'static,
{
    let Json(submission) = match body {
        Ok(body) => body,
        Err(rejection) => return malformed_body(rejection),
    };

    let result = admit_candidate(&submission)
        .map_err(RecruitmentError::from)
        .and_then(|candidate| service.create_candidate(candidate));

    match result {
        Ok(candidate) => (StatusCode::CREATED, Json(candidate)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn create_job_handler<S>(
    State(service): State<Arc<RecruitmentService<S>>>,
    body: Result<Json<JobSubmission>, JsonRejection>,
) -> Response
where
    S: RecordStore + 'static,
{
    let Json(submission) = match body {
        Ok(body) => body,
        Err(rejection) => return malformed_body(rejection),
    };

    let result = admit_job(&submission)
        .map_err(RecruitmentError::from)
        .and_then(|job| service.create_job(job));

    match result {
        Ok(job) => (StatusCode::CREATED, Json(job)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn create_application_handler<S>(
    State(service): State<Arc<RecruitmentService<S>>>,
    body: Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    S: RecordStore + 'static,
{
    let Json(submission) = match body {
        Ok(body) => body,
        Err(rejection) => return malformed_body(rejection),
    };

    let result = admit_application(&submission)
        .map_err(RecruitmentError::from)
        .and_then(|request| {
            service.create_application(&request.candidate_id, &request.job_id)
        });

    match result {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn list_applications_handler<S>(
    State(service): State<Arc<RecruitmentService<S>>>,
    query: Result<Query<ListApplicationsQuery>, QueryRejection>,
) -> Response
where
    S: RecordStore + 'static,
{
    let job_id = query
        .ok()
        .and_then(|Query(query)| query.job_id)
        .filter(|job_id| !job_id.trim().is_empty());

    let Some(job_id) = job_id else {
        return error_body(StatusCode::BAD_REQUEST, "jobId query parameter is required");
    };

    match service.list_applications_by_job(&job_id) {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn shortlist_handler<S>(
    State(service): State<Arc<RecruitmentService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: RecordStore + 'static,
{
    if id.trim().is_empty() {
        return error_body(StatusCode::BAD_REQUEST, "id param is required");
    }

    match service.shortlist_application(&id) {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(err) => err.into_response(),
    }
}

fn malformed_body(rejection: JsonRejection) -> Response {
    error_body(StatusCode::BAD_REQUEST, &rejection.body_text())
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl RecruitmentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecruitmentError::Validation(_)
            | RecruitmentError::InvalidIdentifier { .. }
            | RecruitmentError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
            RecruitmentError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecruitmentError::Internal(_) | RecruitmentError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RecruitmentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            RecruitmentError::Repository(source) => {
                error!(error = %source, "record store failure");
                error_body(status, "Internal Server Error")
            }
            _ => error_body(status, &self.to_string()),
        }
    }
}
