//! HTTP request handlers for the KPI engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler resolves entities through the store, applies the domain
//! operation and maps engine errors onto HTTP statuses. Timestamps enter
//! the domain here (`Utc::now()`), keeping the domain functions pure.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assignment::BatchAssignmentCoordinator;
use crate::error::EngineError;
use crate::lifecycle;
use crate::models::{BonusPenaltyRecord, KpiRecord};
use crate::store::{AdjustmentStore, RecordStore};

use super::request::{
    AdjustmentRequest, BatchAssignRequest, DecisionRequest, ProgressRequest, RewardRequest,
    SubmitRequest,
};
use super::response::{ApiError, ApiErrorResponse, KpiRecordView};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/records/assign", post(assign_handler))
        .route("/records/:id", get(get_record_handler))
        .route("/records/:id/progress", post(progress_handler))
        .route("/records/:id/submit", post(submit_handler))
        .route("/records/:id/decision", post(decision_handler))
        .route("/employees/:id/records", get(list_records_handler))
        .route("/employees/:id/adjustments", get(list_adjustments_handler))
        .route("/rewards/calculate", post(reward_handler))
        .route("/adjustments", post(create_adjustment_handler))
        .route("/adjustments/:id", delete(delete_adjustment_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection onto an API error body.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Unwraps a JSON payload or produces the 400 response for its rejection.
fn require_json<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => Err((
            StatusCode::BAD_REQUEST,
            Json(rejection_error(correlation_id, rejection)),
        )
            .into_response()),
    }
}

/// Loads an active record or produces the 404 response.
fn load_record(state: &AppState, id: Uuid) -> Result<KpiRecord, Response> {
    match state.store().get_record(id) {
        Ok(Some(record)) => Ok(record),
        Ok(None) => {
            let api: ApiErrorResponse = EngineError::not_found("KpiRecord", id.to_string()).into();
            Err(api.into_response())
        }
        Err(err) => {
            let api: ApiErrorResponse = err.into();
            Err(api.into_response())
        }
    }
}

/// Persists a mutated record and responds with its view.
fn store_and_respond(state: &AppState, record: KpiRecord) -> Response {
    if let Err(err) = state.store().update_record(&record) {
        let api: ApiErrorResponse = err.into();
        return api.into_response();
    }
    let view = KpiRecordView::as_of(record, Utc::now().date_naive());
    (StatusCode::OK, Json(view)).into_response()
}

/// Handler for POST /records/assign.
async fn assign_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchAssignRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match require_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        kpi_definition_id = %request.kpi_definition_id,
        candidates = request.employee_ids.len(),
        period = %request.period,
        "Processing batch assignment"
    );

    let store = state.store();
    let coordinator = BatchAssignmentCoordinator::new(store, store, store);
    match coordinator.assign(&request.into(), Utc::now()) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                success_count = outcome.success_count,
                failure_count = outcome.failure_count,
                "Batch assignment completed"
            );
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Batch assignment failed");
            let api: ApiErrorResponse = err.into();
            api.into_response()
        }
    }
}

/// Handler for GET /records/:id.
async fn get_record_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match load_record(&state, id) {
        Ok(record) => {
            let view = KpiRecordView::as_of(record, Utc::now().date_naive());
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(response) => response,
    }
}

/// Handler for POST /records/:id/progress.
async fn progress_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ProgressRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match require_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let mut record = match load_record(&state, id) {
        Ok(record) => record,
        Err(response) => return response,
    };

    match lifecycle::record_progress(&mut record, request.actual, Utc::now()) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %id,
                progress = %record.progress,
                status = record.status.label(),
                "Progress recorded"
            );
            store_and_respond(&state, record)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, record_id = %id, error = %err, "Progress update refused");
            let api: ApiErrorResponse = err.into();
            api.into_response()
        }
    }
}

/// Handler for POST /records/:id/submit.
async fn submit_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match require_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let mut record = match load_record(&state, id) {
        Ok(record) => record,
        Err(response) => return response,
    };

    match lifecycle::submit(
        &mut record,
        request.actual,
        &request.details,
        request.attachment_ref,
        Utc::now(),
    ) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %id,
                progress = %record.progress,
                "Record submitted for approval"
            );
            store_and_respond(&state, record)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, record_id = %id, error = %err, "Submission refused");
            let api: ApiErrorResponse = err.into();
            api.into_response()
        }
    }
}

/// Handler for POST /records/:id/decision.
async fn decision_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match require_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let mut record = match load_record(&state, id) {
        Ok(record) => record,
        Err(response) => return response,
    };

    match lifecycle::decide(
        &mut record,
        request.decision,
        &request.approver_id,
        request.feedback,
        Utc::now(),
    ) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %id,
                status = record.status.label(),
                approver_id = %request.approver_id,
                "Decision recorded"
            );
            store_and_respond(&state, record)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, record_id = %id, error = %err, "Decision refused");
            let api: ApiErrorResponse = err.into();
            api.into_response()
        }
    }
}

/// Handler for GET /employees/:id/records.
async fn list_records_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> impl IntoResponse {
    match state.store().list_records_for_employee(&employee_id) {
        Ok(records) => {
            let today = Utc::now().date_naive();
            let views: Vec<KpiRecordView> = records
                .into_iter()
                .map(|record| KpiRecordView::as_of(record, today))
                .collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => {
            let api: ApiErrorResponse = err.into();
            api.into_response()
        }
    }
}

/// Handler for POST /rewards/calculate.
async fn reward_handler(
    State(state): State<AppState>,
    payload: Result<Json<RewardRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match require_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = state.engine().compute(
        &request.role_code,
        request.period,
        &request.metrics,
        request.supplemental_salary,
    );

    info!(
        correlation_id = %correlation_id,
        role_code = %result.role_code,
        period = %result.period,
        net_amount = %result.net_amount,
        "Reward computed"
    );
    (StatusCode::OK, Json(result)).into_response()
}

/// Handler for POST /adjustments.
async fn create_adjustment_handler(
    State(state): State<AppState>,
    payload: Result<Json<AdjustmentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match require_json(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if request.amount.is_sign_negative() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiError::validation_error("amount must not be negative")),
        )
            .into_response();
    }
    if request.reason.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiError::validation_error("reason must not be empty")),
        )
            .into_response();
    }

    let adjustment = BonusPenaltyRecord::new(
        request.employee_id,
        request.kpi_definition_id,
        request.adjustment_type,
        request.amount,
        request.reason,
        request.period,
        request.created_by,
        Utc::now(),
    );

    match state.store().insert_adjustment(&adjustment) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                adjustment_id = %adjustment.id,
                employee_id = %adjustment.employee_id,
                amount = %adjustment.amount,
                "Adjustment created"
            );
            (StatusCode::CREATED, Json(adjustment)).into_response()
        }
        Err(err) => {
            let api: ApiErrorResponse = err.into();
            api.into_response()
        }
    }
}

/// Handler for GET /employees/:id/adjustments.
async fn list_adjustments_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> impl IntoResponse {
    match state.store().list_adjustments_for_employee(&employee_id) {
        Ok(adjustments) => (StatusCode::OK, Json(adjustments)).into_response(),
        Err(err) => {
            let api: ApiErrorResponse = err.into();
            api.into_response()
        }
    }
}

/// Handler for DELETE /adjustments/:id (soft delete).
async fn delete_adjustment_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut adjustment = match state.store().get_adjustment(id) {
        Ok(Some(adjustment)) => adjustment,
        Ok(None) => {
            let api: ApiErrorResponse =
                EngineError::not_found("BonusPenaltyRecord", id.to_string()).into();
            return api.into_response();
        }
        Err(err) => {
            let api: ApiErrorResponse = err.into();
            return api.into_response();
        }
    };

    adjustment.deactivate(Utc::now());
    match state.store().update_adjustment(&adjustment) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let api: ApiErrorResponse = err.into();
            api.into_response()
        }
    }
}
