//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::analysis::AnalysisError;
use crate::data;
use crate::web::auth::{AuthResponse, LoginRequest, SignupRequest};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        submit_analysis_handler,
        list_analyses_handler,
        get_analysis_handler,
        delete_analysis_handler,
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
    ),
    components(
        schemas(SubmitAnalysisRequest, ErrorResponse, AuthResponse, SignupRequest, LoginRequest)
    ),
    tags(
        (name = "TrendLens API", description = "API endpoints for the campaign and website-analysis dashboard.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The submission payload for a new website analysis.
#[derive(Deserialize, ToSchema)]
pub struct SubmitAnalysisRequest {
    pub url: String,
}

/// The inline error payload for rejected requests.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn not_found(what: &str, id: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse { error: format!("{} {} not found", what, id) }),
    )
}

//=========================================================================================
// Website Analysis Handlers
//=========================================================================================

/// Submit a website URL for analysis.
///
/// Returns the record immediately in the `analyzing` state; clients poll
/// `GET /analyses/{id}` until the status turns terminal.
#[utoipa::path(
    post,
    path = "/analyses",
    request_body = SubmitAnalysisRequest,
    responses(
        (status = 201, description = "Analysis accepted and started"),
        (status = 400, description = "The submitted URL is not a valid absolute URL", body = ErrorResponse)
    )
)]
pub async fn submit_analysis_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitAnalysisRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match state.analysis.submit(&req.url).await {
        Ok(record) => Ok((StatusCode::CREATED, Json(record))),
        Err(e @ AnalysisError::InvalidUrl(_)) => {
            Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })))
        }
    }
}

/// List all analyses, most recently submitted first.
#[utoipa::path(
    get,
    path = "/analyses",
    responses((status = 200, description = "Analysis history"))
)]
pub async fn list_analyses_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.analysis.list_all().await)
}

/// Fetch one analysis by id. This is the poll target while a submission
/// is still `analyzing`.
#[utoipa::path(
    get,
    path = "/analyses/{id}",
    params(("id" = String, Path, description = "The analysis id")),
    responses(
        (status = 200, description = "The analysis record"),
        (status = 404, description = "No such analysis", body = ErrorResponse)
    )
)]
pub async fn get_analysis_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match state.analysis.get(&id).await {
        Some(record) => Ok(Json(record)),
        None => Err(not_found("Analysis", &id)),
    }
}

/// Delete an analysis; a still-pending completion is cancelled.
#[utoipa::path(
    delete,
    path = "/analyses/{id}",
    params(("id" = String, Path, description = "The analysis id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such analysis", body = ErrorResponse)
    )
)]
pub async fn delete_analysis_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    if state.analysis.delete(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Analysis", &id))
    }
}

//=========================================================================================
// Brand Dashboard Fixture Handlers
//=========================================================================================

pub async fn list_campaigns_handler() -> impl IntoResponse {
    Json(data::campaigns())
}

pub async fn get_campaign_handler(
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    data::campaigns()
        .into_iter()
        .find(|c| c.id == id)
        .map(Json)
        .ok_or_else(|| not_found("Campaign", &id))
}

pub async fn list_creatives_handler() -> impl IntoResponse {
    Json(data::creatives())
}

pub async fn get_creative_handler(
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    data::creatives()
        .into_iter()
        .find(|c| c.id == id)
        .map(Json)
        .ok_or_else(|| not_found("Creative", &id))
}

pub async fn performance_handler() -> impl IntoResponse {
    Json(data::performance_series())
}

pub async fn ab_tests_handler() -> impl IntoResponse {
    Json(data::ab_test_results())
}
