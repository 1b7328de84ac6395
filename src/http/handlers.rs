//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    ConsultationDto, CreateConsultationRequest, CreatePatientRequest, HealthResponse, PatientDto,
    UpdateConsultationRequest, UpdatePatientRequest,
};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the database
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = if state.database_healthy().await {
        "connected".to_string()
    } else {
        "disconnected".to_string()
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Patients
// =============================================================================

/// POST /patient
///
/// Register a new patient.
pub async fn create_patient(
    State(state): State<AppState>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<PatientDto>), AppError> {
    let patient = state.patients.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(patient.into())))
}

/// GET /patient
///
/// List all registered patients.
pub async fn list_patients(State(state): State<AppState>) -> HandlerResult<Vec<PatientDto>> {
    let patients = state.patients.get_all().await?;
    Ok(Json(patients.into_iter().map(Into::into).collect()))
}

/// GET /patient/{id}
///
/// Retrieve a patient by id.
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<PatientDto> {
    let patient = state.patients.get_by_id(id).await?;
    Ok(Json(patient.into()))
}

/// PATCH /patient/{id}
///
/// Partially update a patient.
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePatientRequest>,
) -> HandlerResult<PatientDto> {
    let patient = state.patients.update(id, request.into()).await?;
    Ok(Json(patient.into()))
}

/// DELETE /patient/{id}
///
/// Remove a patient by id.
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.patients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Consultations
// =============================================================================

/// POST /consultation
///
/// Schedule a new consultation.
pub async fn create_consultation(
    State(state): State<AppState>,
    Json(request): Json<CreateConsultationRequest>,
) -> Result<(StatusCode, Json<ConsultationDto>), AppError> {
    let consultation = state.consultations.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(consultation.into())))
}

/// GET /consultation
///
/// List all scheduled consultations.
pub async fn list_consultations(
    State(state): State<AppState>,
) -> HandlerResult<Vec<ConsultationDto>> {
    let consultations = state.consultations.get_all().await?;
    Ok(Json(consultations.into_iter().map(Into::into).collect()))
}

/// GET /consultation/date/{date}
///
/// List all consultations on a given date.
pub async fn list_consultations_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> HandlerResult<Vec<ConsultationDto>> {
    let consultations = state.consultations.get_by_date(&date).await?;
    Ok(Json(consultations.into_iter().map(Into::into).collect()))
}

/// GET /consultation/{id}
///
/// Retrieve a consultation by id.
pub async fn get_consultation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ConsultationDto> {
    let consultation = state.consultations.get_by_id(id).await?;
    Ok(Json(consultation.into()))
}

/// PATCH /consultation/{id}
///
/// Partially update a consultation.
pub async fn update_consultation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateConsultationRequest>,
) -> HandlerResult<ConsultationDto> {
    let consultation = state.consultations.update(id, request.into()).await?;
    Ok(Json(consultation.into()))
}

/// DELETE /consultation/{id}
///
/// Remove a consultation by id.
pub async fn delete_consultation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.consultations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
