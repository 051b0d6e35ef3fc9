//! Training-data upload handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use trainhub_core::error::AppError;
use trainhub_service::training::UploadSummary;
use trainhub_service::training::service::FAILURE_CONTEXT;

use crate::dto::request::UploadTrainingDataRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/method/upload_training_data
pub async fn upload_training_data(
    State(state): State<AppState>,
    payload: Result<Json<UploadTrainingDataRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UploadSummary>>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected upload request body");
        AppError::validation(rejection.body_text()).context(FAILURE_CONTEXT)
    })?;

    let upload = req.into_upload().map_err(|e| {
        tracing::warn!(error = %e, "Rejected upload request");
        e.context(FAILURE_CONTEXT)
    })?;

    let summary = state.training_service.upload(&upload).await?;
    Ok(Json(ApiResponse::ok(summary)))
}
