//! Procedure list endpoint.

use axum::{extract::State, routing::get, Json, Router};

use nailcal_core::Procedure;

use crate::routes::{ApiResponse, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/procedures", get(list_procedures))
}

/// GET /procedures - active procedures only; the booking form never offers
/// retired services
async fn list_procedures(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Procedure>>>, AppError> {
    let procedures = state.store.list_procedures(true).await?;
    Ok(Json(ApiResponse::success(procedures)))
}
