//! Client list and quick-add endpoints.

use axum::{extract::State, routing::get, Json, Router};

use nailcal_core::{Client, NewClient, SalonError};

use crate::routes::{ApiResponse, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/clients", get(list_clients).post(create_client))
}

/// GET /clients
async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Client>>>, AppError> {
    let mut clients = state.store.list_clients().await?;
    clients.sort_by(|a, b| a.full_name().cmp(&b.full_name()));
    Ok(Json(ApiResponse::success(clients)))
}

/// POST /clients - quick-add from the booking form
async fn create_client(
    State(state): State<AppState>,
    Json(new): Json<NewClient>,
) -> Result<Json<ApiResponse<Client>>, AppError> {
    if new.first_name.trim().is_empty() {
        return Err(SalonError::Validation("The client needs a first name".into()).into());
    }
    if new.phone.trim().is_empty() {
        return Err(SalonError::Validation("The client needs a phone number".into()).into());
    }

    let client = state.store.create_client(&new).await?;
    Ok(Json(ApiResponse::success(client)))
}
