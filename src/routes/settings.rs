use axum::{Json, Router, extract::State, routing::get};
use validator::Validate;

use crate::{
    dto::settings::{SettingsResponse, UpdateSettingsRequest},
    error::AppError,
    services::settings_service,
    state::SharedState,
};

/// Voice and template settings.
pub fn router() -> Router<SharedState> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}

/// Return the current voice and template settings.
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses((status = 200, description = "Current settings", body = SettingsResponse))
)]
pub async fn get_settings(State(state): State<SharedState>) -> Json<SettingsResponse> {
    Json(settings_service::settings(&state).await)
}

/// Update the voice and template settings.
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = SettingsResponse),
        (status = 400, description = "Invalid voice or template")
    )
)]
pub async fn update_settings(
    State(state): State<SharedState>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    payload.validate()?;
    Ok(Json(settings_service::update_settings(&state, payload).await?))
}
