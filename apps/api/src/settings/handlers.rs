use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::settings::ApiKeyStatus;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetApiKeyRequest {
    pub api_key: String,
}

/// GET /api/v1/settings/api-key
pub async fn handle_get_api_key(State(state): State<AppState>) -> Json<ApiKeyStatus> {
    Json(ApiKeyStatus::from_key(state.api_key.get().as_deref()))
}

/// PUT /api/v1/settings/api-key
///
/// Persists the key and swaps it into the live client; no restart needed.
pub async fn handle_set_api_key(
    State(state): State<AppState>,
    Json(request): Json<SetApiKeyRequest>,
) -> Result<Json<ApiKeyStatus>, AppError> {
    let key = request.api_key.trim();
    if key.is_empty() {
        return Err(AppError::Validation("api_key cannot be empty".to_string()));
    }

    state.settings.set_api_key(key).await?;
    state.api_key.set(key.to_string());

    Ok(Json(ApiKeyStatus::from_key(Some(key))))
}
