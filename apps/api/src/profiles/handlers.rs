//! Axum route handlers for the Profile API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::Profile;
use crate::profiles::items::{apply_item_change, ItemChange, ProfileSection};
use crate::profiles::SavedProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    pub profile_name: String,
    pub profile: Profile,
    #[serde(default)]
    pub replace: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profiles
pub async fn handle_list_profiles(
    State(state): State<AppState>,
) -> Result<Json<ProfileListResponse>, AppError> {
    let profiles = state.profiles.list().await?;
    Ok(Json(ProfileListResponse { profiles }))
}

/// POST /api/v1/profiles
///
/// Saves under a cleaned name. A collision yields `<name>_v2`, `<name>_v3`, …
/// unless `replace` is set; the response carries the name actually used.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Json(request): Json<SaveProfileRequest>,
) -> Result<(StatusCode, Json<SavedProfile>), AppError> {
    request.profile.validate().map_err(AppError::Validation)?;
    let saved = state
        .profiles
        .save(&request.profile_name, &request.profile, request.replace)
        .await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/profiles/:name
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.profiles.load(&name).await?))
}

/// DELETE /api/v1/profiles/:name
pub async fn handle_delete_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.profiles.delete(&name).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Profile '{name}' not found")))
    }
}

/// POST /api/v1/profiles/:name/:section
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path((name, section)): Path<(String, ProfileSection)>,
    Json(item): Json<Value>,
) -> Result<Json<Profile>, AppError> {
    mutate_and_save(&state, &name, section, ItemChange::Add(item)).await
}

/// PUT /api/v1/profiles/:name/:section/:index
pub async fn handle_replace_item(
    State(state): State<AppState>,
    Path((name, section, index)): Path<(String, ProfileSection, usize)>,
    Json(item): Json<Value>,
) -> Result<Json<Profile>, AppError> {
    mutate_and_save(&state, &name, section, ItemChange::Replace(index, item)).await
}

/// DELETE /api/v1/profiles/:name/:section/:index
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((name, section, index)): Path<(String, ProfileSection, usize)>,
) -> Result<Json<Profile>, AppError> {
    mutate_and_save(&state, &name, section, ItemChange::Remove(index)).await
}

/// Load → mutate → overwrite the same file.
async fn mutate_and_save(
    state: &AppState,
    name: &str,
    section: ProfileSection,
    change: ItemChange,
) -> Result<Json<Profile>, AppError> {
    let mut profile = state.profiles.load(name).await?;
    let count = apply_item_change(&mut profile, section, change)?;
    state.profiles.save(name, &profile, true).await?;
    tracing::info!("Auto-saved profile '{name}' ({section}: {count} item(s))");
    Ok(Json(profile))
}
