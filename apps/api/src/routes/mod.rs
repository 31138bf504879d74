pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::history::handlers as history;
use crate::profiles::handlers as profiles;
use crate::render::handlers as export;
use crate::settings::handlers as settings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profiles",
            get(profiles::handle_list_profiles).post(profiles::handle_save_profile),
        )
        .route(
            "/api/v1/profiles/:name",
            get(profiles::handle_get_profile).delete(profiles::handle_delete_profile),
        )
        .route(
            "/api/v1/profiles/:name/:section",
            post(profiles::handle_add_item),
        )
        .route(
            "/api/v1/profiles/:name/:section/:index",
            put(profiles::handle_replace_item).delete(profiles::handle_remove_item),
        )
        // Generation API
        .route("/api/v1/resumes/analyze", post(generation::handle_analyze))
        .route("/api/v1/resumes/generate", post(generation::handle_generate))
        .route("/api/v1/resumes/story", post(generation::handle_story))
        // History API
        .route("/api/v1/history", get(history::handle_list_history))
        .route(
            "/api/v1/history/:index",
            get(history::handle_get_history_entry)
                .patch(history::handle_update_history_entry)
                .delete(history::handle_delete_history_entry),
        )
        .route(
            "/api/v1/history/:index/export/:format",
            get(export::handle_export_history_entry),
        )
        // Export API
        .route("/api/v1/export/:format", post(export::handle_export))
        // Settings API
        .route(
            "/api/v1/settings/api-key",
            get(settings::handle_get_api_key).put(settings::handle_set_api_key),
        )
        .with_state(state)
}
