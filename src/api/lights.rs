use crate::api::ApiError;
use crate::state::{DashboardEngine, DashboardView, LightInput};
use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use std::sync::Arc;

/// Shared state for the light controls
pub struct LightsAppState {
    pub engine: Arc<DashboardEngine>,
}

/// Body for POST /api/lights/level; `value` is a number or the slider's text value
#[derive(Deserialize)]
pub struct LightLevelRequest {
    pub value: LightInput,
}

/// Create light control router. Every control acts on the selected room.
pub fn create_lights_router(state: Arc<LightsAppState>) -> Router {
    Router::new()
        .route("/api/lights/level", post(set_level))
        .route("/api/lights/toggle", post(toggle))
        .route("/api/lights/night", post(night))
        .with_state(state)
}

/// POST /api/lights/level - Set absolute level (rounded, clamped to 0-100)
async fn set_level(
    State(state): State<Arc<LightsAppState>>,
    Json(request): Json<LightLevelRequest>,
) -> Result<Json<DashboardView>, ApiError> {
    let view = state.engine.set_light_level(&request.value)?;
    Ok(Json(view))
}

/// POST /api/lights/toggle - Off when on, full brightness when off
async fn toggle(State(state): State<Arc<LightsAppState>>) -> Json<DashboardView> {
    Json(state.engine.toggle_light())
}

/// POST /api/lights/night - Night-light preset
async fn night(State(state): State<Arc<LightsAppState>>) -> Json<DashboardView> {
    Json(state.engine.night_light())
}
