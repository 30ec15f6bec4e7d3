use crate::api::ApiError;
use crate::state::{DashboardEngine, DashboardView, RoomLight};
use axum::{
    extract::State,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Shared state for dashboard queries
pub struct DashboardAppState {
    pub engine: Arc<DashboardEngine>,
}

/// Body for PUT /api/rooms/selected
#[derive(Deserialize)]
pub struct SelectRoomRequest {
    pub room: String,
}

/// Create dashboard query router
pub fn create_dashboard_router(state: Arc<DashboardAppState>) -> Router {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/selected", put(select_room))
        .with_state(state)
}

/// GET /api/dashboard - Current patient and every derived display value
async fn get_dashboard(State(state): State<Arc<DashboardAppState>>) -> Json<DashboardView> {
    Json(state.engine.view())
}

/// GET /api/rooms - All rooms with their light state
async fn list_rooms(State(state): State<Arc<DashboardAppState>>) -> Json<Vec<RoomLight>> {
    Json(state.engine.view().lights)
}

/// PUT /api/rooms/selected - Change the room the light controls act on
async fn select_room(
    State(state): State<Arc<DashboardAppState>>,
    Json(request): Json<SelectRoomRequest>,
) -> Result<Json<DashboardView>, ApiError> {
    let view = state.engine.select_room(&request.room)?;
    Ok(Json(view))
}
