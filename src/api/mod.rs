// HTTP and WebSocket APIs

pub mod dashboard;
pub mod lights;
pub mod websocket;

pub use dashboard::{create_dashboard_router, DashboardAppState};
pub use lights::{create_lights_router, LightsAppState};
pub use websocket::{create_ws_router, ws_handler, WsAppState};

use crate::state::{DashboardEngine, DashboardError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    UnknownRoom(String),
    InvalidLightLevel(String),
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        let message = err.to_string();
        match err {
            DashboardError::UnknownRoom(_) => ApiError::UnknownRoom(message),
            DashboardError::InvalidLightLevel(_) => ApiError::InvalidLightLevel(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::UnknownRoom(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InvalidLightLevel(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

/// Full application router: queries, light controls and the WebSocket feed
pub fn create_router(engine: Arc<DashboardEngine>) -> Router {
    Router::new()
        .merge(create_dashboard_router(Arc::new(DashboardAppState {
            engine: Arc::clone(&engine),
        })))
        .merge(create_lights_router(Arc::new(LightsAppState {
            engine: Arc::clone(&engine),
        })))
        .merge(create_ws_router(Arc::new(WsAppState { engine })))
        .layer(CorsLayer::permissive())
}
