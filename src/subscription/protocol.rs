use crate::state::{DashboardView, LightInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client → Server: viewer controls
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "select_room")]
    SelectRoom { room: String },
    #[serde(rename = "set_light_level")]
    SetLightLevel { value: LightInput },
    #[serde(rename = "toggle_light")]
    ToggleLight,
    #[serde(rename = "night_light")]
    NightLight,
}

/// Server → Client: Dashboard update notification
#[derive(Debug, Clone, Serialize)]
pub struct DashboardUpdateMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub view: DashboardView,
    pub timestamp: DateTime<Utc>,
}

impl From<DashboardView> for DashboardUpdateMessage {
    fn from(view: DashboardView) -> Self {
        Self {
            msg_type: "dashboard_update".to_string(),
            view,
            timestamp: Utc::now(),
        }
    }
}

/// Server → Client: Error message
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub error: String,
}

impl ErrorMessage {
    pub fn new(error: String) -> Self {
        Self {
            msg_type: "error".to_string(),
            error,
        }
    }
}
