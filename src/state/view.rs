use crate::patient::PatientRecord;
use crate::state::derived::{ActivityBar, StatusIndicator, Tone};
use serde::Serialize;

/// Light state of a single room
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoomLight {
    pub room: String,
    pub level: u8,
    pub on: bool,
}

/// Everything the rendering layer needs for one frame of the dashboard
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Resident currently on screen
    pub patient: PatientRecord,

    /// Local `HH:MM` of the last detected movement
    pub last_seen: String,

    pub step_goal: u32,

    /// Percent of `step_goal`, capped at 100
    pub step_progress: f64,

    pub movement_status: StatusIndicator,
    pub wristband: StatusIndicator,
    pub battery_tone: Tone,
    pub activity_bars: Vec<ActivityBar>,

    /// Room names in display order
    pub rooms: Vec<String>,
    pub selected_room: String,

    /// Level and on/off flag of `selected_room`
    pub light_level: u8,
    pub light_on: bool,

    /// Every room's light, in `rooms` order
    pub lights: Vec<RoomLight>,
}
