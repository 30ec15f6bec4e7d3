// Resident records and mock data generation

pub(crate) mod generator;

pub use generator::{
    generate_light_levels, generate_patients, room_names, COMMON_ROOMS, DAILY_SCHEDULE,
    MEDICAL_CONDITIONS, RESIDENTS,
};

use serde::{Deserialize, Serialize};

/// Number of activity samples kept per resident (one per hour)
pub const HISTORY_LEN: usize = 24;

/// Coarse movement-intensity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Normal,
    Low,
    None,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 3] = [ActivityLevel::Normal, ActivityLevel::Low, ActivityLevel::None];

    /// Relative bar height (percent) in the activity chart
    pub fn bar_height(self) -> u8 {
        match self {
            ActivityLevel::Normal => 100,
            ActivityLevel::Low => 50,
            ActivityLevel::None => 10,
        }
    }

    pub fn bar_class(self) -> &'static str {
        match self {
            ActivityLevel::Normal => "bg-teal-500",
            ActivityLevel::Low => "bg-amber-500",
            ActivityLevel::None => "bg-slate-400",
        }
    }
}

/// Wristband connectivity as reported by the wearable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WristbandStatus {
    Connected,
    Disconnected,
    LowBattery,
}

/// One slot of the fixed daily routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub time: String,
    pub activity: String,
}

/// PatientRecord is the full monitoring snapshot for one resident.
///
/// Field names serialize in camelCase, matching what the dashboard
/// front-end consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Resident identity
    pub patient_id: String,

    /// RFC 3339 timestamp of the last detected movement
    pub last_movement_timestamp: String,

    /// Room the resident is currently in
    pub current_room: String,

    pub is_moving: bool,

    pub activity_level: ActivityLevel,

    pub fall_detected: bool,

    /// Only present while `fall_detected` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fall_location: Option<String>,

    pub daily_step_count: u32,

    /// Hourly activity samples, most recent last
    pub movement_history: [ActivityLevel; HISTORY_LEN],

    pub wristband_status: WristbandStatus,

    /// Battery charge in percent (0-100)
    pub wristband_battery: u8,

    pub medical_conditions: Vec<String>,

    pub daily_schedule: Vec<ScheduleEntry>,
}
