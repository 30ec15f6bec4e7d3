use crate::patient::PatientRecord;
use crate::state::derived::{
    activity_bars, battery_tone, is_light_on, last_seen, movement_indicator, step_progress,
    wristband_indicator,
};
use crate::state::view::{DashboardView, RoomLight};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Level forced on a room when its occupant is seen moving
pub const AUTO_LIGHT_LEVEL: u8 = 85;

/// Night-light preset
pub const NIGHT_LIGHT_LEVEL: u8 = 15;

pub const FULL_LIGHT_LEVEL: u8 = 100;

/// Errors from viewer controls. State is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    UnknownRoom(String),
    InvalidLightLevel(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::UnknownRoom(room) => write!(f, "unknown room '{}'", room),
            DashboardError::InvalidLightLevel(raw) => {
                write!(f, "light level must be numeric, got '{}'", raw)
            }
        }
    }
}

impl std::error::Error for DashboardError {}

/// Raw value from the light slider: a JSON number or the input's text value.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LightInput {
    Number(f64),
    Text(String),
}

impl LightInput {
    /// Coerce to a level in 0..=100. Non-numeric and non-finite input yields None.
    pub fn coerce(&self) -> Option<u8> {
        let value = match self {
            LightInput::Number(n) => *n,
            LightInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };

        if !value.is_finite() {
            return None;
        }

        Some(value.round().clamp(0.0, f64::from(FULL_LIGHT_LEVEL)) as u8)
    }
}

impl fmt::Display for LightInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightInput::Number(n) => write!(f, "{}", n),
            LightInput::Text(s) => f.write_str(s),
        }
    }
}

/// Dashboard holds the displayed resident, per-room lights and the selected room.
///
/// All mutation goes through `&mut self`; publishing a record runs the
/// auto-light hook before returning, so any read afterwards already sees it.
#[derive(Clone, Debug)]
pub struct Dashboard {
    current: PatientRecord,
    rooms: Vec<String>,
    lights: HashMap<String, u8>,
    selected_room: String,
    step_goal: u32,
}

impl Dashboard {
    /// Build the store around the first displayed record.
    ///
    /// Rooms missing from `lights` start dark. The selected room starts as the
    /// resident's current room when it is known, otherwise the first room.
    pub fn new(
        initial: PatientRecord,
        rooms: Vec<String>,
        mut lights: HashMap<String, u8>,
        step_goal: u32,
    ) -> Self {
        for room in &rooms {
            lights.entry(room.clone()).or_insert(0);
        }
        lights.retain(|room, _| rooms.contains(room));

        let selected_room = if rooms.contains(&initial.current_room) {
            initial.current_room.clone()
        } else {
            rooms.first().cloned().unwrap_or_default()
        };

        let mut dashboard = Self {
            current: initial,
            rooms,
            lights,
            selected_room,
            step_goal,
        };
        dashboard.after_publish();
        dashboard
    }

    pub fn current(&self) -> &PatientRecord {
        &self.current
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn selected_room(&self) -> &str {
        &self.selected_room
    }

    pub fn step_goal(&self) -> u32 {
        self.step_goal
    }

    pub fn light_level(&self, room: &str) -> Option<u8> {
        self.lights.get(room).copied()
    }

    pub fn selected_light_level(&self) -> u8 {
        self.light_level(&self.selected_room).unwrap_or(0)
    }

    /// Replace the displayed record and run the post-publish hook.
    pub fn publish_record(&mut self, record: PatientRecord) {
        self.current = record;
        self.after_publish();
    }

    /// Auto-light reaction: movement in a room turns its light on.
    fn after_publish(&mut self) {
        if !self.current.is_moving {
            return;
        }

        let room = &self.current.current_room;
        match self.lights.get_mut(room) {
            Some(level) => {
                *level = AUTO_LIGHT_LEVEL;
                debug!(room = %room, level = AUTO_LIGHT_LEVEL, "Movement detected, light on");
            }
            None => warn!(room = %room, "Movement reported in unknown room"),
        }
    }

    pub fn select_room(&mut self, room: &str) -> Result<(), DashboardError> {
        if !self.lights.contains_key(room) {
            return Err(DashboardError::UnknownRoom(room.to_string()));
        }
        self.selected_room = room.to_string();
        Ok(())
    }

    /// Set the selected room's light from a control input, clamped to 0..=100.
    pub fn set_light_level(&mut self, input: &LightInput) -> Result<u8, DashboardError> {
        let level = input
            .coerce()
            .ok_or_else(|| DashboardError::InvalidLightLevel(input.to_string()))?;
        Ok(self.set_selected_level(level))
    }

    /// Switch off when on, otherwise go to full brightness.
    pub fn toggle_light(&mut self) -> u8 {
        let level = if is_light_on(self.selected_light_level()) {
            0
        } else {
            FULL_LIGHT_LEVEL
        };
        self.set_selected_level(level)
    }

    pub fn night_light(&mut self) -> u8 {
        self.set_selected_level(NIGHT_LIGHT_LEVEL)
    }

    fn set_selected_level(&mut self, level: u8) -> u8 {
        self.lights.insert(self.selected_room.clone(), level);
        level
    }

    pub fn room_lights(&self) -> Vec<RoomLight> {
        self.rooms
            .iter()
            .map(|room| {
                let level = self.light_level(room).unwrap_or(0);
                RoomLight {
                    room: room.clone(),
                    level,
                    on: is_light_on(level),
                }
            })
            .collect()
    }

    /// Recompute every derived value from the current inputs.
    pub fn view(&self) -> DashboardView {
        let record = &self.current;
        let light_level = self.selected_light_level();

        DashboardView {
            patient: record.clone(),
            last_seen: last_seen(&record.last_movement_timestamp),
            step_goal: self.step_goal,
            step_progress: step_progress(record.daily_step_count, self.step_goal),
            movement_status: movement_indicator(record),
            wristband: wristband_indicator(record.wristband_status),
            battery_tone: battery_tone(record.wristband_status, record.wristband_battery),
            activity_bars: activity_bars(&record.movement_history),
            rooms: self.rooms.clone(),
            selected_room: self.selected_room.clone(),
            light_level,
            light_on: is_light_on(light_level),
            lights: self.room_lights(),
        }
    }
}
