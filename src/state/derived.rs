use crate::patient::{ActivityLevel, PatientRecord, WristbandStatus};
use chrono::{DateTime, Local};
use serde::Serialize;

/// Light levels at or below this read as "off"
pub const LIGHT_ON_THRESHOLD: u8 = 10;

/// Severity tone used to color indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Ok,
    Warn,
    Alert,
    Neutral,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Ok => "bg-teal-500",
            Tone::Warn => "bg-amber-500",
            Tone::Alert => "bg-rose-500",
            Tone::Neutral => "bg-slate-400",
        }
    }
}

/// Display label paired with its tone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusIndicator {
    pub label: String,
    pub tone: Tone,
    #[serde(rename = "cssClass")]
    pub css_class: &'static str,
}

impl StatusIndicator {
    fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
            css_class: tone.css_class(),
        }
    }
}

/// One bar of the 24-hour activity chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityBar {
    pub level: ActivityLevel,
    pub height: u8,
    #[serde(rename = "cssClass")]
    pub css_class: &'static str,
}

/// Local `HH:MM` of an RFC 3339 timestamp, `--:--` when it does not parse.
pub fn last_seen(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(at) => at.with_timezone(&Local).format("%H:%M").to_string(),
        Err(_) => "--:--".to_string(),
    }
}

/// Percentage of the daily step goal reached, capped at 100.
pub fn step_progress(steps: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 100.0;
    }
    (f64::from(steps) / f64::from(goal) * 100.0).min(100.0)
}

pub fn is_light_on(level: u8) -> bool {
    level > LIGHT_ON_THRESHOLD
}

pub fn wristband_indicator(status: WristbandStatus) -> StatusIndicator {
    match status {
        WristbandStatus::Connected => StatusIndicator::new("Conectada", Tone::Ok),
        WristbandStatus::Disconnected => StatusIndicator::new("Desconectada", Tone::Neutral),
        WristbandStatus::LowBattery => StatusIndicator::new("Batería baja", Tone::Warn),
    }
}

/// Battery tier; a disconnected band has no meaningful charge reading.
pub fn battery_tone(status: WristbandStatus, battery: u8) -> Tone {
    if status == WristbandStatus::Disconnected {
        Tone::Neutral
    } else if battery > 50 {
        Tone::Ok
    } else if battery > 20 {
        Tone::Warn
    } else {
        Tone::Alert
    }
}

/// Headline status for the resident card. A fall outranks everything else.
pub fn movement_indicator(record: &PatientRecord) -> StatusIndicator {
    if record.fall_detected {
        let location = record
            .fall_location
            .as_deref()
            .unwrap_or(record.current_room.as_str());
        return StatusIndicator::new(format!("Caída detectada en {}", location), Tone::Alert);
    }

    if record.is_moving {
        StatusIndicator::new("En movimiento", Tone::Ok)
    } else if record.activity_level == ActivityLevel::None {
        StatusIndicator::new("Sin actividad", Tone::Warn)
    } else {
        StatusIndicator::new("En reposo", Tone::Neutral)
    }
}

pub fn activity_bars(history: &[ActivityLevel]) -> Vec<ActivityBar> {
    history
        .iter()
        .map(|&level| ActivityBar {
            level,
            height: level.bar_height(),
            css_class: level.bar_class(),
        })
        .collect()
}
