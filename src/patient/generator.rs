use super::{ActivityLevel, PatientRecord, ScheduleEntry, WristbandStatus};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::collections::HashMap;

/// Residents tracked by the facility
pub const RESIDENTS: [&str; 14] = [
    "Carmen López",
    "Antonio García",
    "Dolores Martínez",
    "José Fernández",
    "Pilar Sánchez",
    "Manuel Rodríguez",
    "Rosario Gómez",
    "Francisco Díaz",
    "Mercedes Ruiz",
    "Juan Moreno",
    "Teresa Jiménez",
    "Rafael Álvarez",
    "Concepción Romero",
    "Miguel Navarro",
];

/// Shared rooms; the numbered bedrooms follow them in the room list
pub const COMMON_ROOMS: [&str; 4] = ["Sala de Estar", "Cocina", "Comedor", "Jardín"];

const FIRST_BEDROOM: u16 = 101;
const BEDROOM_COUNT: u16 = 14;

pub const MEDICAL_CONDITIONS: [&str; 7] = [
    "Hipertensión",
    "Diabetes tipo 2",
    "Artrosis",
    "Alzheimer leve",
    "EPOC",
    "Insuficiencia cardíaca",
    "Osteoporosis",
];

pub const DAILY_SCHEDULE: [(&str, &str); 8] = [
    ("08:00", "Desayuno"),
    ("09:30", "Medicación"),
    ("10:30", "Fisioterapia"),
    ("13:00", "Almuerzo"),
    ("15:00", "Siesta"),
    ("17:00", "Merienda"),
    ("18:30", "Actividad grupal"),
    ("20:30", "Cena"),
];

/// Weights for normal / low / none when picking the current activity level
const ACTIVITY_WEIGHTS: [u32; 3] = [50, 35, 15];

const FALL_PROBABILITY: f64 = 0.02;
const DISCONNECT_PROBABILITY: f64 = 0.05;
const LOW_BATTERY_THRESHOLD: u8 = 20;
const MAX_INITIAL_STEPS: u32 = 3000;
const MAX_IDLE_MINUTES: i64 = 120;

/// All room names, common rooms first
pub fn room_names() -> Vec<String> {
    COMMON_ROOMS
        .iter()
        .map(|r| r.to_string())
        .chain((FIRST_BEDROOM..FIRST_BEDROOM + BEDROOM_COUNT).map(|n| format!("Habitación {}", n)))
        .collect()
}

/// Generate one record per resident, in `RESIDENTS` order.
pub fn generate_patients<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Vec<PatientRecord> {
    let rooms = room_names();
    RESIDENTS
        .iter()
        .map(|name| generate_patient(rng, name, &rooms, now))
        .collect()
}

/// Random starting intensity for every room
pub fn generate_light_levels<R: Rng>(rng: &mut R, rooms: &[String]) -> HashMap<String, u8> {
    rooms
        .iter()
        .map(|room| (room.clone(), rng.gen_range(0..=100)))
        .collect()
}

fn generate_patient<R: Rng>(
    rng: &mut R,
    name: &str,
    rooms: &[String],
    now: DateTime<Utc>,
) -> PatientRecord {
    let current_room = rooms
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| COMMON_ROOMS[0].to_string());

    let fall_detected = rng.gen_bool(FALL_PROBABILITY);
    let fall_location = fall_detected.then(|| current_room.clone());

    let wristband_battery: u8 = rng.gen_range(10..=100);
    let wristband_status = wristband_status_for(rng, wristband_battery);

    let idle = Duration::minutes(rng.gen_range(0..=MAX_IDLE_MINUTES));

    PatientRecord {
        patient_id: name.to_string(),
        last_movement_timestamp: format_timestamp(now - idle),
        current_room,
        is_moving: rng.gen_bool(0.5),
        activity_level: weighted_activity(rng),
        fall_detected,
        fall_location,
        daily_step_count: rng.gen_range(0..=MAX_INITIAL_STEPS),
        movement_history: std::array::from_fn(|_| uniform_activity(rng)),
        wristband_status,
        wristband_battery,
        medical_conditions: pick_conditions(rng),
        daily_schedule: DAILY_SCHEDULE
            .iter()
            .map(|(time, activity)| ScheduleEntry {
                time: time.to_string(),
                activity: activity.to_string(),
            })
            .collect(),
    }
}

/// Low battery wins; otherwise a small chance the band dropped off.
pub(crate) fn wristband_status_for<R: Rng>(rng: &mut R, battery: u8) -> WristbandStatus {
    if battery < LOW_BATTERY_THRESHOLD {
        WristbandStatus::LowBattery
    } else if rng.gen_bool(DISCONNECT_PROBABILITY) {
        WristbandStatus::Disconnected
    } else {
        WristbandStatus::Connected
    }
}

fn weighted_activity<R: Rng>(rng: &mut R) -> ActivityLevel {
    match WeightedIndex::new(&ACTIVITY_WEIGHTS) {
        Ok(dist) => ActivityLevel::ALL[dist.sample(rng)],
        Err(_) => ActivityLevel::Normal,
    }
}

fn uniform_activity<R: Rng>(rng: &mut R) -> ActivityLevel {
    ActivityLevel::ALL[rng.gen_range(0..ActivityLevel::ALL.len())]
}

fn pick_conditions<R: Rng>(rng: &mut R) -> Vec<String> {
    let count = rng.gen_range(1..=3);
    MEDICAL_CONDITIONS
        .choose_multiple(rng, count)
        .map(|c| c.to_string())
        .collect()
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
