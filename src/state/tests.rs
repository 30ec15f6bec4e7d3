use super::*;
use crate::patient::{
    generate_patients, room_names, ActivityLevel, PatientRecord, WristbandStatus, RESIDENTS,
};
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread;

fn record(room: &str, is_moving: bool) -> PatientRecord {
    PatientRecord {
        patient_id: "Carmen López".to_string(),
        last_movement_timestamp: "2025-11-17T10:14:30.456Z".to_string(),
        current_room: room.to_string(),
        is_moving,
        activity_level: ActivityLevel::Normal,
        fall_detected: false,
        fall_location: None,
        daily_step_count: 1450,
        movement_history: [ActivityLevel::Low; 24],
        wristband_status: WristbandStatus::Connected,
        wristband_battery: 80,
        medical_conditions: vec!["EPOC".to_string()],
        daily_schedule: Vec::new(),
    }
}

fn dark_lights() -> HashMap<String, u8> {
    room_names().into_iter().map(|room| (room, 0)).collect()
}

fn dashboard_with(initial: PatientRecord) -> Dashboard {
    Dashboard::new(initial, room_names(), dark_lights(), 1500)
}

#[test]
fn test_new_selects_resident_room() {
    let dashboard = dashboard_with(record("Comedor", false));

    assert_eq!(dashboard.selected_room(), "Comedor");
    assert_eq!(dashboard.selected_light_level(), 0);
    assert_eq!(dashboard.rooms().len(), 18);
}

#[test]
fn test_new_fills_missing_rooms() {
    let dashboard = Dashboard::new(record("Cocina", false), room_names(), HashMap::new(), 1500);

    assert!(dashboard.rooms().iter().all(|r| dashboard.light_level(r) == Some(0)));
}

#[test]
fn test_auto_light_on_movement() {
    let mut dashboard = dashboard_with(record("Comedor", false));
    dashboard.select_room("Cocina").unwrap();
    dashboard.set_light_level(&LightInput::Number(5.0)).unwrap();

    dashboard.publish_record(record("Cocina", true));

    assert_eq!(dashboard.light_level("Cocina"), Some(AUTO_LIGHT_LEVEL));
    assert!(dashboard.view().light_on);
}

#[test]
fn test_auto_light_overrides_bright_room_too() {
    let mut lights = dark_lights();
    lights.insert("Cocina".to_string(), 100);
    let mut dashboard = Dashboard::new(record("Comedor", false), room_names(), lights, 1500);

    dashboard.publish_record(record("Cocina", true));

    assert_eq!(dashboard.light_level("Cocina"), Some(85));
}

#[test]
fn test_no_auto_light_without_movement() {
    let mut dashboard = dashboard_with(record("Comedor", false));

    dashboard.publish_record(record("Cocina", false));

    assert_eq!(dashboard.light_level("Cocina"), Some(0));
}

#[test]
fn test_initial_record_runs_auto_light() {
    let dashboard = dashboard_with(record("Jardín", true));
    assert_eq!(dashboard.light_level("Jardín"), Some(AUTO_LIGHT_LEVEL));
}

#[test]
fn test_viewer_action_overrides_auto_light_until_next_publish() {
    let mut dashboard = dashboard_with(record("Cocina", true));
    assert_eq!(dashboard.selected_light_level(), 85);

    dashboard.toggle_light();
    assert_eq!(dashboard.selected_light_level(), 0);

    // Reading does not re-trigger the reaction
    let _ = dashboard.view();
    assert_eq!(dashboard.selected_light_level(), 0);

    dashboard.publish_record(record("Cocina", true));
    assert_eq!(dashboard.selected_light_level(), 85);
}

#[test]
fn test_toggle_light() {
    let mut dashboard = dashboard_with(record("Comedor", false));

    assert_eq!(dashboard.toggle_light(), 100);
    assert_eq!(dashboard.toggle_light(), 0);
}

#[test]
fn test_toggle_dim_light_goes_full() {
    let mut dashboard = dashboard_with(record("Comedor", false));
    dashboard.set_light_level(&LightInput::Number(10.0)).unwrap();

    assert_eq!(dashboard.toggle_light(), 100);
}

#[test]
fn test_night_light() {
    let mut dashboard = dashboard_with(record("Comedor", false));

    assert_eq!(dashboard.night_light(), NIGHT_LIGHT_LEVEL);
    assert!(dashboard.view().light_on);
}

#[test]
fn test_set_light_level_clamps_and_rounds() {
    let mut dashboard = dashboard_with(record("Comedor", false));

    assert_eq!(dashboard.set_light_level(&LightInput::Number(250.0)), Ok(100));
    assert_eq!(dashboard.set_light_level(&LightInput::Number(-3.0)), Ok(0));
    assert_eq!(dashboard.set_light_level(&LightInput::Text(" 42.6 ".to_string())), Ok(43));
}

#[test]
fn test_invalid_light_input_is_noop() {
    let mut dashboard = dashboard_with(record("Comedor", false));
    dashboard.set_light_level(&LightInput::Number(40.0)).unwrap();

    for bad in ["", "bright", "NaN", "inf"] {
        let result = dashboard.set_light_level(&LightInput::Text(bad.to_string()));
        assert!(matches!(result, Err(DashboardError::InvalidLightLevel(_))));
    }
    assert_eq!(dashboard.selected_light_level(), 40);
}

#[test]
fn test_light_controls_only_touch_selected_room() {
    let mut dashboard = dashboard_with(record("Comedor", false));
    dashboard.select_room("Habitación 105").unwrap();

    dashboard.toggle_light();

    assert_eq!(dashboard.light_level("Habitación 105"), Some(100));
    assert_eq!(dashboard.light_level("Comedor"), Some(0));
}

#[test]
fn test_select_unknown_room() {
    let mut dashboard = dashboard_with(record("Comedor", false));

    let result = dashboard.select_room("Sótano");

    assert_eq!(result, Err(DashboardError::UnknownRoom("Sótano".to_string())));
    assert_eq!(dashboard.selected_room(), "Comedor");
}

#[test]
fn test_view_derives_display_values() {
    let mut patient = record("Comedor", false);
    patient.daily_step_count = 750;
    patient.wristband_battery = 35;

    let view = dashboard_with(patient).view();

    assert_eq!(view.step_goal, 1500);
    assert_eq!(view.step_progress, 50.0);
    assert_eq!(view.wristband.label, "Conectada");
    assert_eq!(view.battery_tone, derived::Tone::Warn);
    assert_eq!(view.movement_status.label, "En reposo");
    assert_eq!(view.activity_bars.len(), 24);
    assert_eq!(view.lights.len(), view.rooms.len());
    assert_eq!(view.last_seen.len(), 5);
}

#[test]
fn test_view_reports_fall() {
    let mut patient = record("Habitación 103", false);
    patient.fall_detected = true;
    patient.fall_location = Some("Habitación 103".to_string());

    let view = dashboard_with(patient).view();

    assert_eq!(view.movement_status.label, "Caída detectada en Habitación 103");
    assert_eq!(view.movement_status.tone, derived::Tone::Alert);
}

#[test]
fn test_rotation_round_robin() {
    let now = Utc.with_ymd_and_hms(2025, 11, 17, 10, 0, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let patients = generate_patients(&mut rng, now);
    let mut rotation = Rotation::new(patients);

    assert_eq!(rotation.current().unwrap().patient_id, RESIDENTS[0]);

    let n = RESIDENTS.len();
    let mut seen = Vec::new();
    for _ in 0..n {
        seen.push(rotation.tick(&mut rng, now).unwrap().patient_id);
    }

    // Ticks 1..n-1 then wrap back to the first resident
    let expected: Vec<String> = (1..=n).map(|i| RESIDENTS[i % n].to_string()).collect();
    assert_eq!(seen, expected);
    let unique: HashSet<_> = seen.iter().collect();
    assert_eq!(unique.len(), n);
}

#[test]
fn test_rotation_refreshes_live_fields_in_place() {
    let now = Utc.with_ymd_and_hms(2025, 11, 17, 12, 30, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let mut patients = generate_patients(&mut rng, now);
    patients[1].daily_step_count = 1000;
    let mut rotation = Rotation::new(patients);

    let published = rotation.tick(&mut rng, now).unwrap();

    assert_eq!(published.last_movement_timestamp, "2025-11-17T12:30:00.000Z");
    assert!((600..=1600).contains(&published.daily_step_count));
    assert_eq!(rotation.current(), Some(&published));
}

#[test]
fn test_rotation_steps_stay_in_envelope() {
    let now = Utc::now();
    let mut rng = StdRng::seed_from_u64(13);
    let mut rotation = Rotation::new(vec![record("Cocina", false)]);

    let mut previous = 1450u32;
    for _ in 0..200 {
        let steps = rotation.tick(&mut rng, now).unwrap().daily_step_count;
        let low = (f64::from(previous) * 0.6).floor() as u32;
        let high = (f64::from(previous) * 1.6).ceil() as u32;
        assert!(steps >= low && steps <= high, "{} outside {}..={}", steps, low, high);
        previous = steps;
    }
}

#[test]
fn test_empty_rotation() {
    let mut rotation = Rotation::new(Vec::new());
    assert!(rotation.tick(&mut StdRng::seed_from_u64(1), Utc::now()).is_none());
}

#[test]
fn test_engine_broadcasts_updates() {
    let engine = DashboardEngine::new(dashboard_with(record("Comedor", false)));
    let mut rx = engine.subscribe();

    engine.publish_record(record("Cocina", true));

    let view = rx.try_recv().unwrap();
    assert_eq!(view.patient.current_room, "Cocina");
    assert_eq!(
        view.lights.iter().find(|l| l.room == "Cocina").map(|l| l.level),
        Some(85)
    );
}

#[test]
fn test_engine_rejected_control_does_not_broadcast() {
    let engine = DashboardEngine::new(dashboard_with(record("Comedor", false)));
    let mut rx = engine.subscribe();

    assert!(engine.select_room("Ático").is_err());
    assert!(engine
        .set_light_level(&LightInput::Text("abc".to_string()))
        .is_err());

    assert!(matches!(
        rx.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[test]
fn test_engine_controls_follow_selected_room() {
    let engine = DashboardEngine::new(dashboard_with(record("Comedor", false)));

    engine.select_room("Cocina").unwrap();
    let view = engine.night_light();
    assert_eq!(view.selected_room, "Cocina");
    assert_eq!(view.light_level, 15);

    let view = engine.toggle_light();
    assert_eq!(view.light_level, 0);
    assert!(!view.light_on);
}

#[test]
fn test_concurrent_controls() {
    let engine = Arc::new(DashboardEngine::new(dashboard_with(record("Comedor", false))));
    let mut handles = vec![];

    for i in 0..10u8 {
        let engine_clone = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            engine_clone
                .set_light_level(&LightInput::Number(f64::from(i * 10)))
                .unwrap();
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let level = engine.view().light_level;
    assert!(level <= 90 && level % 10 == 0);
}
