use crate::patient::generator::format_timestamp;
use crate::patient::PatientRecord;
use crate::state::DashboardEngine;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

/// Step count perturbation envelope: new = old * (1 + u), u in [-0.4, 0.6)
const STEP_DELTA_MIN: f64 = -0.4;
const STEP_DELTA_MAX: f64 = 0.6;

/// Round-robin cursor over the generated records
pub struct Rotation {
    patients: Vec<PatientRecord>,
    cursor: usize,
}

impl Rotation {
    /// The record at index 0 is the one on screen before the first tick.
    pub fn new(patients: Vec<PatientRecord>) -> Self {
        Self {
            patients,
            cursor: 0,
        }
    }

    pub fn current(&self) -> Option<&PatientRecord> {
        self.patients.get(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Advance to the next record, refresh its live fields in place and
    /// return a copy for publishing. None when there is nothing to rotate.
    pub fn tick<R: Rng>(&mut self, rng: &mut R, now: DateTime<Utc>) -> Option<PatientRecord> {
        if self.patients.is_empty() {
            return None;
        }

        self.cursor = (self.cursor + 1) % self.patients.len();
        let patient = &mut self.patients[self.cursor];

        patient.last_movement_timestamp = format_timestamp(now);
        patient.is_moving = rng.gen_bool(0.5);
        patient.daily_step_count = perturb_steps(patient.daily_step_count, rng);

        Some(patient.clone())
    }
}

fn perturb_steps<R: Rng>(steps: u32, rng: &mut R) -> u32 {
    let factor = 1.0 + rng.gen_range(STEP_DELTA_MIN..STEP_DELTA_MAX);
    (f64::from(steps) * factor).round().max(0.0) as u32
}

/// Periodically publish the next resident to the engine.
///
/// Runs until the task is dropped at shutdown.
pub async fn run_rotation<R: Rng + Send + 'static>(
    engine: Arc<DashboardEngine>,
    mut rotation: Rotation,
    mut rng: R,
    interval_seconds: u64,
) {
    if rotation.is_empty() {
        warn!("No patients to rotate, rotation disabled");
        return;
    }

    info!(
        patients = rotation.len(),
        interval_seconds = interval_seconds,
        "Starting patient rotation"
    );

    let mut ticker = interval(Duration::from_secs(interval_seconds.max(1)));

    // Skip missed ticks so a stalled runtime doesn't fire a burst of rotations
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The first tick completes immediately; the initial record is already shown
    ticker.tick().await;

    loop {
        ticker.tick().await;

        if let Some(record) = rotation.tick(&mut rng, Utc::now()) {
            engine.publish_record(record);
        }
    }
}
