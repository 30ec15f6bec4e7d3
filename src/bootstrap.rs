use crate::config::CareviewConfig;
use crate::patient::{generate_light_levels, generate_patients, room_names};
use crate::state::{Dashboard, DashboardEngine, Rotation};
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Generated startup state: the engine showing the first resident, the
/// rotation over all residents and the RNG the rotation keeps drawing from.
pub struct Bootstrap {
    pub engine: DashboardEngine,
    pub rotation: Rotation,
    pub rng: StdRng,
}

/// Generate mock residents and room lights, and seat the first resident.
pub fn bootstrap(config: &CareviewConfig, now: DateTime<Utc>) -> Result<Bootstrap> {
    let mut rng = match config.mock.seed {
        Some(seed) => {
            info!(seed = seed, "Using fixed mock data seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let rooms = room_names();
    let lights = generate_light_levels(&mut rng, &rooms);
    let patients = generate_patients(&mut rng, now);

    let rotation = Rotation::new(patients);
    let Some(first) = rotation.current().cloned() else {
        bail!("Mock generator produced no patients");
    };

    info!(
        patients = rotation.len(),
        rooms = rooms.len(),
        first_patient = %first.patient_id,
        "Mock data generated"
    );

    let dashboard = Dashboard::new(first, rooms, lights, config.dashboard.step_goal);

    Ok(Bootstrap {
        engine: DashboardEngine::new(dashboard),
        rotation,
        rng,
    })
}
