use crate::patient::PatientRecord;
use crate::state::dashboard::{Dashboard, DashboardError, LightInput};
use crate::state::view::DashboardView;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;
use tracing::info;

/// DashboardEngine shares one `Dashboard` between the rotation task and the API.
///
/// Each call applies a single update under the lock, recomputes the view and
/// broadcasts it to subscribers.
pub struct DashboardEngine {
    dashboard: Mutex<Dashboard>,

    /// Broadcast channel for recomputed views
    update_tx: broadcast::Sender<DashboardView>,
}

impl DashboardEngine {
    pub fn new(dashboard: Dashboard) -> Self {
        let (update_tx, _) = broadcast::channel(64);

        Self {
            dashboard: Mutex::new(dashboard),
            update_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Dashboard> {
        // Every update leaves the dashboard consistent, so a poisoned lock is still usable
        self.dashboard.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current view without mutating anything
    pub fn view(&self) -> DashboardView {
        self.lock().view()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardView> {
        self.update_tx.subscribe()
    }

    /// Show a new record; the auto-light hook runs before the view is built.
    pub fn publish_record(&self, record: PatientRecord) -> DashboardView {
        let view = {
            let mut dashboard = self.lock();
            dashboard.publish_record(record);
            dashboard.view()
        };

        info!(
            patient_id = %view.patient.patient_id,
            room = %view.patient.current_room,
            is_moving = view.patient.is_moving,
            steps = view.patient.daily_step_count,
            "Patient published"
        );

        self.broadcast(view)
    }

    pub fn select_room(&self, room: &str) -> Result<DashboardView, DashboardError> {
        let view = {
            let mut dashboard = self.lock();
            dashboard.select_room(room)?;
            dashboard.view()
        };

        info!(room = %room, "Room selected");
        Ok(self.broadcast(view))
    }

    pub fn set_light_level(&self, input: &LightInput) -> Result<DashboardView, DashboardError> {
        let (level, view) = {
            let mut dashboard = self.lock();
            let level = dashboard.set_light_level(input)?;
            (level, dashboard.view())
        };

        info!(room = %view.selected_room, level = level, "Light level set");
        Ok(self.broadcast(view))
    }

    pub fn toggle_light(&self) -> DashboardView {
        let (level, view) = {
            let mut dashboard = self.lock();
            let level = dashboard.toggle_light();
            (level, dashboard.view())
        };

        info!(room = %view.selected_room, level = level, "Light toggled");
        self.broadcast(view)
    }

    pub fn night_light(&self) -> DashboardView {
        let view = {
            let mut dashboard = self.lock();
            dashboard.night_light();
            dashboard.view()
        };

        info!(room = %view.selected_room, "Night light on");
        self.broadcast(view)
    }

    fn broadcast(&self, view: DashboardView) -> DashboardView {
        // No subscribers is fine
        let _ = self.update_tx.send(view.clone());
        view
    }
}
