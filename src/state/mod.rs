// Dashboard state, derived values and patient rotation

mod dashboard;
pub mod derived;
mod engine;
mod rotation;
mod view;

pub use dashboard::{
    Dashboard, DashboardError, LightInput, AUTO_LIGHT_LEVEL, FULL_LIGHT_LEVEL, NIGHT_LIGHT_LEVEL,
};
pub use engine::DashboardEngine;
pub use rotation::{run_rotation, Rotation};
pub use view::{DashboardView, RoomLight};

#[cfg(test)]
mod tests;
