// WebSocket viewer connections

pub mod manager;
pub mod protocol;

pub use manager::ConnectionManager;
pub use protocol::{ClientMessage, DashboardUpdateMessage, ErrorMessage};
