// Configuration loading
pub mod config;

// Resident records and mock data generation
pub mod patient;

// Dashboard state, derived values and rotation
pub mod state;

// Startup wiring of generated data into the state engine
pub mod bootstrap;

// HTTP and WebSocket APIs
pub mod api;

// WebSocket viewer connections
pub mod subscription;
