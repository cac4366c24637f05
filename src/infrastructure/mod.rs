//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the TOML
//! config store and the in-process simulated host.

pub mod config;
pub mod host;

// Re-export adapters
pub use config::XdgConfigStore;
pub use host::{SimulatedHostConfig, SimulatedRecorderHost};
