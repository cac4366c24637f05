//! Host adapters

mod simulated;

pub use simulated::{RecordedBag, SimulatedHostConfig, SimulatedRecorderHost};
