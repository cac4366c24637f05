//! Domain layer - Core panel logic
//!
//! Contains value objects, the panel state and its transitions, and domain
//! errors. This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod host;
pub mod panel;
pub mod recording;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use host::{RenderState, Topic};
pub use panel::{reduce, PanelEvent, PanelState, PanelView, SavedBag};
pub use recording::{format_bag_size, format_elapsed, RecordingDuration};
