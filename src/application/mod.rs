//! Application layer - Use cases and port interfaces
//!
//! Contains the recording panel use case and trait definitions
//! for external system interactions.

pub mod panel;
pub mod ports;

// Re-export use cases
pub use panel::{PanelAction, PanelError, PanelOptions, RecordingPanel, RenderCompletion};
