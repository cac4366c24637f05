//! Read-only view model of the panel, derived from [`PanelState`]

use std::fmt;

use super::state::{PanelState, SavedBag};
use crate::domain::recording::format_bag_size;

/// Status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingStatus {
    Ready,
    Recording,
}

impl RecordingStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Recording => "Recording",
        }
    }
}

impl fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One checklist row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEntry {
    pub name: String,
    pub checked: bool,
}

/// The single start/stop button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton {
    pub label: &'static str,
    pub enabled: bool,
}

/// Everything a front end needs to draw the panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub status: RecordingStatus,
    /// Elapsed time, shown only while recording
    pub duration: Option<String>,
    /// Current bag size, shown only while recording
    pub bag_size: Option<String>,
    pub bag_name: String,
    pub output_directory: String,
    /// Catalog topics in catalog order
    pub checklist: Vec<TopicEntry>,
    pub action: ActionButton,
    /// Includes selections no longer in the catalog
    pub selected_count: usize,
    pub saved_bags: Vec<SavedBag>,
}

impl From<&PanelState> for PanelView {
    fn from(state: &PanelState) -> Self {
        let recording = state.is_recording();
        let checklist = state
            .topics()
            .unwrap_or(&[])
            .iter()
            .map(|topic| TopicEntry {
                name: topic.name.clone(),
                checked: state.is_selected(&topic.name),
            })
            .collect();

        let action = if recording {
            ActionButton {
                label: "Stop Recording",
                enabled: state.can_stop(),
            }
        } else {
            ActionButton {
                label: "Start Recording",
                enabled: state.can_start(),
            }
        };

        Self {
            status: if recording {
                RecordingStatus::Recording
            } else {
                RecordingStatus::Ready
            },
            duration: recording.then(|| state.duration_display().to_string()),
            bag_size: recording.then(|| format_bag_size(state.current_bag_size())),
            bag_name: state.bag_name().to_string(),
            output_directory: state.output_directory().to_string(),
            checklist,
            action,
            selected_count: state.selected_topics().len(),
            saved_bags: state.saved_bags().to_vec(),
        }
    }
}
