//! Panel state entity

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::host::Topic;
use crate::domain::recording::{format_elapsed, RecordingDuration};

/// A completed recording, as listed under "Saved Recordings"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedBag {
    pub name: String,
    pub size: String,
    pub timestamp: String,
}

/// State owned by one mounted panel.
///
/// Created empty on mount and dropped on unmount. Every change goes
/// through [`reduce`](super::reduce), which keeps `is_recording` and
/// `recording_start_time` in step and only ever prepends to `saved_bags`.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub(super) topics: Option<Vec<Topic>>,
    pub(super) bag_name: String,
    pub(super) output_directory: String,
    pub(super) selected_topics: Vec<String>,
    pub(super) is_recording: bool,
    pub(super) recording_start_time: Option<DateTime<Local>>,
    pub(super) current_bag_size: u64,
    pub(super) current_duration: RecordingDuration,
    pub(super) duration_display: String,
    pub(super) saved_bags: Vec<SavedBag>,
}

impl PanelState {
    /// Fresh state for a newly mounted panel
    pub fn new() -> Self {
        Self {
            topics: None,
            bag_name: String::new(),
            output_directory: String::new(),
            selected_topics: Vec::new(),
            is_recording: false,
            recording_start_time: None,
            current_bag_size: 0,
            current_duration: RecordingDuration::ZERO,
            duration_display: format_elapsed(0),
            saved_bags: Vec::new(),
        }
    }

    /// Topic catalog from the latest render, `None` before the first one
    pub fn topics(&self) -> Option<&[Topic]> {
        self.topics.as_deref()
    }

    pub fn bag_name(&self) -> &str {
        &self.bag_name
    }

    pub fn output_directory(&self) -> &str {
        &self.output_directory
    }

    /// Selected topics in toggle order. May name topics that are no longer
    /// in the catalog.
    pub fn selected_topics(&self) -> &[String] {
        &self.selected_topics
    }

    pub fn is_selected(&self, topic: &str) -> bool {
        self.selected_topics.iter().any(|t| t == topic)
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn recording_start_time(&self) -> Option<DateTime<Local>> {
        self.recording_start_time
    }

    /// Bag size in bytes from the latest status message
    pub fn current_bag_size(&self) -> u64 {
        self.current_bag_size
    }

    pub fn current_duration(&self) -> RecordingDuration {
        self.current_duration
    }

    /// Elapsed time as `HH:MM:SS`
    pub fn duration_display(&self) -> &str {
        &self.duration_display
    }

    /// Completed recordings, newest first
    pub fn saved_bags(&self) -> &[SavedBag] {
        &self.saved_bags
    }

    /// Start is allowed once all three form inputs are filled in
    pub fn can_start(&self) -> bool {
        !self.is_recording
            && !self.bag_name.is_empty()
            && !self.output_directory.is_empty()
            && !self.selected_topics.is_empty()
    }

    /// Stop is allowed only while recording
    pub fn can_stop(&self) -> bool {
        self.is_recording
    }

    /// Why start is disabled, `None` when it is enabled
    pub fn start_blocker(&self) -> Option<&'static str> {
        if self.is_recording {
            Some("a recording is already active")
        } else if self.bag_name.is_empty() {
            Some("bag name is empty")
        } else if self.output_directory.is_empty() {
            Some("output directory is empty")
        } else if self.selected_topics.is_empty() {
            Some("no topics selected")
        } else {
            None
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new()
    }
}
