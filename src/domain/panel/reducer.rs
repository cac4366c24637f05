//! Panel state transitions
//!
//! One event per thing that can happen to the panel. [`reduce`] is the only
//! place state changes, so every transition can be tested without a host.

use chrono::{DateTime, Local};
use tracing::warn;

use crate::domain::host::names::{
    PARAM_BAG_NAME, PARAM_OUTPUT_DIRECTORY, PARAM_TOPICS, TOPIC_BAG_SIZE, TOPIC_DURATION,
};
use crate::domain::host::{ParameterValue, RenderState};
use crate::domain::recording::{format_bag_size, BagSize, RecordingDuration};

use super::state::{PanelState, SavedBag};

/// Things that change panel state
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// A render notification arrived from the host
    Rendered(RenderState),
    /// The bag name field was edited
    BagNameEdited(String),
    /// The output directory field was edited
    OutputDirectoryEdited(String),
    /// A topic checkbox changed
    TopicToggled { topic: String, checked: bool },
    /// The recording service confirmed start
    RecordingStarted { at: DateTime<Local> },
    /// The recording service confirmed stop; `timestamp` is the display
    /// time for the saved entry
    RecordingStopped { timestamp: String },
}

/// Apply one event to the panel state
pub fn reduce(state: PanelState, event: PanelEvent) -> PanelState {
    match event {
        PanelEvent::Rendered(render) => rendered(state, render),
        PanelEvent::BagNameEdited(bag_name) => PanelState { bag_name, ..state },
        PanelEvent::OutputDirectoryEdited(output_directory) => PanelState {
            output_directory,
            ..state
        },
        PanelEvent::TopicToggled { topic, checked } => topic_toggled(state, topic, checked),
        PanelEvent::RecordingStarted { at } => PanelState {
            is_recording: true,
            recording_start_time: Some(at),
            ..state
        },
        PanelEvent::RecordingStopped { timestamp } => recording_stopped(state, timestamp),
    }
}

fn rendered(mut state: PanelState, render: RenderState) -> PanelState {
    let RenderState {
        topics,
        parameters,
        current_frame,
    } = render;

    state.topics = topics;

    for msg in current_frame.iter().flatten() {
        match msg.topic.as_str() {
            TOPIC_BAG_SIZE => match BagSize::from_payload(&msg.message) {
                Some(size) => state.current_bag_size = size.bytes(),
                None => warn!(topic = %msg.topic, payload = %msg.message, "Ignoring malformed bag size"),
            },
            TOPIC_DURATION => match RecordingDuration::from_payload(&msg.message) {
                Some(duration) => {
                    state.current_duration = duration;
                    state.duration_display = duration.to_string();
                }
                None => warn!(topic = %msg.topic, payload = %msg.message, "Ignoring malformed duration"),
            },
            _ => {}
        }
    }

    // Parameters are sticky: an absent or empty value keeps the local one
    if let Some(parameters) = parameters {
        let present = |key: &str| parameters.get(key).filter(|v| !v.is_empty());

        if let Some(name) = present(PARAM_BAG_NAME).and_then(ParameterValue::as_text) {
            state.bag_name = name.to_string();
        }
        if let Some(dir) = present(PARAM_OUTPUT_DIRECTORY).and_then(ParameterValue::as_text) {
            state.output_directory = dir.to_string();
        }
        if let Some(topics) = present(PARAM_TOPICS).and_then(ParameterValue::as_text_list) {
            state.selected_topics = topics.to_vec();
        }
    }

    state
}

fn topic_toggled(mut state: PanelState, topic: String, checked: bool) -> PanelState {
    if checked {
        if !state.is_selected(&topic) {
            state.selected_topics.push(topic);
        }
    } else {
        state.selected_topics.retain(|t| *t != topic);
    }
    state
}

fn recording_stopped(state: PanelState, timestamp: String) -> PanelState {
    let saved = SavedBag {
        name: state.bag_name.clone(),
        size: format_bag_size(state.current_bag_size),
        timestamp,
    };
    let mut saved_bags = Vec::with_capacity(state.saved_bags.len() + 1);
    saved_bags.push(saved);
    saved_bags.extend(state.saved_bags);

    let fresh = PanelState::new();
    PanelState {
        is_recording: false,
        recording_start_time: None,
        current_bag_size: fresh.current_bag_size,
        current_duration: fresh.current_duration,
        duration_display: fresh.duration_display,
        saved_bags,
        ..state
    }
}
