//! In-process host with a simulated recording service
//!
//! Stands in for the visualization host and the external recorder: keeps a
//! parameter server, answers the start/stop triggers, and publishes bag size
//! and duration status while a recording is active. The bag grows at a
//! configured byte rate with some random jitter.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::application::ports::{HostError, PanelHost, RenderNotification};
use crate::domain::config::AppConfig;
use crate::domain::host::names::{
    OP_START_RECORDING, OP_STOP_RECORDING, PARAM_BAG_NAME, PARAM_OUTPUT_DIRECTORY, PARAM_TOPICS,
    TOPIC_BAG_SIZE, TOPIC_DURATION,
};
use crate::domain::host::{
    FrameMessage, ParameterStore, ParameterValue, RenderState, Subscription, Topic, WatchAspect,
};
use crate::domain::recording::RecordingDuration;

/// Settings for a simulated host
#[derive(Debug, Clone)]
pub struct SimulatedHostConfig {
    /// Topic catalog offered to the panel
    pub topics: Vec<String>,
    /// Average bag growth rate while recording
    pub bytes_per_second: u64,
    /// Initial parameter server contents
    pub parameters: ParameterStore,
}

impl SimulatedHostConfig {
    /// Build from application config. Configured bag name, output directory
    /// and topics become the recorder's initial parameters.
    pub fn from_app_config(config: &AppConfig) -> Self {
        let mut parameters = ParameterStore::new();
        if let Some(name) = &config.bag_name {
            parameters.insert(PARAM_BAG_NAME.to_string(), name.clone().into());
        }
        if let Some(dir) = &config.output_directory {
            parameters.insert(PARAM_OUTPUT_DIRECTORY.to_string(), dir.clone().into());
        }
        if let Some(topics) = &config.topics {
            parameters.insert(PARAM_TOPICS.to_string(), topics.clone().into());
        }

        Self {
            topics: config.demo_topics_or_default(),
            bytes_per_second: config.bytes_per_second_or_default(),
            parameters,
        }
    }
}

impl Default for SimulatedHostConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::defaults())
    }
}

/// A recording the simulated service finished
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBag {
    pub name: String,
    pub output_directory: String,
    pub topics: Vec<String>,
    pub bytes: u64,
    pub duration: RecordingDuration,
}

#[derive(Debug)]
struct ActiveRecording {
    name: String,
    output_directory: String,
    topics: Vec<String>,
    started: Instant,
    last_update: Instant,
    bytes: u64,
}

#[derive(Debug)]
struct HostState {
    topics: Vec<Topic>,
    bytes_per_second: u64,
    parameters: ParameterStore,
    watched: HashSet<WatchAspect>,
    subscriptions: HashSet<String>,
    active: Option<ActiveRecording>,
    recordings: Vec<RecordedBag>,
    render_pending: bool,
    failing_parameters: HashSet<String>,
    failing_operations: HashSet<String>,
    rng: StdRng,
}

/// Simulated host, cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct SimulatedRecorderHost {
    state: Arc<Mutex<HostState>>,
}

impl SimulatedRecorderHost {
    pub fn new(config: SimulatedHostConfig) -> Self {
        let state = HostState {
            topics: config.topics.into_iter().map(Topic::new).collect(),
            bytes_per_second: config.bytes_per_second,
            parameters: config.parameters,
            watched: HashSet::new(),
            subscriptions: HashSet::new(),
            active: None,
            recordings: Vec::new(),
            render_pending: false,
            failing_parameters: HashSet::new(),
            failing_operations: HashSet::new(),
            rng: StdRng::from_entropy(),
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Produce the next render notification.
    ///
    /// Returns `None` while the previous notification is unacknowledged:
    /// a panel that never calls `done` stalls its own rendering.
    pub fn next_render(&self) -> Option<RenderNotification> {
        let mut state = self.lock();
        if state.render_pending {
            return None;
        }
        state.render_pending = true;
        let render = state.render_state();
        drop(state);

        let shared = Arc::clone(&self.state);
        Some(RenderNotification {
            state: render,
            done: Box::new(move || {
                lock_state(&shared).render_pending = false;
            }),
        })
    }

    /// Whether a delivered render is still waiting for acknowledgement
    pub fn is_render_pending(&self) -> bool {
        self.lock().render_pending
    }

    /// Current parameter server value
    pub fn parameter(&self, key: &str) -> Option<ParameterValue> {
        self.lock().parameters.get(key).cloned()
    }

    pub fn is_watching(&self, aspect: WatchAspect) -> bool {
        self.lock().watched.contains(&aspect)
    }

    pub fn is_subscribed(&self, topic: &str) -> bool {
        self.lock().subscriptions.contains(topic)
    }

    pub fn is_recording(&self) -> bool {
        self.lock().active.is_some()
    }

    /// Finished recordings, oldest first
    pub fn recordings(&self) -> Vec<RecordedBag> {
        self.lock().recordings.clone()
    }

    /// Replace the topic catalog
    pub fn set_topics(&self, topics: Vec<String>) {
        self.lock().topics = topics.into_iter().map(Topic::new).collect();
    }

    /// Make writes to `key` fail until cleared
    pub fn fail_parameter(&self, key: &str) {
        self.lock().failing_parameters.insert(key.to_string());
    }

    /// Make calls to operation `name` fail until cleared
    pub fn fail_operation(&self, name: &str) {
        self.lock().failing_operations.insert(name.to_string());
    }

    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.failing_parameters.clear();
        state.failing_operations.clear();
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        lock_state(&self.state)
    }
}

fn lock_state(state: &Mutex<HostState>) -> MutexGuard<'_, HostState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

impl HostState {
    fn render_state(&mut self) -> RenderState {
        self.advance();

        let topics = self
            .watched
            .contains(&WatchAspect::Topics)
            .then(|| self.topics.clone());
        let parameters = self
            .watched
            .contains(&WatchAspect::Parameters)
            .then(|| self.parameters.clone());
        let current_frame = self
            .watched
            .contains(&WatchAspect::CurrentFrame)
            .then(|| self.status_messages());

        RenderState {
            topics,
            parameters,
            current_frame,
        }
    }

    /// Grow the active bag by the time passed since the last render
    fn advance(&mut self) {
        let rate = self.bytes_per_second as f64;
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let now = Instant::now();
        let dt = now.duration_since(active.last_update).as_secs_f64();
        active.last_update = now;
        if dt > 0.0 && rate > 0.0 {
            let jitter: f64 = self.rng.gen_range(0.8..1.2);
            active.bytes = active.bytes.saturating_add((rate * dt * jitter) as u64);
        }
    }

    fn status_messages(&self) -> Vec<FrameMessage> {
        let Some(active) = &self.active else {
            return Vec::new();
        };
        let elapsed = RecordingDuration::from(active.last_update.duration_since(active.started));

        let mut messages = Vec::new();
        if self.subscriptions.contains(TOPIC_BAG_SIZE) {
            messages.push(FrameMessage::new(TOPIC_BAG_SIZE, json!(active.bytes)));
        }
        if self.subscriptions.contains(TOPIC_DURATION) {
            messages.push(FrameMessage::new(
                TOPIC_DURATION,
                json!({"sec": elapsed.secs(), "nanosec": elapsed.subsec_nanos()}),
            ));
        }
        messages
    }

    fn text_parameter(&self, key: &str) -> Option<String> {
        self.parameters
            .get(key)
            .and_then(ParameterValue::as_text)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn start(&mut self) -> Value {
        if self.active.is_some() {
            return trigger(false, "a recording is already active");
        }
        let Some(name) = self.text_parameter(PARAM_BAG_NAME) else {
            return trigger(false, "bag_name parameter is not set");
        };
        let Some(output_directory) = self.text_parameter(PARAM_OUTPUT_DIRECTORY) else {
            return trigger(false, "output_directory parameter is not set");
        };
        let topics = self
            .parameters
            .get(PARAM_TOPICS)
            .and_then(ParameterValue::as_text_list)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        if topics.is_empty() {
            return trigger(false, "topics parameter is empty");
        }

        info!(bag = %name, output_directory = %output_directory, topics = ?topics, "Simulated recording started");
        let now = Instant::now();
        self.active = Some(ActiveRecording {
            name,
            output_directory,
            topics,
            started: now,
            last_update: now,
            bytes: 0,
        });
        trigger(true, "recording started")
    }

    fn stop(&mut self) -> Value {
        self.advance();
        let Some(active) = self.active.take() else {
            return trigger(false, "no recording is active");
        };
        let duration = RecordingDuration::from(active.last_update.duration_since(active.started));
        info!(bag = %active.name, bytes = active.bytes, duration = %duration, "Simulated recording stopped");
        self.recordings.push(RecordedBag {
            name: active.name,
            output_directory: active.output_directory,
            topics: active.topics,
            bytes: active.bytes,
            duration,
        });
        trigger(true, "recording stopped")
    }
}

fn trigger(success: bool, message: &str) -> Value {
    json!({"success": success, "message": message})
}

#[async_trait]
impl PanelHost for SimulatedRecorderHost {
    fn watch(&self, aspect: WatchAspect) {
        debug!(aspect = %aspect, "Panel watching");
        self.lock().watched.insert(aspect);
    }

    fn subscribe(&self, subscriptions: &[Subscription]) {
        let mut state = self.lock();
        for sub in subscriptions {
            debug!(topic = %sub.topic, "Panel subscribed");
            state.subscriptions.insert(sub.topic.clone());
        }
    }

    async fn write_parameter(&self, key: &str, value: ParameterValue) -> Result<(), HostError> {
        let mut state = self.lock();
        if state.failing_parameters.contains(key) {
            return Err(HostError::ParameterRejected {
                key: key.to_string(),
                reason: "parameter server rejected the write".to_string(),
            });
        }
        debug!(key, value = ?value, "Parameter set");
        state.parameters.insert(key.to_string(), value);
        Ok(())
    }

    async fn invoke_operation(&self, name: &str, _request: Value) -> Result<Value, HostError> {
        let mut state = self.lock();
        if state.failing_operations.contains(name) {
            return Err(HostError::ServiceFailed {
                name: name.to_string(),
                reason: "service call timed out".to_string(),
            });
        }
        match name {
            OP_START_RECORDING => Ok(state.start()),
            OP_STOP_RECORDING => Ok(state.stop()),
            _ => Err(HostError::ServiceUnavailable {
                name: name.to_string(),
            }),
        }
    }
}
