//! Recording panel use case
//!
//! Owns the panel state for one mount, applies host render notifications
//! and turns user intent into parameter writes and service calls on the
//! host. All state changes go through the domain reducer.

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use chrono::Local;
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::domain::config::TimestampFormat;
use crate::domain::host::names::{
    OP_START_RECORDING, OP_STOP_RECORDING, PARAM_BAG_NAME, PARAM_OUTPUT_DIRECTORY, PARAM_TOPICS,
    STATUS_TOPICS,
};
use crate::domain::host::{ParameterValue, Subscription, WatchAspect};
use crate::domain::panel::{reduce, PanelEvent, PanelState, PanelView};

use super::ports::{empty_request, HostError, PanelHost, RenderDone, RenderNotification};

/// User actions that talk to the recording service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Start,
    Stop,
}

impl PanelAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start recording",
            Self::Stop => "stop recording",
        }
    }
}

impl fmt::Display for PanelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from the panel use case
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Cannot {action}: {reason}")]
    Unavailable {
        action: PanelAction,
        reason: &'static str,
    },

    #[error("Failed to push recording parameters: {0}")]
    ParameterWrite(#[source] HostError),

    #[error("Failed to {action}: {source}")]
    Operation {
        action: PanelAction,
        #[source]
        source: HostError,
    },

    #[error("Panel was unmounted before the request completed")]
    Unmounted,
}

/// Per-mount options
#[derive(Debug, Clone, Default)]
pub struct PanelOptions {
    /// Display format for saved recording timestamps
    pub timestamp_format: TimestampFormat,
}

/// Acknowledges a render notification exactly once.
///
/// Call [`complete`](Self::complete) when the render pass is done; if the
/// guard is dropped first (early return, panic unwinding) the host is
/// acknowledged anyway so its render loop never stalls.
pub struct RenderCompletion {
    done: Option<RenderDone>,
}

impl RenderCompletion {
    pub fn new(done: RenderDone) -> Self {
        Self { done: Some(done) }
    }

    /// Acknowledge the render now
    pub fn complete(mut self) {
        self.acknowledge();
    }

    fn acknowledge(&mut self) {
        if let Some(done) = self.done.take() {
            done();
        }
    }
}

impl Drop for RenderCompletion {
    fn drop(&mut self) {
        self.acknowledge();
    }
}

/// A mounted recording control panel
pub struct RecordingPanel<H>
where
    H: PanelHost,
{
    host: H,
    state: Mutex<PanelState>,
    lifetime: CancellationToken,
    options: PanelOptions,
}

impl<H> RecordingPanel<H>
where
    H: PanelHost,
{
    /// Mount a panel: declare what the host should deliver and start from
    /// an empty state.
    pub fn mount(host: H, options: PanelOptions) -> Self {
        host.watch(WatchAspect::Topics);
        host.watch(WatchAspect::Parameters);
        host.watch(WatchAspect::CurrentFrame);

        let subscriptions: Vec<Subscription> =
            STATUS_TOPICS.iter().map(|t| Subscription::new(*t)).collect();
        host.subscribe(&subscriptions);

        info!("Recording panel mounted");
        Self {
            host,
            state: Mutex::new(PanelState::new()),
            lifetime: CancellationToken::new(),
            options,
        }
    }

    /// Unmount the panel. In-flight start/stop calls are abandoned and
    /// their results discarded; later renders are acknowledged but ignored.
    pub fn unmount(&self) {
        if !self.lifetime.is_cancelled() {
            self.lifetime.cancel();
            info!("Recording panel unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.lifetime.is_cancelled()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> PanelState {
        self.lock().clone()
    }

    /// View model of the current state
    pub fn view(&self) -> PanelView {
        PanelView::from(&*self.lock())
    }

    /// Apply a render notification and acknowledge it.
    ///
    /// Never blocks on the host; the acknowledgement is sent exactly once
    /// whether or not the render was applied.
    pub fn on_render(&self, notification: RenderNotification) {
        let RenderNotification { state, done } = notification;
        let completion = RenderCompletion::new(done);

        if !self.is_mounted() {
            debug!("Ignoring render after unmount");
            return;
        }

        self.dispatch(PanelEvent::Rendered(state));
        completion.complete();
    }

    pub fn set_bag_name(&self, bag_name: impl Into<String>) {
        self.dispatch(PanelEvent::BagNameEdited(bag_name.into()));
    }

    pub fn set_output_directory(&self, output_directory: impl Into<String>) {
        self.dispatch(PanelEvent::OutputDirectoryEdited(output_directory.into()));
    }

    /// Check or uncheck a topic in the checklist
    pub fn set_topic_checked(&self, topic: impl Into<String>, checked: bool) {
        self.dispatch(PanelEvent::TopicToggled {
            topic: topic.into(),
            checked,
        });
    }

    /// Flip a topic's checkbox. Returns the new checked state.
    pub fn toggle_topic(&self, topic: impl Into<String>) -> bool {
        let topic = topic.into();
        let mut state = self.lock();
        let checked = !state.is_selected(&topic);
        let current = std::mem::take(&mut *state);
        *state = reduce(current, PanelEvent::TopicToggled { topic, checked });
        checked
    }

    /// Push the form to the recording service and start recording.
    ///
    /// Failures are logged and leave the panel idle.
    pub async fn start_recording(&self) -> Result<(), PanelError> {
        let (bag_name, output_directory, topics) = {
            let state = self.lock();
            if let Some(reason) = state.start_blocker() {
                return Err(PanelError::Unavailable {
                    action: PanelAction::Start,
                    reason,
                });
            }
            (
                state.bag_name().to_string(),
                state.output_directory().to_string(),
                state.selected_topics().to_vec(),
            )
        };

        info!(
            bag = %bag_name,
            output_directory = %output_directory,
            topics = topics.len(),
            "Starting recording"
        );

        let parameters = [
            (PARAM_BAG_NAME, ParameterValue::from(bag_name)),
            (PARAM_OUTPUT_DIRECTORY, ParameterValue::from(output_directory)),
            (PARAM_TOPICS, ParameterValue::from(topics)),
        ];
        for (key, value) in parameters {
            self.until_unmounted(self.host.write_parameter(key, value))
                .await?
                .map_err(|e| {
                    error!(parameter = key, error = %e, "Failed to set recording parameter");
                    PanelError::ParameterWrite(e)
                })?;
        }

        self.call_trigger(PanelAction::Start, OP_START_RECORDING)
            .await?;

        self.dispatch(PanelEvent::RecordingStarted { at: Local::now() });
        info!("Recording started");
        Ok(())
    }

    /// Stop the active recording and add it to the saved list.
    ///
    /// Failures are logged and leave the recording active in the panel.
    pub async fn stop_recording(&self) -> Result<(), PanelError> {
        let recording = self.lock().can_stop();
        if !recording {
            return Err(PanelError::Unavailable {
                action: PanelAction::Stop,
                reason: "no recording is active",
            });
        }

        self.call_trigger(PanelAction::Stop, OP_STOP_RECORDING)
            .await?;

        let timestamp = self.options.timestamp_format.format(&Local::now());
        self.dispatch(PanelEvent::RecordingStopped { timestamp });
        info!("Recording stopped");
        Ok(())
    }

    /// The single start/stop button: stop while recording, start otherwise
    pub async fn toggle_recording(&self) -> Result<(), PanelError> {
        let recording = self.lock().is_recording();
        if recording {
            self.stop_recording().await
        } else {
            self.start_recording().await
        }
    }

    /// Invoke a Trigger-style operation with an empty request
    async fn call_trigger(&self, action: PanelAction, name: &str) -> Result<(), PanelError> {
        self.until_unmounted(self.host.invoke_operation(name, empty_request()))
            .await?
            .and_then(|response| trigger_outcome(name, &response))
            .map_err(|e| {
                error!(operation = name, error = %e, "Failed to {}", action);
                PanelError::Operation { action, source: e }
            })
    }

    /// Run a host call unless the panel is unmounted first. Results that
    /// arrive after unmount are discarded.
    async fn until_unmounted<F, T>(&self, call: F) -> Result<T, PanelError>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => {
                debug!("Abandoning host call, panel unmounted");
                Err(PanelError::Unmounted)
            }
            out = call => {
                if self.is_mounted() {
                    Ok(out)
                } else {
                    debug!("Discarding host response, panel unmounted");
                    Err(PanelError::Unmounted)
                }
            }
        }
    }

    fn dispatch(&self, event: PanelEvent) {
        let mut state = self.lock();
        let current = std::mem::take(&mut *state);
        *state = reduce(current, event);
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        // Reducer never panics mid-update, so a poisoned lock still holds
        // consistent state
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A Trigger response may report failure in-band with `success: false`
fn trigger_outcome(name: &str, response: &Value) -> Result<(), HostError> {
    if response.get("success").and_then(Value::as_bool) == Some(false) {
        let reason = response
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("service reported failure");
        return Err(HostError::ServiceFailed {
            name: name.to_string(),
            reason: reason.to_string(),
        });
    }
    Ok(())
}
