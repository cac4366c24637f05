//! Host port: the primitives a visualization host offers a panel

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::host::{ParameterValue, RenderState, Subscription, WatchAspect};

/// Host errors
#[derive(Debug, Clone, Error)]
pub enum HostError {
    #[error("Failed to set parameter '{key}': {reason}")]
    ParameterRejected { key: String, reason: String },

    #[error("Service '{name}' failed: {reason}")]
    ServiceFailed { name: String, reason: String },

    #[error("Service '{name}' is not available")]
    ServiceUnavailable { name: String },
}

/// Acknowledgement the panel hands back once a render pass is finished.
/// The host does not deliver the next notification until it is called.
pub type RenderDone = Box<dyn FnOnce() + Send>;

/// One render notification: the host state plus its acknowledgement
pub struct RenderNotification {
    pub state: RenderState,
    pub done: RenderDone,
}

impl fmt::Debug for RenderNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderNotification")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Empty request body for Trigger-style operations
pub fn empty_request() -> Value {
    Value::Object(Map::new())
}

/// Port for the host a panel is mounted in
#[async_trait]
pub trait PanelHost: Send + Sync {
    /// Ask for an aspect of host state to be included in future renders
    fn watch(&self, aspect: WatchAspect);

    /// Ask for messages on the given topics to be delivered with renders
    fn subscribe(&self, subscriptions: &[Subscription]);

    /// Write a named parameter.
    ///
    /// # Arguments
    /// * `key` - Exact parameter name
    /// * `value` - New value
    async fn write_parameter(&self, key: &str, value: ParameterValue) -> Result<(), HostError>;

    /// Invoke a named remote operation.
    ///
    /// # Returns
    /// The operation's response payload, or an error if the call failed or
    /// the service reported failure
    async fn invoke_operation(&self, name: &str, request: Value) -> Result<Value, HostError>;
}
