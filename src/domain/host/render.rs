//! Render notification payload

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A data stream known to the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Aspects of host state the panel can ask to be included in render
/// notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchAspect {
    Topics,
    Parameters,
    CurrentFrame,
}

impl WatchAspect {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Topics => "topics",
            Self::Parameters => "parameters",
            Self::CurrentFrame => "currentFrame",
        }
    }
}

impl fmt::Display for WatchAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to receive messages for a topic
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub topic: String,
}

impl Subscription {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

/// A host-managed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    TextList(Vec<String>),
}

impl ParameterValue {
    /// String content, `None` for other kinds
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String list content, `None` for other kinds
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(items) => Some(items),
            _ => None,
        }
    }

    /// Empty strings and empty lists count as "no value" for the panel
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::TextList(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(items: Vec<String>) -> Self {
        Self::TextList(items)
    }
}

/// Parameter values keyed by exact parameter name
pub type ParameterStore = HashMap<String, ParameterValue>;

/// A message that arrived on a subscribed topic during the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMessage {
    pub topic: String,
    pub message: Value,
}

impl FrameMessage {
    pub fn new(topic: impl Into<String>, message: Value) -> Self {
        Self {
            topic: topic.into(),
            message,
        }
    }
}

/// Everything the host delivers with one render notification.
/// Aspects the panel did not watch are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    pub topics: Option<Vec<Topic>>,
    pub parameters: Option<ParameterStore>,
    pub current_frame: Option<Vec<FrameMessage>>,
}

impl RenderState {
    /// Look up a parameter by exact key
    pub fn parameter(&self, key: &str) -> Option<&ParameterValue> {
        self.parameters.as_ref().and_then(|p| p.get(key))
    }

    /// Current-frame messages, empty when none were delivered
    pub fn messages(&self) -> &[FrameMessage] {
        self.current_frame.as_deref().unwrap_or(&[])
    }
}
