//! Host-facing data: what the host delivers to the panel on each render
//! and the names the panel and the recording service agree on.

pub mod names;
mod render;

pub use render::{
    FrameMessage, ParameterStore, ParameterValue, RenderState, Subscription, Topic, WatchAspect,
};
