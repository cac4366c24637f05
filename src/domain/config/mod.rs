//! Configuration domain module

mod app_config;
mod timestamp;

pub use app_config::{
    AppConfig, DemoConfig, DEFAULT_BYTES_PER_SECOND, DEFAULT_DEMO_TOPICS, DEFAULT_LOG_LEVEL,
    DEFAULT_RENDER_INTERVAL_MS,
};
pub use timestamp::{TimestampFormat, DEFAULT_TIMESTAMP_FORMAT};
