//! Application configuration value object

use serde::{Deserialize, Serialize};

use super::timestamp::TimestampFormat;

/// Default render cadence of the host adapter
pub const DEFAULT_RENDER_INTERVAL_MS: u64 = 250;

/// Default tracing filter
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default growth rate of a simulated bag (1 MiB/s)
pub const DEFAULT_BYTES_PER_SECOND: u64 = 1_048_576;

/// Topic catalog offered by the simulated host when none is configured
pub const DEFAULT_DEMO_TOPICS: &[&str] = &[
    "/camera/image_raw",
    "/imu/data",
    "/odom",
    "/scan",
    "/tf",
];

/// Settings for the in-process simulated host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    pub topics: Option<Vec<String>>,
    pub bytes_per_second: Option<u64>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
///
/// `bag_name`, `output_directory` and `topics` seed the recording
/// service's parameters; the panel picks them up on its first render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub bag_name: Option<String>,
    pub output_directory: Option<String>,
    pub topics: Option<Vec<String>>,
    pub render_interval_ms: Option<u64>,
    pub timestamp_format: Option<String>,
    pub log_level: Option<String>,
    pub demo: Option<DemoConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            bag_name: None,
            output_directory: None,
            topics: None,
            render_interval_ms: Some(DEFAULT_RENDER_INTERVAL_MS),
            timestamp_format: Some(super::DEFAULT_TIMESTAMP_FORMAT.to_string()),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
            demo: Some(DemoConfig {
                topics: Some(DEFAULT_DEMO_TOPICS.iter().map(|t| t.to_string()).collect()),
                bytes_per_second: Some(DEFAULT_BYTES_PER_SECOND),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            bag_name: other.bag_name.or(self.bag_name),
            output_directory: other.output_directory.or(self.output_directory),
            topics: other.topics.or(self.topics),
            render_interval_ms: other.render_interval_ms.or(self.render_interval_ms),
            timestamp_format: other.timestamp_format.or(self.timestamp_format),
            log_level: other.log_level.or(self.log_level),
            demo: Self::merge_demo_config(self.demo, other.demo),
        }
    }

    /// Merge demo config sections
    fn merge_demo_config(base: Option<DemoConfig>, other: Option<DemoConfig>) -> Option<DemoConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(DemoConfig {
                topics: o.topics.or(b.topics),
                bytes_per_second: o.bytes_per_second.or(b.bytes_per_second),
            }),
        }
    }

    /// Get render interval, or default if not set or zero
    pub fn render_interval_ms_or_default(&self) -> u64 {
        self.render_interval_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_RENDER_INTERVAL_MS)
    }

    /// Get timestamp format, or default if not set/invalid
    pub fn timestamp_format_or_default(&self) -> TimestampFormat {
        self.timestamp_format
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get log level filter, or "info" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Get simulated topic catalog, or the built-in sample topics
    pub fn demo_topics_or_default(&self) -> Vec<String> {
        self.demo
            .as_ref()
            .and_then(|d| d.topics.clone())
            .unwrap_or_else(|| DEFAULT_DEMO_TOPICS.iter().map(|t| t.to_string()).collect())
    }

    /// Get simulated bag growth rate, or 1 MiB/s if not set
    pub fn bytes_per_second_or_default(&self) -> u64 {
        self.demo
            .as_ref()
            .and_then(|d| d.bytes_per_second)
            .unwrap_or(DEFAULT_BYTES_PER_SECOND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.bag_name.is_none());
        assert!(config.output_directory.is_none());
        assert!(config.topics.is_none());
        assert_eq!(config.render_interval_ms, Some(250));
        assert_eq!(config.timestamp_format, Some("%Y-%m-%d %H:%M:%S".to_string()));
        assert_eq!(config.log_level, Some("info".to_string()));
        assert_eq!(config.demo_topics_or_default().len(), DEFAULT_DEMO_TOPICS.len());
        assert_eq!(config.bytes_per_second_or_default(), 1_048_576);
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.bag_name.is_none());
        assert!(config.render_interval_ms.is_none());
        assert!(config.log_level.is_none());
        assert!(config.demo.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            bag_name: Some("base".to_string()),
            render_interval_ms: Some(100),
            log_level: Some("info".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            bag_name: Some("other".to_string()),
            render_interval_ms: None, // Should not override
            log_level: Some("debug".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.bag_name, Some("other".to_string()));
        assert_eq!(merged.render_interval_ms, Some(100)); // Kept from base
        assert_eq!(merged.log_level, Some("debug".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            output_directory: Some("/data".to_string()),
            topics: Some(vec!["/tf".to_string()]),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.output_directory, Some("/data".to_string()));
        assert_eq!(merged.topics, Some(vec!["/tf".to_string()]));
    }

    #[test]
    fn render_interval_falls_back_on_zero() {
        let config = AppConfig {
            render_interval_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(config.render_interval_ms_or_default(), DEFAULT_RENDER_INTERVAL_MS);
    }

    #[test]
    fn timestamp_format_falls_back_on_invalid() {
        let config = AppConfig {
            timestamp_format: Some("%Q".to_string()),
            ..Default::default()
        };
        assert_eq!(config.timestamp_format_or_default(), TimestampFormat::default());

        let config = AppConfig {
            timestamp_format: Some("%H:%M".to_string()),
            ..Default::default()
        };
        assert_eq!(config.timestamp_format_or_default().pattern(), "%H:%M");
    }

    #[test]
    fn merge_demo_config() {
        let base = AppConfig {
            demo: Some(DemoConfig {
                topics: Some(vec!["/a".to_string()]),
                bytes_per_second: Some(10),
            }),
            ..Default::default()
        };
        let other = AppConfig {
            demo: Some(DemoConfig {
                bytes_per_second: Some(20),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.demo_topics_or_default(), vec!["/a".to_string()]);
        assert_eq!(merged.bytes_per_second_or_default(), 20);
    }
}
