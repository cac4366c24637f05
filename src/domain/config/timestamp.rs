//! Timestamp format value object

use std::fmt;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};

use crate::domain::error::InvalidTimestampFormat;

/// Default display format for saved recordings
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A strftime pattern validated up front, so formatting never fails later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat {
    pattern: String,
}

impl TimestampFormat {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render a time with this pattern
    pub fn format<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        time.format(&self.pattern).to_string()
    }
}

impl FromStr for TimestampFormat {
    type Err = InvalidTimestampFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() || StrftimeItems::new(s).any(|item| matches!(item, Item::Error)) {
            return Err(InvalidTimestampFormat {
                input: s.to_string(),
            });
        }
        Ok(Self {
            pattern: s.to_string(),
        })
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn default_format_renders() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(TimestampFormat::default().format(&time), "2024-03-09 14:05:07");
    }

    #[test]
    fn custom_format_renders() {
        let fmt: TimestampFormat = "%d/%m/%Y %H:%M".parse().unwrap();
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(fmt.format(&time), "09/03/2024 14:05");
    }

    #[test]
    fn rejects_invalid_specifier() {
        assert!("%Q".parse::<TimestampFormat>().is_err());
        assert!("%".parse::<TimestampFormat>().is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!("".parse::<TimestampFormat>().is_err());
        assert!("   ".parse::<TimestampFormat>().is_err());
    }
}
