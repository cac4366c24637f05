//! Recording duration value object

use std::fmt;
use std::time::Duration as StdDuration;

use serde::Deserialize;
use serde_json::Value;

const NANOS_PER_MILLI: u32 = 1_000_000;
const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Elapsed recording time as reported by the recording service.
///
/// Mirrors the `{sec, nanosec}` layout of a ROS duration message: whole
/// seconds plus the sub-second remainder in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RecordingDuration {
    secs: u64,
    nanos: u32,
}

/// Wire shape of a duration status message. Accepts both the ROS 2
/// (`sec`/`nanosec`) and ROS 1 (`secs`/`nsecs`) field names.
#[derive(Debug, Deserialize)]
struct DurationPayload {
    #[serde(alias = "secs")]
    sec: i64,
    #[serde(alias = "nsec", alias = "nsecs", default)]
    nanosec: i64,
}

impl RecordingDuration {
    /// Zero elapsed time
    pub const ZERO: Self = Self { secs: 0, nanos: 0 };

    /// Create from whole seconds and a nanosecond remainder.
    /// Remainders of a full second or more carry into `secs`.
    pub const fn new(secs: u64, nanos: u32) -> Self {
        Self {
            secs: secs + (nanos / NANOS_PER_SEC) as u64,
            nanos: nanos % NANOS_PER_SEC,
        }
    }

    /// Decode a status message payload.
    ///
    /// Returns `None` when the payload is not a duration object or carries
    /// negative components.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let raw = DurationPayload::deserialize(payload).ok()?;
        let secs = u64::try_from(raw.sec).ok()?;
        let nanos = u64::try_from(raw.nanosec).ok()?;
        let carry = nanos / u64::from(NANOS_PER_SEC);
        let nanos = (nanos % u64::from(NANOS_PER_SEC)) as u32;
        Some(Self::new(secs.checked_add(carry)?, nanos))
    }

    /// Whole seconds
    pub const fn secs(&self) -> u64 {
        self.secs
    }

    /// Sub-second remainder in nanoseconds
    pub const fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    /// Total elapsed milliseconds (sub-millisecond part truncated)
    pub const fn as_millis(&self) -> u64 {
        self.secs
            .saturating_mul(1000)
            .saturating_add((self.nanos / NANOS_PER_MILLI) as u64)
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::new(self.secs, self.nanos)
    }
}

impl From<StdDuration> for RecordingDuration {
    fn from(d: StdDuration) -> Self {
        Self::new(d.as_secs(), d.subsec_nanos())
    }
}

impl fmt::Display for RecordingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_elapsed(self.as_millis()))
    }
}

/// Format elapsed milliseconds as zero-padded `HH:MM:SS`.
///
/// Truncates to the whole second. Hours are not wrapped at 24.
pub fn format_elapsed(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    format!("{:02}:{:02}:{:02}", hours, minutes % 60, seconds % 60)
}
