//! Bag size value object

use serde::Deserialize;
use serde_json::Value;

/// Divisor for the human-readable size
pub const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

/// Size of the bag currently being written, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct BagSize(u64);

/// A bag size status message is either a bare integer or a std_msgs
/// style wrapper with a `data` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BagSizePayload {
    Bare(u64),
    Wrapped { data: u64 },
}

impl BagSize {
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Decode a status message payload, `None` if it is not a
    /// non-negative integer.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        match BagSizePayload::deserialize(payload).ok()? {
            BagSizePayload::Bare(bytes) | BagSizePayload::Wrapped { data: bytes } => {
                Some(Self(bytes))
            }
        }
    }

    pub const fn bytes(&self) -> u64 {
        self.0
    }

    /// Human-readable size, see [`format_bag_size`]
    pub fn human_readable(&self) -> String {
        format_bag_size(self.0)
    }
}

/// Format a byte count in megabytes with two decimals, e.g. `"2.00 MB"`.
pub fn format_bag_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MEGABYTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_exact_megabytes() {
        assert_eq!(format_bag_size(2_097_152), "2.00 MB");
    }

    #[test]
    fn format_zero() {
        assert_eq!(format_bag_size(0), "0.00 MB");
    }

    #[test]
    fn format_fractional() {
        assert_eq!(format_bag_size(1_572_864), "1.50 MB");
        assert_eq!(format_bag_size(10_485), "0.01 MB");
    }

    #[test]
    fn decode_bare_integer() {
        assert_eq!(BagSize::from_payload(&json!(4096)), Some(BagSize::from_bytes(4096)));
    }

    #[test]
    fn decode_wrapped_integer() {
        assert_eq!(
            BagSize::from_payload(&json!({"data": 2_097_152})).map(|s| s.human_readable()),
            Some("2.00 MB".to_string())
        );
    }

    #[test]
    fn decode_rejects_non_integers() {
        assert!(BagSize::from_payload(&json!(-5)).is_none());
        assert!(BagSize::from_payload(&json!("1024")).is_none());
        assert!(BagSize::from_payload(&json!({"size": 1})).is_none());
    }
}
