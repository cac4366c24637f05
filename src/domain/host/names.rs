//! Parameter, operation and status topic names shared with the recording service

/// Bag name parameter (string)
pub const PARAM_BAG_NAME: &str = "/data_recording/bag_name";

/// Output directory parameter (string)
pub const PARAM_OUTPUT_DIRECTORY: &str = "/data_recording/output_directory";

/// Topic list parameter (list of strings)
pub const PARAM_TOPICS: &str = "/data_recording/topics";

/// Trigger-style operation that starts a recording
pub const OP_START_RECORDING: &str = "/data_recording/start_recording";

/// Trigger-style operation that stops the active recording
pub const OP_STOP_RECORDING: &str = "/data_recording/stop_recording";

/// Status topic carrying the current bag size in bytes
pub const TOPIC_BAG_SIZE: &str = "/data_recording/bag_size";

/// Status topic carrying the elapsed recording time
pub const TOPIC_DURATION: &str = "/data_recording/duration";

/// All status topics the panel subscribes to
pub const STATUS_TOPICS: &[&str] = &[TOPIC_BAG_SIZE, TOPIC_DURATION];
