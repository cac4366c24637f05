//! Recording status domain module

mod bag_size;
mod duration;

pub use bag_size::{format_bag_size, BagSize, BYTES_PER_MEGABYTE};
pub use duration::{format_elapsed, RecordingDuration};
