//! Recording control panel state, transitions and view model

mod reducer;
mod state;
mod view;

pub use reducer::{reduce, PanelEvent};
pub use state::{PanelState, SavedBag};
pub use view::{ActionButton, PanelView, RecordingStatus, TopicEntry};
