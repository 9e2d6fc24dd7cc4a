//! TUI Widgets
//!
//! Custom widgets for the MED-LANE TUI.

mod agents;
mod progress;

pub use agents::render_agents;
pub use progress::render_progress;
