// MED-LANE - Drug repurposing workflow demo with a simulated multi-agent pipeline

pub mod agents;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod headless; // Line-oriented front-end
pub mod models;
pub mod screen; // Pure projection of controller state
pub mod settings; // Persisted theme preference
pub mod tui; // Terminal User Interface
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use controller::ViewController;
pub use screen::Screen;
