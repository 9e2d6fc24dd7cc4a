//! Settings Module
//!
//! The only thing MED-LANE remembers between launches is the colour theme.
//! It is stored as a single `theme` key in `settings.json` under the data
//! directory.

pub mod storage;

pub use storage::*;

use crate::models::ThemeMode;
use serde::{Deserialize, Serialize};

/// User settings structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSettings {
    /// Theme preference
    #[serde(default)]
    pub theme: ThemeMode,
}
