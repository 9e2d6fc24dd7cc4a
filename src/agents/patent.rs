//! Patent Agent

use super::Agent;

pub struct PatentAgent;

impl PatentAgent {
    pub const ID: &'static str = "patent";
    pub const NAME: &'static str = "Patent Agent";
    pub const MESSAGE: &'static str = "📋 Patent Agent analyzing intellectual property...";

    pub const TASKS: [&'static str; 4] = [
        "Search patent databases",
        "Analyze existing claims",
        "Check expiry and exclusivity periods",
        "Assess freedom to operate",
    ];

    /// Index of the freedom-to-operate check
    pub const FREEDOM_TO_OPERATE: usize = 3;

    pub fn agent() -> Agent {
        Agent::new(Self::ID, Self::NAME, Self::MESSAGE, Self::TASKS)
    }
}
