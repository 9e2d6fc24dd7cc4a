//! Safety Agent
//!
//! Evaluates the risk profile of the proposed modification: adverse events,
//! interactions and contraindications.

use super::Agent;

pub struct SafetyAgent;

impl SafetyAgent {
    pub const ID: &'static str = "safety";
    pub const NAME: &'static str = "Safety Agent";
    pub const MESSAGE: &'static str = "🛡️ Safety Agent evaluating risk profile...";

    pub const TASKS: [&'static str; 3] = [
        "Review adverse event reports",
        "Check drug-drug interactions",
        "Assess contraindications",
    ];

    pub fn agent() -> Agent {
        Agent::new(Self::ID, Self::NAME, Self::MESSAGE, Self::TASKS)
    }
}
