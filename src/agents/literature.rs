//! Literature Agent
//!
//! Stands in for the scientific evidence review. A real implementation would
//! query PubMed/PMC, ClinicalTrials.gov and a vector store of prior findings;
//! here it is a fixed checklist the runner walks through.

use super::Agent;

pub struct LiteratureAgent;

impl LiteratureAgent {
    pub const ID: &'static str = "literature";
    pub const NAME: &'static str = "Literature Agent";
    pub const MESSAGE: &'static str = "📚 Literature Agent analyzing scientific data...";

    pub const TASKS: [&'static str; 4] = [
        "Search PubMed and PMC for related studies",
        "Screen clinical trial registries",
        "Extract mechanism-of-action evidence",
        "Summarize supporting literature",
    ];

    pub fn agent() -> Agent {
        Agent::new(Self::ID, Self::NAME, Self::MESSAGE, Self::TASKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literature_agent() {
        let agent = LiteratureAgent::agent();
        assert_eq!(agent.id, "literature");
        assert_eq!(agent.tasks.len(), 4);
        assert!(agent.message.contains("scientific data"));
    }
}
