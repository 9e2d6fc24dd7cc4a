//! Drug Catalog
//!
//! The fixed in-memory list of drugs the dashboard offers, plus name search.

use crate::models::Drug;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    drugs: Vec<Drug>,
}

impl Catalog {
    pub fn new(drugs: Vec<Drug>) -> Self {
        Self { drugs }
    }

    /// The three-drug catalog shipped with the demo
    pub fn demo() -> Self {
        Self::new(vec![
            Drug {
                id: 1,
                name: "Aspirin".to_string(),
                description: "This is used in pain relief and anti-inflammatory treatment"
                    .to_string(),
                manufacturer: "Bayer Pharmaceuticals".to_string(),
                effects: "Reduces pain, fever, and inflammation".to_string(),
                side_effects: "Stomach irritation, bleeding risk, allergic reactions".to_string(),
                safety: "Generally safe with proper dosage. Avoid with bleeding disorders."
                    .to_string(),
            },
            Drug {
                id: 2,
                name: "Metformin".to_string(),
                description: "This is used in diabetes management and blood sugar control"
                    .to_string(),
                manufacturer: "Bristol-Myers Squibb".to_string(),
                effects: "Lowers blood glucose levels, improves insulin sensitivity".to_string(),
                side_effects: "Nausea, diarrhea, vitamin B12 deficiency".to_string(),
                safety: "Well-tolerated. Regular monitoring required for kidney function."
                    .to_string(),
            },
            Drug {
                id: 3,
                name: "Lisinopril".to_string(),
                description:
                    "This is used in hypertension treatment and heart failure management"
                        .to_string(),
                manufacturer: "AstraZeneca".to_string(),
                effects: "Lowers blood pressure, reduces strain on heart".to_string(),
                side_effects: "Dizziness, dry cough, elevated potassium".to_string(),
                safety: "Monitor kidney function and potassium levels regularly.".to_string(),
            },
        ])
    }

    pub fn drugs(&self) -> &[Drug] {
        &self.drugs
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Drug> {
        self.drugs.iter().find(|d| d.id == id)
    }

    /// Case-insensitive exact name lookup
    pub fn find_by_name(&self, name: &str) -> Option<&Drug> {
        self.drugs
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Drugs whose name contains `term`, ignoring case, in catalog order.
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Drug> {
        let needle = term.to_lowercase();
        self.drugs
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(drugs: &[&Drug]) -> Vec<String> {
        drugs.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn test_empty_search_returns_full_catalog_in_order() {
        let catalog = Catalog::demo();
        let found = catalog.search("");
        assert_eq!(names(&found), vec!["Aspirin", "Metformin", "Lisinopril"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = Catalog::demo();
        assert_eq!(names(&catalog.search("MET")), vec!["Metformin"]);
        assert_eq!(names(&catalog.search("in")), vec!["Aspirin", "Metformin", "Lisinopril"]);
        assert_eq!(names(&catalog.search("pril")), vec!["Lisinopril"]);
    }

    #[test]
    fn test_non_matching_search_is_empty() {
        let catalog = Catalog::demo();
        assert!(catalog.search("ibuprofen").is_empty());
        assert!(catalog.search("aspirin ").is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.search("").is_empty());
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.get(2).map(|d| d.name.as_str()), Some("Metformin"));
        assert!(catalog.get(42).is_none());
        assert_eq!(
            catalog.find_by_name(" lisinopril ").map(|d| d.id),
            Some(3)
        );
    }
}
