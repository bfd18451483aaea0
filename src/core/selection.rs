use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Ordered, duplicate-free list of selected CRNs.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    #[serde(default)]
    selected_crns: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a CRN typed by the user.
    ///
    /// Surrounding whitespace is ignored. Returns `Ok(false)` when the CRN
    /// was already selected, and an invalid-input error when it is not
    /// purely numeric.
    pub fn add(&mut self, crn: &str) -> Result<bool, SchedulerError> {
        let crn = crn.trim();
        if crn.is_empty() || !crn.chars().all(|c| c.is_ascii_digit()) {
            return Err(SchedulerError::invalid_input("CRN must be numeric."));
        }
        if self.contains(crn) {
            return Ok(false);
        }
        self.selected_crns.push(crn.to_string());
        Ok(true)
    }

    pub fn remove(&mut self, crn: &str) -> bool {
        let before = self.selected_crns.len();
        self.selected_crns.retain(|selected| selected != crn);
        self.selected_crns.len() != before
    }

    pub fn contains(&self, crn: &str) -> bool {
        self.selected_crns.iter().any(|selected| selected == crn)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected_crns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selected_crns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_crns.is_empty()
    }

    pub fn serialize(&self) -> Result<String, SchedulerError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a persisted selection. Repeated CRNs keep their first position.
    pub fn deserialize(json: &str) -> Result<Self, SchedulerError> {
        let raw: SelectionSet = serde_json::from_str(json)?;
        let mut selection = SelectionSet::new();
        for crn in raw.selected_crns {
            if !selection.contains(&crn) {
                selection.selected_crns.push(crn);
            }
        }
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rejects_non_numeric_input() {
        let mut selection = SelectionSet::new();
        for bad in ["abc", "", "  ", "12a", "-5", "١٢"] {
            let err = selection.add(bad).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidInput);
        }
        assert!(selection.is_empty());
    }

    #[test]
    fn add_then_remove_round_trips() {
        let mut selection = SelectionSet::new();
        selection.add("101").unwrap();
        let before = selection.clone();
        assert!(selection.add("20540").unwrap());
        assert!(selection.remove("20540"));
        assert_eq!(selection, before);
    }

    #[test]
    fn duplicates_are_ignored_and_input_trimmed() {
        let mut selection = SelectionSet::new();
        assert!(selection.add(" 20540 ").unwrap());
        assert!(!selection.add("20540").unwrap());
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["20540"]);
    }

    #[test]
    fn remove_missing_is_a_no_op() {
        let mut selection = SelectionSet::new();
        selection.add("1").unwrap();
        assert!(!selection.remove("2"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn serialization_keeps_order() {
        let mut selection = SelectionSet::new();
        selection.add("101").unwrap();
        selection.add("202").unwrap();
        let json = selection.serialize().unwrap();
        assert_eq!(json, r#"{"selected_crns":["101","202"]}"#);
        let restored = SelectionSet::deserialize(&json).unwrap();
        assert_eq!(restored.iter().collect::<Vec<_>>(), vec!["101", "202"]);
    }

    #[test]
    fn deserialize_tolerates_missing_field_and_duplicates() {
        assert!(SelectionSet::deserialize("{}").unwrap().is_empty());
        let restored = SelectionSet::deserialize(r#"{"selected_crns":["3","1","3"]}"#).unwrap();
        assert_eq!(restored.iter().collect::<Vec<_>>(), vec!["3", "1"]);
    }
}
