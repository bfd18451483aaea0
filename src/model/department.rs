use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::model::course_section::CourseSection;

/// Label used when a CRN has no section in the loaded department.
pub const UNKNOWN_COURSE: &str = "Unknown";

/// One department file as written by the fetcher.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Department {
    #[serde(rename = "dersProgramList", default)]
    pub sections: Vec<CourseSection>,
}

impl Department {
    pub fn new(sections: Vec<CourseSection>) -> Self {
        Department { sections }
    }

    /// `<data_dir>/<name>.json`, the file holding one department.
    pub fn file_path(data_dir: &Path, name: &str) -> PathBuf {
        data_dir.join(format!("{}.json", name))
    }

    pub fn load(path: &Path) -> Result<Self, SchedulerError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SchedulerError::from(e).context(&path.display().to_string()))?;
        let department: Department = serde_json::from_str(&text)
            .map_err(|e| SchedulerError::from(e).context(&path.display().to_string()))?;
        log::debug!("loaded {} sections from {}", department.sections.len(), path.display());
        Ok(department)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// First section with the given CRN.
    pub fn find(&self, crn: &str) -> Option<&CourseSection> {
        self.sections.iter().find(|section| section.crn == crn)
    }

    pub fn course_code(&self, crn: &str) -> &str {
        self.find(crn)
            .map(|section| section.course_code.as_str())
            .unwrap_or(UNKNOWN_COURSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn section(crn: &str, code: &str) -> CourseSection {
        CourseSection {
            crn: crn.into(),
            course_code: code.into(),
            ..Default::default()
        }
    }

    #[test]
    fn course_code_falls_back_to_unknown() {
        let department =
            Department::new(vec![section("101", "FIZ 101"), section("101", "DUP 000")]);
        assert_eq!(department.course_code("101"), "FIZ 101");
        assert_eq!(department.course_code("999"), UNKNOWN_COURSE);
    }

    #[test]
    fn file_path_appends_json_extension() {
        let path = Department::file_path(Path::new("catalog"), "BLG");
        assert_eq!(path, Path::new("catalog").join("BLG.json"));
    }

    #[test]
    fn missing_list_field_means_empty() {
        let department: Department = serde_json::from_str("{}").unwrap();
        assert!(department.is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Department::load(&dir.path().join("NOPE.json")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.message.contains("NOPE.json"));
    }

    #[test]
    fn load_reports_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BAD.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Department::load(&path).unwrap_err().kind, ErrorKind::Parse);
    }
}
