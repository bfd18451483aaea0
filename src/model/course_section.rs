use serde::{Deserialize, Serialize};

/// One scheduled offering of a course, as stored in a department file.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct CourseSection {
    pub crn: String,

    #[serde(rename = "dersKodu", default)]
    pub course_code: String,

    #[serde(rename = "dersAdi", default)]
    pub course_name: String,

    #[serde(rename = "adSoyad", default)]
    pub instructor: String,

    #[serde(rename = "mekanAdi", default)]
    pub location: String,

    /// Space-delimited English weekday names, e.g. "Monday Wednesday".
    #[serde(rename = "gunAdiEN", default)]
    pub day_names: String,

    /// Space-delimited "HH:MM/HH:MM" ranges aligned with `day_names`.
    #[serde(rename = "baslangicSaati", default)]
    pub time_ranges: String,
}

impl CourseSection {
    /// Pairs each day name with the time range at the same position.
    /// Surplus entries on either side are dropped.
    pub fn meetings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.day_names
            .split_whitespace()
            .zip(self.time_ranges.split_whitespace())
    }

    /// Multi-line description shown when a grid cell is inspected.
    pub fn details(&self) -> String {
        format!(
            "Course Code: {}\nCourse Name: {}\nInstructor: {}\nLocation: {}\nDays: {}\nTime: {}",
            self.course_code,
            self.course_name,
            self.instructor,
            self.location,
            self.day_names,
            self.time_ranges
        )
    }
}
