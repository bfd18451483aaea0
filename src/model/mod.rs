pub mod branch_code;
pub mod color;
pub mod course_section;
pub mod department;
