use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::grid::{Grid, compute_grid};
use crate::core::palette::ColorAssignment;
use crate::core::render;
use crate::core::selection::SelectionSet;
use crate::core::state;
use crate::error::{ErrorKind, SchedulerError};
use crate::model::department::Department;

/// Everything the shell works with: the loaded department, the selected
/// CRNs and their colors. The grid is derived from these on demand.
pub struct Session {
    data_dir: PathBuf,
    state_path: Option<PathBuf>,
    department_name: Option<String>,
    dataset: Department,
    selection: SelectionSet,
    colors: ColorAssignment,
}

impl Session {
    /// Starts a session, restoring the selection from `state_path` if given.
    /// The selection is written back there when the session is dropped.
    pub fn new(data_dir: impl Into<PathBuf>, state_path: Option<PathBuf>) -> Self {
        let selection = match &state_path {
            Some(path) => state::load(path).unwrap_or_else(|err| {
                log::warn!("could not restore selection, starting empty: {}", err);
                if err.kind == ErrorKind::Parse {
                    if let Err(err) = state::quarantine(path) {
                        log::error!("could not move aside {}: {}", path.display(), err);
                    }
                }
                SelectionSet::new()
            }),
            None => SelectionSet::new(),
        };

        Session {
            data_dir: data_dir.into(),
            state_path,
            department_name: None,
            dataset: Department::default(),
            selection,
            colors: ColorAssignment::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_dir.clone(), Some(config.state_file.clone()))
    }

    pub fn with_colors(mut self, colors: ColorAssignment) -> Self {
        self.colors = colors;
        self
    }

    /// Department names available in the data directory, sorted.
    pub fn list_departments(&self) -> Result<Vec<String>, SchedulerError> {
        list_departments(&self.data_dir)
    }

    pub fn department_name(&self) -> Option<&str> {
        self.department_name.as_deref()
    }

    pub fn dataset(&self) -> &Department {
        &self.dataset
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Replaces the dataset with `<data_dir>/<name>.json`. On failure the
    /// dataset is left empty and the error is returned for display.
    pub fn load_department(&mut self, name: &str) -> Result<usize, SchedulerError> {
        let path = Department::file_path(&self.data_dir, name);
        match Department::load(&path) {
            Ok(department) => {
                let count = department.sections.len();
                self.dataset = department;
                self.department_name = Some(name.to_string());
                log::info!("department {} loaded with {} sections", name, count);
                Ok(count)
            }
            Err(err) => {
                self.dataset = Department::default();
                self.department_name = None;
                Err(err)
            }
        }
    }

    /// Adds a CRN and returns its list label, or `None` if it was already selected.
    pub fn add_crn(&mut self, input: &str) -> Result<Option<String>, SchedulerError> {
        if !self.selection.add(input)? {
            return Ok(None);
        }
        Ok(Some(self.label(input.trim())))
    }

    pub fn remove_crn(&mut self, crn: &str) -> bool {
        self.selection.remove(crn.trim())
    }

    /// "<crn> - <course code>" for one CRN against the current dataset.
    pub fn label(&self, crn: &str) -> String {
        format!("{} - {}", crn, self.dataset.course_code(crn))
    }

    pub fn selected_labels(&self) -> Vec<String> {
        self.selection.iter().map(|crn| self.label(crn)).collect()
    }

    pub fn grid(&mut self) -> Grid<'_> {
        compute_grid(&self.dataset, &self.selection, &mut self.colors)
    }

    pub fn cell_details(&mut self, row: usize, column: usize) -> Option<String> {
        self.grid().details(row, column)
    }

    pub fn render(&mut self) -> String {
        render::render(&self.grid())
    }

    /// Writes the rendered chart and its color legend to `path`.
    pub fn export_chart(&mut self, path: &Path) -> Result<(), SchedulerError> {
        let chart = render::render_chart(&self.grid());
        std::fs::write(path, chart)
            .map_err(|e| SchedulerError::from(e).context(&path.display().to_string()))?;
        log::info!("chart saved to {}", path.display());
        Ok(())
    }

    pub fn save_state(&self) -> Result<(), SchedulerError> {
        match &self.state_path {
            Some(path) => state::save(path, &self.selection),
            None => Ok(()),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(err) = self.save_state() {
            log::error!("failed to save selection: {}", err);
        }
    }
}

/// Sorted file stems of every `.json` file in `data_dir`.
pub fn list_departments(data_dir: &Path) -> Result<Vec<String>, SchedulerError> {
    let entries = std::fs::read_dir(data_dir)
        .map_err(|e| SchedulerError::from(e).context(&data_dir.display().to_string()))?;

    let mut names = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
