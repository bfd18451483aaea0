use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "course-grid.toml";

pub const BRANCH_CODES_URL: &str =
    "https://obs.itu.edu.tr/public/DersProgram/SearchBransKoduByProgramSeviye";
pub const COURSE_DATA_URL: &str = "https://obs.itu.edu.tr/public/DersProgram/DersProgramSearch";

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding one `<department>.json` per branch code.
    pub data_dir: PathBuf,
    /// Where the selected CRNs are kept between runs.
    pub state_file: PathBuf,
    /// Program level sent to the catalog ("LS" = undergraduate).
    pub program_level: String,
    pub branch_codes_url: String,
    pub course_data_url: String,
    /// Minimum gap between the start of two catalog requests.
    pub request_interval_ms: u64,
    pub max_concurrent_requests: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            state_file: PathBuf::from("state.json"),
            program_level: "LS".to_string(),
            branch_codes_url: BRANCH_CODES_URL.to_string(),
            course_data_url: COURSE_DATA_URL.to_string(),
            request_interval_ms: 1000,
            max_concurrent_requests: 4,
        }
    }
}

impl Config {
    /// Reads `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, SchedulerError> {
        if !path.exists() {
            log::debug!("{} not found, using default config", path.display());
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)
            .map_err(|e| SchedulerError::from(e).context(&path.display().to_string()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }

    /// Worker pool width, never zero.
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_requests.max(1)
    }
}
