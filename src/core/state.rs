use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use crate::core::selection::SelectionSet;
use crate::error::SchedulerError;

/// Restores the last saved selection. A missing file is a fresh start.
pub fn load(path: &Path) -> Result<SelectionSet, SchedulerError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let selection = SelectionSet::deserialize(&text)
                .map_err(|e| e.context(&path.display().to_string()))?;
            log::info!("restored {} CRNs from {}", selection.len(), path.display());
            Ok(selection)
        }
        Err(err) if err.kind() == IoErrorKind::NotFound => {
            log::debug!("no state file at {}, starting empty", path.display());
            Ok(SelectionSet::new())
        }
        Err(err) => Err(SchedulerError::from(err).context(&path.display().to_string())),
    }
}

/// Moves an unreadable state file to `<path>.bad` so the next save does
/// not overwrite it.
pub fn quarantine(path: &Path) -> Result<PathBuf, SchedulerError> {
    let mut bad = path.as_os_str().to_owned();
    bad.push(".bad");
    let bad = PathBuf::from(bad);
    std::fs::rename(path, &bad)?;
    log::warn!("moved unreadable state file to {}", bad.display());
    Ok(bad)
}

pub fn save(path: &Path, selection: &SelectionSet) -> Result<(), SchedulerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, selection.serialize()?)?;
    log::info!("saved {} CRNs to {}", selection.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn missing_state_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let selection = load(&dir.path().join("state.json")).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let mut selection = SelectionSet::new();
        selection.add("202").unwrap();
        selection.add("101").unwrap();
        save(&path, &selection).unwrap();
        assert_eq!(load(&path).unwrap(), selection);
    }

    #[test]
    fn quarantine_keeps_the_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let bad = quarantine(&path).unwrap();
        assert_eq!(bad, dir.path().join("state.json.bad"));
        assert!(!path.exists());
        assert_eq!(std::fs::read_to_string(&bad).unwrap(), "[1, 2");
    }

    #[test]
    fn corrupt_state_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert_eq!(load(&path).unwrap_err().kind, ErrorKind::Parse);
    }
}
