//! Scenario validation.

use std::path::{Path, PathBuf};

use crate::scenario::{Scenario, ScenarioError};

/// Outcome for one scenario file.
#[derive(Debug)]
pub struct ValidationReport {
    /// File checked.
    pub path: PathBuf,
    /// `None` when the scenario expands into a consistent snapshot.
    pub error: Option<ScenarioError>,
}

/// Validate every `.ron` scenario in a directory, in file name order.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn validate_scenario_directory(path: &Path) -> std::io::Result<Vec<ValidationReport>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();

    Ok(files
        .into_iter()
        .map(|path| {
            let error = validate_scenario(&path).err();
            match &error {
                Some(e) => tracing::warn!("{}: {e}", path.display()),
                None => tracing::debug!("{}: ok", path.display()),
            }
            ValidationReport { path, error }
        })
        .collect())
}

/// Load a scenario and expand it with its area graph.
pub fn validate_scenario(path: &Path) -> Result<(), ScenarioError> {
    Scenario::load(path)?.build().map(|_| ())
}
