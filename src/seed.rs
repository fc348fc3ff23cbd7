// Seed collections loaded from YAML or JSON files

use crate::models::{Task, default_seed};
use crate::store::TaskStore;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk seed layout: `tasks: [{id, title, completed}]`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Read a seed file, picking the format from its extension
pub fn load_seed(path: &Path) -> Result<Vec<Task>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read seed file {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    let seed: SeedFile = match ext.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML seed {}", path.display()))?,
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON seed {}", path.display()))?,
        _ => {
            return Err(eyre!(
                "Unsupported seed file: {} (expected .yaml, .yml or .json)",
                path.display()
            ));
        }
    };

    info!(file = ?path, count = seed.tasks.len(), "Loaded seed tasks");
    Ok(seed.tasks)
}

/// Default seed location under the user's config directory
pub fn default_seed_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskzen").join("seed.yaml"))
}

/// Seed file to start from, if any
///
/// An explicit path always wins. Without one, the config-dir seed is used if it exists.
pub fn resolve_seed_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_seed_path().filter(|path| path.exists()),
    }
}

/// Build the task store from the resolved seed
///
/// Falls back to the built-in single-task seed when no seed file applies.
/// A seed file with duplicate or invalid ids is rejected with its path in the error.
pub fn open_store(explicit: Option<&Path>) -> Result<TaskStore> {
    let Some(path) = resolve_seed_path(explicit) else {
        debug!("No seed file found, using built-in seed");
        return TaskStore::with_seed(default_seed());
    };

    let tasks = load_seed(&path)?;
    TaskStore::with_seed(tasks).with_context(|| format!("Invalid seed in {}", path.display()))
}
