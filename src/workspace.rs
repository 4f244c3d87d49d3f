//! Scoped scratch storage for one run.
//!
//! A [`Workspace`] is a uniquely named directory under the system temp dir.
//! It is removed when the value drops, whether the run succeeded, reported
//! an error, or unwound. Destructors cannot run after SIGKILL, so [`Workspace::acquire`]
//! also sweeps stale workspaces left behind by previous runs.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::common::errors::TidyError;

const PREFIX: &str = "tidyfs-";

/// Workspaces older than this are considered abandoned by a killed run.
const STALE_AFTER: Duration = Duration::from_secs(24 * 60 * 60);

/// A process-private temporary directory, released on drop.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace. Failure here is fatal to the whole run:
    /// nothing downstream can proceed safely without scratch storage.
    pub fn acquire() -> Result<Self, TidyError> {
        sweep_stale(&std::env::temp_dir());

        let dir = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir()
            .map_err(|e| TidyError::Workspace(format!("cannot create temp directory: {}", e)))?;

        debug!(path = %dir.path().display(), "workspace acquired");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a scratch file inside the workspace (not created yet).
    pub fn scratch_file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Create and return a scratch subdirectory inside the workspace.
    pub fn scratch_dir(&self, name: &str) -> Result<PathBuf, TidyError> {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(&path)
            .map_err(|e| TidyError::Workspace(format!("cannot create scratch dir: {}", e)))?;
        Ok(path)
    }
}

/// Remove leftover `tidyfs-*` workspaces from runs that were killed before
/// their destructor could fire.
fn sweep_stale(temp_root: &Path) {
    sweep_older_than(temp_root, STALE_AFTER);
}

fn sweep_older_than(temp_root: &Path, stale_after: Duration) {
    let entries = match std::fs::read_dir(temp_root) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    let now = SystemTime::now();
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(PREFIX) {
            continue;
        }
        let is_stale = entry
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .and_then(|mtime| now.duration_since(mtime).ok())
            .map(|age| age > stale_after)
            .unwrap_or(false);
        if is_stale {
            let path = entry.path();
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(path = %path.display(), "could not sweep stale workspace: {}", e);
            } else {
                debug!(path = %path.display(), "swept stale workspace");
            }
        }
    }
}
