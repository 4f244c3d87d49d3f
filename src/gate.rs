//! The execution gate: every filesystem mutation in tidyfs goes through
//! [`Gate::perform`]. In preview mode the gate describes the action and
//! touches nothing, which makes dry-run a total guarantee instead of
//! something each operation has to remember to implement.

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::common::errors::TidyError;
use crate::common::safety;

/// Process-wide execution mode, decided once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Describe every action, perform none
    Preview,
    /// Perform actions for real
    Live,
}

/// A fully-resolved mutating operation, represented as data so the gate can
/// uniformly log-or-execute it. No shell interpretation anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RemoveFile { path: PathBuf },
    RemoveDir { path: PathBuf },
    Rename { from: PathBuf, to: PathBuf },
}

impl Action {
    /// The path this action mutates (the source, for renames)
    fn target(&self) -> &Path {
        match self {
            Action::RemoveFile { path } | Action::RemoveDir { path } => path,
            Action::Rename { from, .. } => from,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::RemoveFile { path } => write!(f, "remove file '{}'", path.display()),
            Action::RemoveDir { path } => write!(f, "remove directory '{}'", path.display()),
            Action::Rename { from, to } => {
                write!(f, "rename '{}' -> '{}'", from.display(), to.display())
            }
        }
    }
}

/// What the gate did with an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Live mode: the mutation was performed
    Applied,
    /// Preview mode: the mutation was described, nothing touched
    Previewed,
}

/// Preview-aware wrapper around all mutating filesystem calls.
///
/// Keeps a log of every accepted action in both modes so callers (and tests)
/// can assert that live mode performs exactly what preview would have printed.
#[derive(Debug)]
pub struct Gate {
    mode: Mode,
    log: RefCell<Vec<Action>>,
}

impl Gate {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            log: RefCell::new(Vec::new()),
        }
    }

    pub fn preview() -> Self {
        Self::new(Mode::Preview)
    }

    pub fn live() -> Self {
        Self::new(Mode::Live)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_preview(&self) -> bool {
        self.mode == Mode::Preview
    }

    /// All actions the gate has accepted so far, in order.
    pub fn actions(&self) -> Vec<Action> {
        self.log.borrow().clone()
    }

    /// Perform (or, in preview mode, describe) one atomic action.
    ///
    /// Refusals (protected paths, rename destinations that already exist)
    /// are checked in both modes, so a preview run reports the same
    /// outcomes a live run would.
    pub fn perform(&self, action: Action) -> Result<Outcome, TidyError> {
        if safety::is_protected(action.target()) {
            return Err(TidyError::ProtectedPath(action.target().to_path_buf()));
        }

        if let Action::Rename { to, .. } = &action {
            // Never-overwrite semantics. `fs::rename` replaces an existing
            // destination, so this check is the only guard; a destination
            // created between here and the rename below would be clobbered.
            // That window is accepted: there is no portable exclusive-create
            // rename in std (RENAME_NOREPLACE is Linux-only).
            if to.symlink_metadata().is_ok() {
                return Err(TidyError::DestinationExists(to.clone()));
            }
        }

        match self.mode {
            Mode::Preview => {
                println!("[preview] would {}", action);
                info!(action = %action, "preview");
                self.log.borrow_mut().push(action);
                Ok(Outcome::Previewed)
            }
            Mode::Live => {
                self.execute(&action)?;
                info!(action = %action, "applied");
                self.log.borrow_mut().push(action);
                Ok(Outcome::Applied)
            }
        }
    }

    fn execute(&self, action: &Action) -> Result<(), TidyError> {
        match action {
            Action::RemoveFile { path } => match fs::remove_file(path) {
                Ok(()) => Ok(()),
                // Already gone counts as done
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(TidyError::io(path, e)),
            },
            Action::RemoveDir { path } => match fs::remove_dir_all(path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(TidyError::io(path, e)),
            },
            Action::Rename { from, to } => {
                fs::rename(from, to).map_err(|e| TidyError::io(from, e))
            }
        }
    }
}
