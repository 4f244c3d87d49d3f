//! Filename normalization.
//!
//! Renames regular files directly under one directory to a canonical form:
//! lowercase, whitespace runs collapsed to a single hyphen, everything
//! outside `[a-z0-9._-]` stripped. A rename that would overwrite an
//! existing, distinct file is always refused, never forced.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::common::errors::TidyError;
use crate::gate::{Action, Gate};
use crate::scanner::{self, EnumerateOpts};

/// What happened (or would happen) to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Renamed (or would be, in preview mode)
    Apply,
    /// Canonical name taken by another file, skipped
    SkipCollision,
    /// Name is already canonical, untouched and not counted
    Identical,
}

/// The computed plan for one file
#[derive(Debug, Clone)]
pub struct RenamePlan {
    pub original: PathBuf,
    pub canonical: String,
    pub disposition: Disposition,
}

/// Outcome of normalizing one directory
#[derive(Debug, Clone, Default)]
pub struct RenameReport {
    pub renamed: usize,
    pub collisions: usize,
    pub plan: Vec<RenamePlan>,
    pub warnings: Vec<String>,
}

/// Compute the canonical form of a filename.
///
/// Lowercase, then each whitespace run becomes one hyphen, then every
/// character outside `[a-z0-9._-]` is stripped. Idempotent: canonical
/// output contains nothing the transform would change.
pub fn canonical_name(name: &str) -> String {
    let mut hyphenated = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                hyphenated.push('-');
                in_whitespace = true;
            }
        } else {
            hyphenated.push(ch);
            in_whitespace = false;
        }
    }

    hyphenated
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// Normalize every regular file directly under `dir` (non-recursive).
///
/// Collision checks account for renames already committed earlier in the
/// same run (in preview mode, renames that would have been committed), so
/// two sources that normalize to the same target yield exactly one rename
/// and one collision.
pub fn normalize_dir(dir: &Path, gate: &Gate) -> Result<RenameReport, TidyError> {
    let meta = dir
        .metadata()
        .map_err(|_| TidyError::MissingRoot(dir.to_path_buf()))?;
    if !meta.is_dir() {
        return Err(TidyError::NotADirectory(dir.to_path_buf()));
    }

    let mut report = RenameReport::default();

    // Every name currently present in the directory (files, dirs, symlinks)
    // claims its spot; committed renames claim theirs as the run progresses.
    let mut claimed: HashSet<String> = std::fs::read_dir(dir)
        .map_err(|e| TidyError::io(dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();

    let mut files = Vec::new();
    for item in scanner::enumerate(dir, EnumerateOpts::default().with_max_depth(1)) {
        match item {
            Ok(entry) => files.push(entry.path),
            Err(e) => {
                warn!("enumeration: {}", e);
                report.warnings.push(e.to_string());
            }
        }
    }
    // Deterministic processing order; each plan entry is still computed
    // independently apart from the claimed-name check.
    files.sort();

    for path in files {
        let Some(name) = path.file_name() else { continue };
        let name = name.to_string_lossy();
        let canonical = canonical_name(&name);

        if canonical == name {
            report.plan.push(RenamePlan {
                original: path,
                canonical,
                disposition: Disposition::Identical,
            });
            continue;
        }

        if canonical.is_empty() || claimed.contains(&canonical) {
            report.collisions += 1;
            report.plan.push(RenamePlan {
                original: path,
                canonical,
                disposition: Disposition::SkipCollision,
            });
            continue;
        }

        let dest = dir.join(&canonical);
        match gate.perform(Action::Rename {
            from: path.clone(),
            to: dest,
        }) {
            Ok(_) => {
                claimed.insert(canonical.clone());
                report.renamed += 1;
                report.plan.push(RenamePlan {
                    original: path,
                    canonical,
                    disposition: Disposition::Apply,
                });
            }
            Err(TidyError::DestinationExists(dest)) => {
                // Destination appeared inside the check/rename window
                report.collisions += 1;
                report.plan.push(RenamePlan {
                    original: path,
                    canonical,
                    disposition: Disposition::SkipCollision,
                });
                warn!("rename target appeared: {}", dest.display());
            }
            Err(e) => {
                warn!("rename failed for '{}': {}", path.display(), e);
                report.warnings.push(e.to_string());
            }
        }
    }

    Ok(report)
}
