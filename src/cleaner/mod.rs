//! Cache and log cleanup.
//!
//! Removes configured cache locations and log files older than the
//! configured age. All removal flows through the execution gate; per-path
//! failures (a vanished file, a permission-denied log dir when running
//! unprivileged) are recorded warnings, never fatal.

pub mod targets;

use chrono::{DateTime, Duration, Local};
use tracing::warn;

use crate::common::config::Config;
use crate::common::errors::TidyError;
use crate::common::safety;
use crate::gate::{Action, Gate};
use crate::scanner::{self, EnumerateOpts};

use targets::CleanupTarget;

/// Outcome of one cleanup pass
#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    pub files_removed: usize,
    pub bytes_freed: u64,
    pub warnings: Vec<String>,
}

/// Remove cache paths and stale log files per the configuration.
pub fn clean(config: &Config, gate: &Gate) -> Result<CleanReport, TidyError> {
    let mut report = CleanReport::default();
    let cutoff = Local::now() - Duration::days(i64::from(config.log_age_days));

    for target in targets::cleanup_targets(config) {
        match &target {
            CleanupTarget::Caches { patterns } => {
                clean_caches(patterns, config, gate, &mut report);
            }
            CleanupTarget::StaleLogs { dirs } => {
                clean_stale_logs(dirs, cutoff, config, gate, &mut report);
            }
        }
    }

    Ok(report)
}

fn clean_caches(patterns: &[String], config: &Config, gate: &Gate, report: &mut CleanReport) {
    for path in targets::expand_patterns(patterns) {
        if config.is_excluded(&path) || !path.exists() {
            continue;
        }
        if safety::is_protected(&path) {
            report
                .warnings
                .push(format!("skipped protected path: {}", path.display()));
            continue;
        }

        let (action, size) = if path.is_dir() {
            (Action::RemoveDir { path: path.clone() }, scanner::dir_size(&path))
        } else {
            let size = path.metadata().map(|m| m.len()).unwrap_or(0);
            (Action::RemoveFile { path: path.clone() }, size)
        };

        match gate.perform(action) {
            Ok(_) => {
                report.files_removed += 1;
                report.bytes_freed += size;
            }
            Err(e) => {
                warn!("cleanup: {}", e);
                report.warnings.push(e.to_string());
            }
        }
    }
}

fn clean_stale_logs(
    dirs: &[String],
    cutoff: DateTime<Local>,
    config: &Config,
    gate: &Gate,
    report: &mut CleanReport,
) {
    for dir in dirs {
        let dir = Config::expand_tilde(dir);
        if !dir.is_dir() {
            continue;
        }

        for item in scanner::enumerate(&dir, EnumerateOpts::default()) {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    // Unreadable subtree, e.g. /var/log without privileges
                    warn!("cleanup: {}", e);
                    report.warnings.push(e.to_string());
                    continue;
                }
            };

            if config.is_excluded(&entry.path) {
                continue;
            }

            let stale = entry
                .path
                .metadata()
                .and_then(|m| m.modified())
                .map(|mtime| DateTime::<Local>::from(mtime) < cutoff)
                .unwrap_or(false);
            if !stale {
                continue;
            }

            match gate.perform(Action::RemoveFile {
                path: entry.path.clone(),
            }) {
                Ok(_) => {
                    report.files_removed += 1;
                    report.bytes_freed += entry.size;
                }
                Err(e) => {
                    warn!("cleanup: {}", e);
                    report.warnings.push(e.to_string());
                }
            }
        }
    }
}
