use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use tracing::warn;

use super::hasher;
use crate::common::errors::TidyError;
use crate::scanner::{self, EnumerateOpts, FileEntry};
use crate::workspace::Workspace;

/// Configuration for one duplicate scan
#[derive(Debug, Clone)]
pub struct DupConfig {
    /// Root directory to scan
    pub root: PathBuf,
    /// Only consider files strictly larger than this many bytes
    pub min_size: u64,
    /// Show progress indicators
    pub show_progress: bool,
}

/// A set of 2+ files sharing both byte size and content digest
#[derive(Debug, Clone)]
pub struct DupGroup {
    /// Hex SHA-256 digest of the shared content
    pub digest: String,
    /// Member files, in discovery order
    pub members: Vec<FileEntry>,
    /// Bytes that could be reclaimed by keeping one member
    pub wasted_bytes: u64,
}

/// Results of one duplicate scan. Nothing here is persisted between runs.
#[derive(Debug, Clone, Default)]
pub struct DupResults {
    /// Duplicate groups, largest waste first
    pub groups: Vec<DupGroup>,
    /// Files that passed the size filter
    pub files_scanned: usize,
    /// Content-hash invocations (always bounded by the sum of bucket sizes)
    pub files_hashed: usize,
    pub total_groups: usize,
    pub total_duplicates: usize,
    pub total_wasted: u64,
    pub duration_secs: f64,
    /// Per-file problems that were skipped, not fatal
    pub warnings: Vec<String>,
}

/// Run the duplicate detection pipeline: enumerate, bucket by size, hash
/// only multi-member buckets, group by digest.
///
/// The bucket-then-hash order is load-bearing: a file whose size is unique
/// in the scanned set is never read at all. Digest lines are spilled to a
/// workspace scratch file as the run's intermediate artifact; failure to
/// write scratch data aborts the run.
pub fn find_duplicates(
    config: &DupConfig,
    workspace: &Workspace,
) -> Result<DupResults, TidyError> {
    let start = std::time::Instant::now();
    let mut results = DupResults::default();

    let meta = config
        .root
        .metadata()
        .map_err(|_| TidyError::MissingRoot(config.root.clone()))?;
    if !meta.is_dir() {
        return Err(TidyError::NotADirectory(config.root.clone()));
    }

    // Pass 1: enumerate candidates. Per-entry errors are recorded and the
    // walk continues.
    let pb = make_spinner(config.show_progress, "Collecting files...");
    let mut entries = Vec::new();
    for item in scanner::enumerate(
        &config.root,
        EnumerateOpts::default().with_min_size(config.min_size),
    ) {
        match item {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!("enumeration: {}", e);
                results.warnings.push(e.to_string());
            }
        }
    }
    results.files_scanned = entries.len();
    finish_spinner(pb, &format!("Found {} candidate files", entries.len()));

    // Pass 2: size buckets. Singleton buckets are discarded unhashed.
    let buckets = hasher::group_by_size(entries);
    if buckets.is_empty() {
        results.duration_secs = start.elapsed().as_secs_f64();
        return Ok(results);
    }

    // Pass 3: full content hash within each surviving bucket.
    let scratch = workspace.scratch_file("digests");
    let mut spill = std::io::BufWriter::new(
        std::fs::File::create(&scratch)
            .map_err(|e| TidyError::Workspace(format!("cannot create scratch file: {}", e)))?,
    );

    let pb = make_progress(config.show_progress, buckets.len() as u64, "Hashing...");
    for (size, members) in &buckets {
        let mut by_digest: HashMap<String, Vec<FileEntry>> = HashMap::new();

        for entry in members {
            results.files_hashed += 1;
            match hasher::content_hash(&entry.path) {
                Ok(digest) => {
                    writeln!(spill, "{} {}", digest, entry.path.display()).map_err(|e| {
                        TidyError::Workspace(format!("cannot write scratch data: {}", e))
                    })?;
                    by_digest.entry(digest).or_default().push(entry.clone());
                }
                Err(e) => {
                    // Vanished or became unreadable since enumeration
                    warn!("{}", e);
                    results.warnings.push(e.to_string());
                }
            }
        }

        for (digest, group) in by_digest {
            if group.len() < 2 {
                continue;
            }
            let wasted = size * (group.len() as u64 - 1);
            results.groups.push(DupGroup {
                digest,
                members: group,
                wasted_bytes: wasted,
            });
        }

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    spill
        .flush()
        .map_err(|e| TidyError::Workspace(format!("cannot write scratch data: {}", e)))?;
    finish_progress(pb, &format!("{} duplicate groups", results.groups.len()));

    results
        .groups
        .sort_by(|a, b| b.wasted_bytes.cmp(&a.wasted_bytes));
    results.total_groups = results.groups.len();
    results.total_duplicates = results.groups.iter().map(|g| g.members.len() - 1).sum();
    results.total_wasted = results.groups.iter().map(|g| g.wasted_bytes).sum();
    results.duration_secs = start.elapsed().as_secs_f64();

    Ok(results)
}

// ── Progress helpers ──────────────────────────────────────────────────────────

fn make_spinner(show: bool, msg: &str) -> Option<ProgressBar> {
    if show {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        Some(pb)
    } else {
        None
    }
}

fn finish_spinner(pb: Option<ProgressBar>, msg: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(msg.to_string());
    }
}

fn make_progress(show: bool, total: u64, msg: &str) -> Option<ProgressBar> {
    if show {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("━━░"),
        );
        pb.set_message(msg.to_string());
        Some(pb)
    } else {
        None
    }
}

fn finish_progress(pb: Option<ProgressBar>, msg: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(msg.to_string());
    }
}
