use std::path::PathBuf;

use crate::common::config::Config;

/// A declarative cleanup target derived from the configuration
#[derive(Debug, Clone)]
pub enum CleanupTarget {
    /// Cache locations removed wholesale (glob patterns)
    Caches { patterns: Vec<String> },
    /// Log directories where only files older than the configured age go
    StaleLogs { dirs: Vec<String> },
}

/// Build the cleanup target list for this run
pub fn cleanup_targets(config: &Config) -> Vec<CleanupTarget> {
    vec![
        CleanupTarget::Caches {
            patterns: config.cache_paths.clone(),
        },
        CleanupTarget::StaleLogs {
            dirs: config.log_paths.clone(),
        },
    ]
}

/// Expand `~` and glob patterns into concrete paths
pub fn expand_patterns(patterns: &[String]) -> Vec<PathBuf> {
    let mut expanded = Vec::new();

    for pattern in patterns {
        let resolved = Config::expand_tilde(pattern);
        let resolved = resolved.to_string_lossy().into_owned();

        if resolved.contains('*') {
            if let Ok(entries) = glob::glob(&resolved) {
                expanded.extend(entries.filter_map(|e| e.ok()));
            }
        } else {
            expanded.push(PathBuf::from(resolved));
        }
    }

    expanded
}
