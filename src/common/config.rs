use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global tidyfs configuration.
///
/// Loaded once at startup and passed to every component by reference;
/// nothing mutates it after `main` finishes resolving CLI overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory whose filenames are normalized by `tidyfs rename`
    #[serde(default = "default_rename_dir")]
    pub rename_dir: String,

    /// Directory searched by `tidyfs dup`
    #[serde(default = "default_dup_dir")]
    pub dup_dir: String,

    /// Log files older than this many days are eligible for cleanup
    #[serde(default = "default_log_age_days")]
    pub log_age_days: u32,

    /// When true, all operations preview their actions instead of applying them
    #[serde(default = "default_preview")]
    pub preview: bool,

    /// Minimum file size considered by duplicate detection, in MiB
    #[serde(default = "default_min_dup_size_mib")]
    pub min_dup_size_mib: u64,

    /// Cache locations removed by cleanup (glob patterns, ~ expanded)
    #[serde(default = "default_cache_paths")]
    pub cache_paths: Vec<String>,

    /// Log directories swept by cleanup, subject to `log_age_days`
    #[serde(default = "default_log_paths")]
    pub log_paths: Vec<String>,

    /// Path substrings excluded from every scan
    #[serde(default)]
    pub exclude_paths: Vec<String>,
}

fn default_rename_dir() -> String {
    "~/Downloads".to_string()
}
fn default_dup_dir() -> String {
    "~".to_string()
}
fn default_log_age_days() -> u32 {
    30
}
fn default_preview() -> bool {
    true
}
fn default_min_dup_size_mib() -> u64 {
    1
}
fn default_cache_paths() -> Vec<String> {
    vec!["~/.cache/*".to_string()]
}
fn default_log_paths() -> Vec<String> {
    vec!["/var/log".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rename_dir: default_rename_dir(),
            dup_dir: default_dup_dir(),
            log_age_days: default_log_age_days(),
            preview: default_preview(),
            min_dup_size_mib: default_min_dup_size_mib(),
            cache_paths: default_cache_paths(),
            log_paths: default_log_paths(),
            exclude_paths: Vec::new(),
        }
    }
}

impl Config {
    /// Get the tidyfs data directory (~/.tidyfs)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".tidyfs")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Get the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::data_dir().join("logs")
    }

    /// Load config from file, or fall back to defaults if none exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        let dir = Self::data_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Initialize the tidyfs directories
    pub fn init_dirs() -> Result<()> {
        for dir in [Self::data_dir(), Self::logs_dir()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Minimum duplicate-candidate size in bytes
    pub fn min_dup_size_bytes(&self) -> u64 {
        self.min_dup_size_mib * 1024 * 1024
    }

    /// Check if a path should be excluded from scans
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.display().to_string();
        self.exclude_paths.iter().any(|p| path_str.contains(p))
    }

    /// Expand a leading `~` against the user's home directory
    pub fn expand_tilde(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        } else if path == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.preview);
        assert_eq!(config.log_age_days, 30);
        assert_eq!(config.min_dup_size_bytes(), 1024 * 1024);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str("log_age_days = 7").unwrap();
        assert_eq!(config.log_age_days, 7);
        assert!(config.preview, "unspecified fields keep their defaults");
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(Config::expand_tilde("~"), home);
            assert_eq!(Config::expand_tilde("~/Downloads"), home.join("Downloads"));
        }
        assert_eq!(Config::expand_tilde("/tmp/x"), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_is_excluded() {
        let config = Config {
            exclude_paths: vec!["node_modules".to_string()],
            ..Config::default()
        };
        assert!(config.is_excluded(Path::new("/a/node_modules/b")));
        assert!(!config.is_excluded(Path::new("/a/src/b")));
    }
}
