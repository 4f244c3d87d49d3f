use std::path::Path;

/// Paths that must NEVER be deleted under any circumstances.
/// This is a critical safety net against bugs in cleanup targets.
const PROTECTED_PATHS: &[&str] = &[
    "/", "/bin", "/boot", "/dev", "/etc", "/home", "/lib", "/opt", "/proc",
    "/root", "/sbin", "/sys", "/tmp", "/usr", "/var", "/var/log",
];

/// Directories under home that must never be deleted entirely
const PROTECTED_HOME_DIRS: &[&str] = &[
    "", // home dir itself
    "Desktop",
    "Documents",
    "Downloads",
    "Pictures",
    "Music",
    ".ssh",
    ".gnupg",
    ".config",
];

/// Check if a path is protected and should NEVER be deleted
pub fn is_protected(path: &Path) -> bool {
    let path_str = path.to_string_lossy();

    for protected in PROTECTED_PATHS {
        if path_str == *protected {
            return true;
        }
    }

    if let Some(home) = dirs::home_dir() {
        let home_str = home.to_string_lossy().to_string();

        if path_str == home_str {
            return true;
        }

        for dir in PROTECTED_HOME_DIRS {
            let protected_path = if dir.is_empty() {
                home_str.clone()
            } else {
                format!("{}/{}", home_str, dir)
            };
            if path_str == protected_path {
                return true;
            }
        }
    }

    false
}
