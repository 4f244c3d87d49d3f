//! Lazy filesystem enumeration.
//!
//! [`enumerate`] yields one `Result` per entry: unreadable or vanished
//! entries become `Err` elements and the walk continues, so a single bad
//! subtree never aborts an operation. Paths stay `PathBuf`/`OsStr` end to
//! end; entry boundaries are structural, so names containing whitespace or
//! newlines are never ambiguous.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::common::errors::TidyError;

/// One regular file produced by the enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Filtering options for [`enumerate`].
#[derive(Debug, Clone, Default)]
pub struct EnumerateOpts {
    /// Descend at most this many levels below `root` (unbounded when None)
    pub max_depth: Option<usize>,
    /// Only yield files strictly larger than this many bytes (no size
    /// filtering when None)
    pub min_size: Option<u64>,
}

impl EnumerateOpts {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_min_size(mut self, min_size: u64) -> Self {
        self.min_size = Some(min_size);
        self
    }
}

/// Walk `root` and lazily yield regular files matching `opts`.
///
/// Symlinks are not followed. Each element is produced only when the caller
/// asks for it; errors on individual entries are yielded in-band.
pub fn enumerate(
    root: &Path,
    opts: EnumerateOpts,
) -> impl Iterator<Item = Result<FileEntry, TidyError>> {
    let mut walker = WalkDir::new(root).follow_links(false);
    if let Some(depth) = opts.max_depth {
        walker = walker.max_depth(depth);
    }
    let min_size = opts.min_size;

    walker.into_iter().filter_map(move |entry| match entry {
        Ok(entry) => {
            if !entry.file_type().is_file() {
                return None;
            }
            match entry.metadata() {
                Ok(meta) if min_size.map_or(true, |min| meta.len() > min) => Some(Ok(FileEntry {
                    path: entry.path().to_path_buf(),
                    size: meta.len(),
                })),
                Ok(_) => None,
                Err(err) => Some(Err(walk_error(entry.path().to_path_buf(), err))),
            }
        }
        Err(err) => {
            let path = err.path().map(Path::to_path_buf).unwrap_or_default();
            Some(Err(walk_error(path, err)))
        }
    })
}

fn walk_error(path: PathBuf, err: walkdir::Error) -> TidyError {
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
    TidyError::Io { path, source }
}

/// Total size of every regular file under `path`.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.metadata().map(|m| m.len()).unwrap_or(0))
        .sum()
}
