use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::common::errors::TidyError;
use crate::scanner::FileEntry;

/// Compute the SHA-256 digest of a file's full content, as lowercase hex.
pub fn content_hash(path: &Path) -> Result<String, TidyError> {
    let file = File::open(path).map_err(|e| TidyError::Hash {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::with_capacity(1024 * 1024, file);
    let mut hasher = Sha256::new();

    let mut buffer = vec![0u8; 1024 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| TidyError::Hash {
            path: path.to_path_buf(),
            source: e,
        })?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Partition entries into size buckets, keeping only buckets with 2+ members.
///
/// Files with a unique size cannot be duplicates and must never reach the
/// hashing pass; this pruning is what keeps the pipeline linear on large
/// trees. Entries keep their discovery order within each bucket.
pub fn group_by_size(entries: Vec<FileEntry>) -> HashMap<u64, Vec<FileEntry>> {
    let mut buckets: HashMap<u64, Vec<FileEntry>> = HashMap::new();

    for entry in entries {
        buckets.entry(entry.size).or_default().push(entry);
    }

    buckets.retain(|_, members| members.len() > 1);
    buckets
}
