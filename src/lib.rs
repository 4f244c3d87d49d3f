//! # tidyfs
//!
//! A safety-first filesystem maintenance utility for a single local machine.
//!
//! tidyfs performs three independent operations:
//!
//! - **Cleanup**: remove cache paths and log files older than a configured age
//! - **Duplicate Detection**: report groups of files with identical content
//!   (size-bucket pre-filter, then full SHA-256; detection only, never deletes)
//! - **Filename Normalization**: rename files to a canonical lowercase form,
//!   never overwriting existing files
//!
//! Every mutating action flows through one preview-aware [`gate::Gate`];
//! dry-run is the default mode. Intermediate data lives in a
//! [`workspace::Workspace`], a uniquely named temp directory removed when the
//! run ends.

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod duplicates;
pub mod gate;
pub mod rename;
pub mod scanner;
pub mod workspace;
