pub mod grouper;
pub mod hasher;

pub use grouper::{find_duplicates, DupConfig, DupGroup, DupResults};
