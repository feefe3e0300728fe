//! Output fingerprints carried from one generation pass to the next.

use crate::utils::hash;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Fingerprint of every file the previous pass produced.
///
/// Owned by the caller (the watch loop keeps one across passes); a fresh
/// state means "nothing known", which makes the next pass write everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationState {
    outputs: FxHashMap<PathBuf, u64>,
}

impl GenerationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.outputs.contains_key(path)
    }

    /// Whether `path` was produced with exactly `content` last time.
    pub fn is_current(&self, path: &Path, content: &[u8]) -> bool {
        self.outputs.get(path) == Some(&hash::compute(content))
    }

    pub fn record(&mut self, path: PathBuf, content: &[u8]) {
        self.outputs.insert(path, hash::compute(content));
    }

    /// Paths recorded here but missing from `next`, sorted.
    pub fn stale_in(&self, next: &Self) -> Vec<&Path> {
        let mut stale: Vec<&Path> = self
            .outputs
            .keys()
            .filter(|path| !next.contains(path))
            .map(PathBuf::as_path)
            .collect();
        stale.sort();
        stale
    }
}
