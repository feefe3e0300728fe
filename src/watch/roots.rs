use std::path::PathBuf;

use notify::{RecursiveMode, Watcher};
use rustc_hash::FxHashMap;

/// Directories the watcher should be attached to.
///
/// Roots that do not exist yet (or were deleted and recreated) are
/// attached on the next `maintain`.
pub(super) struct WatchRoots {
    desired: Vec<(PathBuf, RecursiveMode)>,
    attached: FxHashMap<PathBuf, RecursiveMode>,
}

impl WatchRoots {
    pub(super) fn new(desired: Vec<(PathBuf, RecursiveMode)>) -> Self {
        Self {
            desired,
            attached: FxHashMap::default(),
        }
    }

    /// Attach every root that exists right now.
    pub(super) fn attach_existing(&mut self, watcher: &mut impl Watcher) -> notify::Result<()> {
        for (path, mode) in &self.desired {
            if !path.exists() {
                continue;
            }
            watcher.watch(path, *mode)?;
            self.attached.insert(path.clone(), *mode);
        }
        Ok(())
    }

    /// Re-attach roots that reappeared.
    pub(super) fn maintain(&mut self, watcher: &mut impl Watcher) {
        self.attached.retain(|path, _| path.exists());

        for (path, mode) in &self.desired {
            if self.attached.contains_key(path) || !path.exists() {
                continue;
            }
            if watcher.watch(path, *mode).is_ok() {
                self.attached.insert(path.clone(), *mode);
                crate::debug!("watch"; "re-attached {}", path.display());
            }
        }
    }

    /// Switch to a new set of roots (after a config reload).
    pub(super) fn retarget(
        &mut self,
        watcher: &mut impl Watcher,
        desired: Vec<(PathBuf, RecursiveMode)>,
    ) {
        if desired == self.desired {
            return;
        }
        for (path, _) in std::mem::take(&mut self.attached) {
            let _ = watcher.unwatch(&path);
        }
        self.desired = desired;
        self.maintain(watcher);
    }
}
