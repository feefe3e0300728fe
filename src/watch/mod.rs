//! Watch mode.
//!
//! ```text
//! notify → Debouncer (timing, dedup) → classify → full / incremental pass
//! ```
//!
//! The watcher is attached before the first pass so edits made while it
//! runs are not lost. The origin directory is watched recursively and the
//! project root non-recursively (for the config file).

mod debouncer;
mod roots;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, anyhow};
use crossbeam::channel::{self, Receiver, Sender};
use notify::RecursiveMode;
use rustc_hash::FxHashMap;

use crate::config::I18nConfig;
use crate::generate::{PassSummary, full_pass, incremental_pass};
use crate::logger::{status_error, status_success, status_unchanged};
use crate::materialize::GenerationState;
use crate::{debug, log};
use debouncer::{ChangeKind, Debouncer};
use roots::WatchRoots;

/// Has shutdown been requested? (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Wakes the watch loop out of its wait when Ctrl+C arrives.
static SHUTDOWN_SIGNAL: LazyLock<(Sender<()>, Receiver<()>)> =
    LazyLock::new(|| channel::bounded(1));

/// Install the Ctrl+C handler. Call once, before [`watch`].
pub fn setup_shutdown_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);
        let _ = SHUTDOWN_SIGNAL.0.try_send(());
    })
    .map_err(|e| anyhow!("failed to set Ctrl+C handler: {}", e))
}

pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}

/// What a settled batch of changes asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    /// The config file changed: reload, then regenerate from scratch.
    Config,
    /// Something under the origin directory changed.
    Origin,
}

/// Run a full pass, then regenerate on every change until Ctrl+C.
pub fn watch(config: I18nConfig) -> Result<()> {
    let mut config = config;
    let (event_tx, event_rx) = channel::unbounded();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = event_tx.send(res);
    })?;
    let mut roots = WatchRoots::new(watch_roots(&config));
    roots.attach_existing(&mut watcher)?;

    let mut state = GenerationState::new();
    report(full_pass(&config, &mut state));
    log!(
        "watch";
        "watching {} for changes, press Ctrl+C to stop",
        config.root_relative(&config.routes.origin_dir).display()
    );

    let shutdown = SHUTDOWN_SIGNAL.1.clone();
    let mut debouncer = Debouncer::new();
    while !is_shutdown() {
        crossbeam::select! {
            recv(event_rx) -> msg => match msg {
                Ok(Ok(event)) => debouncer.add_event(&event),
                Ok(Err(err)) => debug!("watch"; "watcher error: {}", err),
                Err(_) => break,
            },
            recv(shutdown) -> _ => break,
            default(debouncer.sleep_duration()) => {}
        }

        let Some(changes) = debouncer.take_if_ready() else {
            continue;
        };
        match classify(&config, &changes) {
            Some(Trigger::Config) => {
                match I18nConfig::load_from(&config.config_path) {
                    Ok(next) => {
                        log!("watch"; "config changed, regenerating");
                        config = next;
                        roots.retarget(&mut watcher, watch_roots(&config));
                        report(full_pass(&config, &mut state));
                    }
                    Err(err) => status_error(
                        "config reload failed, keeping previous config",
                        &format!("{:#}", anyhow::Error::from(err)),
                    ),
                }
            }
            Some(Trigger::Origin) => {
                // nothing on disk is known after a failed full pass
                let result = if state.is_empty() {
                    full_pass(&config, &mut state)
                } else {
                    incremental_pass(&config, &mut state)
                };
                report(result);
            }
            None => {}
        }
        roots.maintain(&mut watcher);
    }

    log!("watch"; "stopped");
    Ok(())
}

fn watch_roots(config: &I18nConfig) -> Vec<(PathBuf, RecursiveMode)> {
    vec![
        (config.routes.origin_dir.clone(), RecursiveMode::Recursive),
        (config.get_root().to_path_buf(), RecursiveMode::NonRecursive),
    ]
}

/// Decide what a batch of changes means; generated output is ignored.
fn classify(config: &I18nConfig, changes: &FxHashMap<PathBuf, ChangeKind>) -> Option<Trigger> {
    let generated = |path: &Path| {
        path.starts_with(&config.routes.localized_dir) || path.starts_with(&config.out_dir)
    };

    let mut trigger = None;
    for (path, kind) in changes {
        if *path == config.config_path {
            debug!("watch"; "config {}", kind.label());
            return Some(Trigger::Config);
        }
        if path.starts_with(&config.routes.origin_dir) && !generated(path) {
            debug!("watch"; "{} {}", kind.label(), config.root_relative(path).display());
            trigger = Some(Trigger::Origin);
        }
    }
    trigger
}

fn report(result: Result<PassSummary>) {
    match result {
        Ok(summary) if summary.changed() => status_success(&summary.message()),
        Ok(summary) => status_unchanged(&format!("{}, no changes", summary.message())),
        Err(err) => status_error("generation failed", &format!("{err:#}")),
    }
}
