//! Localized tree materialization.
//!
//! For every origin route and every locale it maps to, one output file is
//! written under `routes.localized_dir`:
//!
//! - behavior-bearing files get a generated wrapper module importing the origin
//! - static assets are copied byte for byte
//!
//! Output is a pure function of the routes, the config and the origin
//! sources, so repeated passes over unchanged input write nothing.

mod exports;
mod state;
mod template;

pub use exports::{ExportName, OriginExports, SEGMENT_CONFIG_KEYS, detect_exports, is_root_layout};
pub use state::GenerationState;
pub use template::{
    CLIENT_ERROR, COMPONENT, FUNCTION, ROOT_LAYOUT, Template, TemplateVars, WrapperSpec,
    WrapperVars, render_wrapper,
};

use crate::config::I18nConfig;
use crate::route::{OriginRoute, RouteKind, TemplateClass};
use crate::schema::GITIGNORE;
use crate::utils::fs::{prune_empty_dirs, relative_path, to_slash, write_if_changed};
use crate::{debug, log};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

static SCRIPT_EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(j|t)sx?$").unwrap());

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] io::Error),

    #[error("failed to remove `{0}`")]
    Remove(PathBuf, #[source] io::Error),
}

/// Counts of one materialization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub written: usize,
    pub unchanged: usize,
    /// Emissions skipped because the origin could not be read.
    pub skipped: usize,
    /// Outputs of the previous pass that this pass no longer produces.
    pub removed: usize,
}

impl MaterializeReport {
    pub fn changed(&self) -> bool {
        self.written > 0 || self.removed > 0
    }
}

/// Write the localized tree for `routes`.
///
/// `state` holds the previous pass's outputs and is replaced by this pass's.
/// Unreadable origin files are skipped; write failures abort.
pub fn materialize(
    config: &I18nConfig,
    routes: &[OriginRoute],
    state: &mut GenerationState,
) -> Result<MaterializeReport, MaterializeError> {
    let localized_dir = &config.routes.localized_dir;
    let gitignore = localized_dir.join(".gitignore");
    write_if_changed(&gitignore, GITIGNORE.as_bytes())
        .map_err(|err| MaterializeError::Write(gitignore.clone(), err))?;

    let mut emitter = Emitter {
        previous: state,
        next: GenerationState::new(),
        report: MaterializeReport::default(),
    };

    for route in routes {
        let source_path = route.source_path(&config.routes.origin_dir);
        match route.kind.template_class() {
            TemplateClass::Copy => {
                let Some(bytes) = read_origin(&source_path, |path| fs::read(path)) else {
                    emitter.report.skipped += route.localized_paths.len();
                    continue;
                };
                for localized in route.localized_paths.values() {
                    emitter.emit(output_path(localized_dir, localized), &bytes)?;
                }
            }
            class => {
                let Some(source) = read_origin(&source_path, |path| fs::read_to_string(path)) else {
                    emitter.report.skipped += route.localized_paths.len();
                    continue;
                };
                let exports = detect_exports(&source);
                let route_name = route.route_name();
                let spec = WrapperSpec {
                    class,
                    root_layout: route.kind == RouteKind::Layout && is_root_layout(&source),
                    exports: &exports,
                    alternates_route: (route.kind.is_navigable()
                        && !config.routes.skip_language_alternates_metadata)
                        .then_some(route_name.as_str()),
                };
                let route_type = route.kind.component_name();

                for (locale, localized) in route.localized_paths.iter() {
                    let target = output_path(localized_dir, localized);
                    let vars = WrapperVars {
                        route_type: route_type.clone(),
                        relative_path: import_specifier(&target, &source_path),
                        locale: locale.to_string(),
                    };
                    if let Some(content) = render_wrapper(&spec, &vars) {
                        emitter.emit(target, content.as_bytes())?;
                    }
                }
            }
        }
    }

    let Emitter {
        previous,
        next,
        mut report,
    } = emitter;
    for stale in previous.stale_in(&next) {
        match fs::remove_file(stale) {
            Ok(()) => report.removed += 1,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(MaterializeError::Remove(stale.to_path_buf(), err)),
        }
        debug!("materialize"; "removed {}", stale.display());
        if let Some(parent) = stale.parent() {
            prune_empty_dirs(parent, localized_dir);
        }
    }
    *previous = next;

    Ok(report)
}

struct Emitter<'a> {
    previous: &'a mut GenerationState,
    next: GenerationState,
    report: MaterializeReport,
}

impl Emitter<'_> {
    fn emit(&mut self, target: PathBuf, content: &[u8]) -> Result<(), MaterializeError> {
        if self.previous.is_current(&target, content) && target.is_file() {
            self.report.unchanged += 1;
        } else if write_if_changed(&target, content)
            .map_err(|err| MaterializeError::Write(target.clone(), err))?
        {
            self.report.written += 1;
        } else {
            self.report.unchanged += 1;
        }
        self.next.record(target, content);
        Ok(())
    }
}

/// Read an origin file, logging instead of failing.
fn read_origin<T>(path: &Path, read: impl FnOnce(&Path) -> io::Result<T>) -> Option<T> {
    match read(path) {
        Ok(content) => Some(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("materialize"; "origin {} is gone, skipping", path.display());
            None
        }
        Err(err) => {
            log!("warning"; "skipping {}: {}", path.display(), err);
            None
        }
    }
}

fn output_path(localized_dir: &Path, localized: &str) -> PathBuf {
    localized_dir.join(localized.trim_start_matches('/'))
}

/// Module specifier of `origin` as imported from the file at `target`.
///
/// Script extensions are dropped; `.mdx` is kept.
fn import_specifier(target: &Path, origin: &Path) -> String {
    let from = target.parent().unwrap_or(target);
    let relative = to_slash(&relative_path(from, origin));
    let relative = SCRIPT_EXTENSION.replace(&relative, "");
    if relative.starts_with("../") || relative.starts_with("./") {
        relative.into_owned()
    } else {
        format!("./{relative}")
    }
}

// ============================================================================
// tests
// ============================================================================
