//! Generation passes.
//!
//! A pass turns the origin tree into the localized tree plus the schema
//! artifacts:
//!
//! - **Discover** - walk `routes.origin_dir` into origin routes
//! - **Schema** - assign route names and patterns, reject collisions
//! - **Materialize** - write wrappers and copies under `routes.localized_dir`
//! - **Write** - persist `schema.json` / `schema.ts` under `out_dir`
//!
//! Everything that can fail on user input runs before the output is touched.

use crate::config::I18nConfig;
use crate::materialize::{GenerationState, MaterializeReport, materialize};
use crate::route::{OriginRoute, discover};
use crate::schema::{Schema, build_schema, write_schema};
use crate::utils::{fs::remove_dir_all, plural_count};
use crate::{debug, log};
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// Outcome of one generation pass.
#[derive(Debug, Clone)]
pub struct PassSummary {
    /// Origin routes discovered.
    pub files: usize,
    pub schema: Schema,
    pub report: MaterializeReport,
    pub schema_changed: bool,
    pub elapsed: Duration,
}

impl PassSummary {
    /// Whether anything on disk changed.
    pub fn changed(&self) -> bool {
        self.report.changed() || self.schema_changed
    }

    /// One-line summary, e.g. `localized 12 files in 3.41 ms`.
    pub fn message(&self) -> String {
        format!(
            "localized {} in {:.2} ms",
            plural_count(self.files, "file"),
            self.elapsed.as_secs_f64() * 1000.0
        )
    }

    pub fn log(&self) {
        log!("generate"; "{}", self.message());
    }
}

/// Regenerate everything from scratch.
///
/// The localized directory is wiped only after discovery and schema
/// construction succeeded, so a broken origin tree leaves the previous
/// output in place.
pub fn full_pass(config: &I18nConfig, state: &mut GenerationState) -> Result<PassSummary> {
    let start = Instant::now();
    let routes = discover(config).context("failed to discover origin routes")?;
    let schema = build_schema(config, &routes)?;

    let localized_dir = &config.routes.localized_dir;
    remove_dir_all(localized_dir)
        .with_context(|| format!("failed to clear `{}`", localized_dir.display()))?;
    *state = GenerationState::new();

    finish(config, &routes, schema, state, start)
}

/// Regenerate against the previous pass's outputs.
///
/// Routes are rediscovered from scratch; only outputs whose bytes changed
/// are written and outputs that disappeared are removed.
pub fn incremental_pass(config: &I18nConfig, state: &mut GenerationState) -> Result<PassSummary> {
    let start = Instant::now();
    let routes = discover(config).context("failed to discover origin routes")?;
    let schema = build_schema(config, &routes)?;

    finish(config, &routes, schema, state, start)
}

fn finish(
    config: &I18nConfig,
    routes: &[OriginRoute],
    schema: Schema,
    state: &mut GenerationState,
    start: Instant,
) -> Result<PassSummary> {
    let report = materialize(config, routes, state).context("failed to write localized routes")?;
    let schema_changed = write_schema(&config.out_dir, &schema)
        .with_context(|| format!("failed to write schema to `{}`", config.out_dir.display()))?;

    debug!(
        "generate";
        "{} written, {} unchanged, {} removed, {} skipped",
        report.written, report.unchanged, report.removed, report.skipped
    );

    Ok(PassSummary {
        files: routes.len(),
        schema,
        report,
        schema_changed,
        elapsed: start.elapsed(),
    })
}
