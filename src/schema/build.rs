//! Route table construction from discovered origin routes.

use super::{RouteTable, Schema, SchemaError};
use crate::config::I18nConfig;
use crate::debug;
use crate::route::{LocaleMap, OriginRoute, grammar};
use indexmap::IndexMap;
use crate::utils::plural_s;
use std::cmp::Ordering;

/// Several plain origin directories produce the same route name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCollision {
    pub route_name: String,
    /// Origin paths claiming the name, in discovery order.
    pub sources: Vec<String>,
}

/// Build the schema for one generation pass.
///
/// Only navigable routes (pages, markdown pages) enter the table. When
/// several origin files share a route name:
/// - files in the same directory are locale variants and are merged
/// - a plain route takes precedence over parallel-slot and intercepting variants
/// - among variants the first in discovery order is kept
/// - two plain directories are an error
pub fn build_schema(config: &I18nConfig, routes: &[OriginRoute]) -> Result<Schema, SchemaError> {
    let mut schema = Schema::from_config(config);
    let mut owners: IndexMap<String, Owner<'_>> = IndexMap::new();
    let mut collisions: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut table = RouteTable::new();

    for route in routes.iter().filter(|r| r.kind.is_navigable()) {
        let name = route.route_name();
        let candidate = Owner::of(route);

        match owners.get(&name) {
            None => {}
            Some(owner) if owner.dir == candidate.dir => {}
            Some(owner) if owner.plain && candidate.plain => {
                let mut sources = collisions
                    .get(&name)
                    .cloned()
                    .unwrap_or_else(|| vec![owner.origin_path.to_string()]);
                sources.push(route.origin_path.clone());
                collisions.insert(name.clone(), sources);
                continue;
            }
            Some(owner) if candidate.plain => {
                debug!("schema"; "{} takes {} over {}", route.origin_path, name, owner.origin_path);
                table.insert(name.clone(), LocaleMap::new());
            }
            Some(owner) => {
                debug!("schema"; "{} already provided by {}, skipping {}", name, owner.origin_path, route.origin_path);
                continue;
            }
        }
        owners.insert(name.clone(), candidate);

        let mut patterns = table.get(&name).cloned().unwrap_or_default();
        for (locale, path) in route.localized_paths.iter() {
            patterns.insert(locale.clone(), grammar::route_pattern(path, schema.is_unprefixed(locale)));
        }
        table.insert(name, patterns);
    }

    if !collisions.is_empty() {
        return Err(SchemaError::Collisions(
            collisions
                .iter()
                .map(|(name, sources)| RouteCollision {
                    route_name: name.to_string(),
                    sources: sources.clone(),
                })
                .collect(),
        ));
    }

    for patterns in table.values_mut() {
        sort_by_locale_order(patterns, &schema.locales);
    }
    table.sort_by(|a, _, b, _| compare_route_names(a, b));
    schema.routes = table;
    Ok(schema)
}

/// Route that currently provides a route name.
struct Owner<'a> {
    origin_path: &'a str,
    dir: &'a str,
    plain: bool,
}

impl<'a> Owner<'a> {
    fn of(route: &'a OriginRoute) -> Self {
        let path = route.origin_path.as_str();
        Self {
            origin_path: path,
            dir: path.rsplit_once('/').map_or("", |(dir, _)| dir),
            plain: route.is_plain(),
        }
    }
}

fn sort_by_locale_order(patterns: &mut LocaleMap<String>, locales: &[String]) {
    let position = |locale: &str| locales.iter().position(|l| l == locale).unwrap_or(usize::MAX);
    patterns.sort_by(|a, _, b, _| position(a).cmp(&position(b)));
}

/// Match-order comparison of two route names.
///
/// 1. static routes first, in byte order
/// 2. non-catch-all dynamic routes before catch-all routes
/// 3. deeper first dynamic segment first
/// 4. byte order
pub fn compare_route_names(a: &str, b: &str) -> Ordering {
    let (a_dynamic, b_dynamic) = (a.contains('['), b.contains('['));
    match (a_dynamic, b_dynamic) {
        (false, false) => a.cmp(b),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => {
            let (a_catch_all, b_catch_all) = (a.contains("[..."), b.contains("[..."));
            a_catch_all
                .cmp(&b_catch_all)
                .then_with(|| dynamic_depth(b).cmp(&dynamic_depth(a)))
                .then_with(|| a.cmp(b))
        }
    }
}

/// Number of `/` before the first dynamic segment.
fn dynamic_depth(name: &str) -> usize {
    name.split('[').next().unwrap_or_default().matches('/').count()
}

/// Render collisions for terminal output.
pub(super) fn format_collisions(collisions: &[RouteCollision]) -> String {
    let mut out = format!(
        "route name collision{} ({} route{}):",
        plural_s(collisions.len()),
        collisions.len(),
        plural_s(collisions.len())
    );
    for collision in collisions {
        out.push_str(&format!(
            "\n{} ({} source{})",
            collision.route_name,
            collision.sources.len(),
            plural_s(collision.sources.len())
        ));
        for source in &collision.sources {
            out.push_str(&format!("\n  - {source}"));
        }
    }
    out
}

// ============================================================================
// tests
// ============================================================================
