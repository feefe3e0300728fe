//! Inspection commands: `routes`, `match`, `href` and `alternates`.
//!
//! `routes` always reflects the origin tree as it is now; the others use
//! the generated `schema.json` when there is one, so they answer with what
//! the app actually ships.

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;

use super::RouteArgs;
use globegen::config::I18nConfig;
use globegen::route::discover;
use globegen::router::{HrefOptions, RouteParams, Router, params_from_pairs};
use globegen::schema::{SCHEMA_JSON, Schema, build_schema};
use globegen::utils::plural_count;
use globegen::{debug, log};

pub fn routes(config: &I18nConfig, json: bool) -> Result<()> {
    let schema = fresh_schema(config)?;
    if json {
        println!("{}", schema.to_json()?);
        return Ok(());
    }

    let width = schema.locales.iter().map(String::len).max().unwrap_or(0);
    for (name, localized) in schema.routes.iter() {
        println!("{}", name.bold());
        for (locale, pattern) in localized.iter() {
            println!("  {}  {pattern}", format!("{locale:width$}").dimmed());
        }
    }
    log!("routes"; "{}", plural_count(schema.routes.len(), "route"));
    Ok(())
}

pub fn match_path(config: &I18nConfig, locale: &str, pathname: &str) -> Result<()> {
    let router = load_router(config)?;
    if !router.schema().has_locale(locale) {
        bail!("unknown locale `{locale}`");
    }

    match router.match_route(locale, pathname) {
        Some(matched) => println!("{}", serde_json::to_string_pretty(&matched)?),
        None => println!("no match"),
    }
    Ok(())
}

pub fn href(
    config: &I18nConfig,
    target: &RouteArgs,
    locale: Option<&str>,
    query: &[(String, String)],
    domain: bool,
) -> Result<()> {
    let router = load_router(config)?;
    let locale = locale.unwrap_or(router.schema().default_locale.as_str());
    if !router.schema().has_locale(locale) {
        bail!("unknown locale `{locale}`");
    }

    let mut options = HrefOptions::new(&target.route)
        .locale(locale)
        .params(route_params(target));
    for (key, value) in query {
        options = options.query(key, value);
    }
    if domain {
        options = options.with_domain(false);
    }

    let href = router
        .href(&options)
        .with_context(|| format!("cannot build href for `{}`", target.route))?;
    println!("{href}");
    Ok(())
}

pub fn alternates(config: &I18nConfig, target: &RouteArgs) -> Result<()> {
    let router = load_router(config)?;
    let alternates = router
        .language_alternates(&target.route, &route_params(target))
        .with_context(|| format!("cannot build alternates for `{}`", target.route))?;
    println!("{}", serde_json::to_string_pretty(&alternates)?);
    Ok(())
}

fn fresh_schema(config: &I18nConfig) -> Result<Schema> {
    let routes = discover(config).context("failed to discover origin routes")?;
    Ok(build_schema(config, &routes)?)
}

/// Router over the generated schema, or a freshly built one.
fn load_router(config: &I18nConfig) -> Result<Router> {
    let path = config.out_dir.join(SCHEMA_JSON);
    let schema = if path.is_file() {
        debug!("schema"; "using {}", config.root_relative(&path).display());
        Schema::load(&path).with_context(|| format!("failed to load `{}`", path.display()))?
    } else {
        debug!("schema"; "no generated schema, building from the origin tree");
        fresh_schema(config)?
    };
    Ok(Router::new(schema)?)
}

fn route_params(target: &RouteArgs) -> RouteParams {
    params_from_pairs(target.params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}
