//! The route schema: the published contract between generation and matching.
//!
//! ```json
//! {
//!   "locales": ["fi", "en"],
//!   "defaultLocale": "fi",
//!   "unPrefixedLocales": ["fi"],
//!   "routes": {
//!     "/about": { "fi": "/tietoa-sivustosta", "en": "/en/about-the-site" }
//!   }
//! }
//! ```
//!
//! Route order is significant: the matcher returns the first route whose
//! pattern matches, so the table is stored sorted (see [`build::compare_route_names`]).

pub mod build;
mod write;

pub use build::{RouteCollision, build_schema, compare_route_names};
pub use write::{SCHEMA_JSON, SCHEMA_TS, render_schema_module, write_schema};
pub(crate) use write::GITIGNORE;

use crate::config::{DomainConfig, I18nConfig};
use crate::route::LocaleMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// `route name -> locale -> pattern`, in match order.
pub type RouteTable = IndexMap<String, LocaleMap<String>>;

/// Errors raised while building, writing or loading a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{}", build::format_collisions(.0))]
    Collisions(Vec<RouteCollision>),

    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid schema JSON")]
    Json(#[from] serde_json::Error),
}

/// A domain serving a subset of locales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub domain: String,
    pub locales: Vec<String>,
    pub default_locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_default_locale: Option<bool>,
}

impl From<&DomainConfig> for Domain {
    fn from(config: &DomainConfig) -> Self {
        Self {
            domain: config.domain.clone(),
            locales: config.locales.clone(),
            default_locale: config.default_locale.clone(),
            prefix_default_locale: config.prefix_default_locale,
        }
    }
}

/// Immutable route table plus the locale settings needed to interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub locales: Vec<String>,
    pub default_locale: String,
    pub un_prefixed_locales: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<Domain>,
    pub routes: RouteTable,
}

impl Schema {
    /// Empty schema carrying the config's locale settings.
    pub fn from_config(config: &I18nConfig) -> Self {
        Self {
            locales: config.locales(),
            default_locale: config.default_locale().to_string(),
            un_prefixed_locales: config.unprefixed_locales(),
            domains: config.domains.iter().map(Domain::from).collect(),
            routes: RouteTable::new(),
        }
    }

    /// Read a `schema.json` written by a generation pass.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content =
            fs::read_to_string(path).map_err(|err| SchemaError::Io(path.to_path_buf(), err))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Tab-indented JSON, stable for identical schemas.
    pub fn to_json(&self) -> Result<String, SchemaError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn is_unprefixed(&self, locale: &str) -> bool {
        self.un_prefixed_locales.iter().any(|l| l == locale)
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// Domain serving `locale`, if any.
    pub fn domain_for(&self, locale: &str) -> Option<&Domain> {
        self.domains
            .iter()
            .find(|d| d.locales.iter().any(|l| l == locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Schema {
        let mut routes = RouteTable::new();
        routes.insert(
            "/about".to_string(),
            [("fi", "/tietoa"), ("en", "/en/about")]
                .into_iter()
                .map(|(l, p)| (l.to_string(), p.to_string()))
                .collect(),
        );
        Schema {
            locales: vec!["fi".into(), "en".into()],
            default_locale: "fi".into(),
            un_prefixed_locales: vec!["fi".into()],
            domains: Vec::new(),
            routes,
        }
    }

    #[test]
    fn test_json_uses_camel_case_and_omits_empty_domains() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"defaultLocale\": \"fi\""));
        assert!(json.contains("\"unPrefixedLocales\""));
        assert!(!json.contains("domains"));
        assert!(json.contains("\n\t\"routes\""));
    }

    #[test]
    fn test_load_written_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SCHEMA_JSON);
        fs::write(&path, sample().to_json().unwrap()).unwrap();

        let loaded = Schema::load(&path).unwrap();
        assert_eq!(loaded, sample());
        assert!(loaded.is_unprefixed("fi"));
        assert!(!loaded.is_unprefixed("en"));
    }

    #[test]
    fn test_route_table_keeps_key_order() {
        let mut schema = sample();
        schema.routes.insert(
            "/[...catchAll]".into(),
            [("sv", "/sv/*catchAll"), ("en", "/en/*catchAll"), ("fi", "/*catchAll")]
                .into_iter()
                .map(|(l, p)| (l.to_string(), p.to_string()))
                .collect(),
        );
        let loaded = Schema::from_json(&schema.to_json().unwrap()).unwrap();

        let names: Vec<&str> = loaded.routes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["/about", "/[...catchAll]"]);
        let catch_all = &loaded.routes["/[...catchAll]"];
        assert_eq!(catch_all.keys().map(String::as_str).collect::<Vec<_>>(), vec!["sv", "en", "fi"]);
    }

    #[test]
    fn test_load_missing_schema() {
        let dir = TempDir::new().unwrap();
        let err = Schema::load(&dir.path().join(SCHEMA_JSON)).unwrap_err();
        assert!(matches!(err, SchemaError::Io(..)));
    }

    #[test]
    fn test_domains_serialized() {
        let mut schema = sample();
        schema.domains.push(Domain {
            domain: "example.fi".into(),
            locales: vec!["fi".into()],
            default_locale: "fi".into(),
            prefix_default_locale: None,
        });
        let json = schema.to_json().unwrap();
        assert!(json.contains("\"domain\": \"example.fi\""));
        assert!(!json.contains("prefixDefaultLocale"));
        assert_eq!(
            Schema::from_json(&json).unwrap().domain_for("fi").map(|d| d.domain.as_str()),
            Some("example.fi")
        );
    }
}
