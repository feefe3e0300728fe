//! Project configuration for `i18n.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── routes     # [routes]
//! │   └── domain     # [[domains]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # I18nConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! locales = ["en", "fi"]
//! default_locale = "fi"
//! prefix_default_locale = false
//!
//! [routes]
//! origin_dir = "src/_app"
//! ```
//!
//! Locale routing runs in one of two modes: *prefix mode* (`locales` +
//! `default_locale`) or *domain mode* (`[[domains]]`). The derived views
//! (`locales()`, `unprefixed_locales()`, ...) hide the difference from the
//! rest of the crate.

pub mod section;
pub mod types;
mod util;

pub use section::{DomainConfig, RoutesConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::{find_config_file, find_config_file_from};

use crate::log;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "i18n.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `i18n.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Supported locales (prefix mode).
    pub locales: Vec<String>,

    /// Locale used when none is requested (prefix mode).
    pub default_locale: String,

    /// Serve the default locale under `/<locale>` too.
    pub prefix_default_locale: bool,

    /// Directory for the schema artifacts.
    pub out_dir: PathBuf,

    /// Route generation settings
    pub routes: RoutesConfig,

    /// Domain-based routing (domain mode)
    pub domains: Vec<DomainConfig>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            locales: Vec::new(),
            default_locale: String::new(),
            prefix_default_locale: true,
            out_dir: "globegen".into(),
            routes: RoutesConfig::default(),
            domains: Vec::new(),
        }
    }
}

impl I18nConfig {
    /// Locate, parse and validate the config file.
    ///
    /// `config_name` is searched upward from cwd unless it is absolute.
    /// The project root becomes the config file's parent directory.
    pub fn load(config_name: &Path) -> Result<Self, ConfigError> {
        let config_path = find_config_file(config_name)
            .ok_or_else(|| ConfigError::NotFound(config_name.to_path_buf()))?;
        Self::load_from(&config_path)
    }

    /// Parse and validate a known config file path.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.is_file() {
            return Err(ConfigError::NotFound(config_path.to_path_buf()));
        }
        let mut config = Self::from_path(config_path)?;
        config.finalize(config_path);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Resolve the root and make every configured directory absolute.
    fn finalize(&mut self, config_path: &Path) {
        self.config_path = crate::utils::fs::normalize_path(config_path);
        self.root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.normalize_paths();
    }

    /// Join relative directories onto the root.
    ///
    /// Only the root is canonicalized; output directories may not exist yet.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();
        self.out_dir = root.join(&self.out_dir);
        self.routes.origin_dir = root.join(&self.routes.origin_dir);
        self.routes.localized_dir = root.join(&self.routes.localized_dir);
    }

    /// Set the root directory and resolve paths against it (tests, embedders).
    pub fn with_root(mut self, root: &Path) -> Self {
        self.root = root.to_path_buf();
        self.config_path = root.join(CONFIG_FILE);
        self.normalize_paths();
        self
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // derived locale views
    // ========================================================================

    /// Whether locales are routed by domain instead of by path prefix.
    pub fn is_domain_mode(&self) -> bool {
        !self.domains.is_empty()
    }

    /// All supported locales.
    ///
    /// Domain mode: union of the domain locales, longest code first so that
    /// `en-US` is tried before `en` when matching path prefixes.
    pub fn locales(&self) -> Vec<String> {
        if !self.is_domain_mode() {
            return self.locales.clone();
        }
        let mut locales: Vec<String> = Vec::new();
        for locale in self.domains.iter().flat_map(|d| &d.locales) {
            if !locales.contains(locale) {
                locales.push(locale.clone());
            }
        }
        // stable: equal lengths keep declaration order
        locales.sort_by(|a, b| b.len().cmp(&a.len()));
        locales
    }

    /// The default locale.
    ///
    /// Domain mode falls back to the first domain's default when no top-level
    /// `default_locale` is set.
    pub fn default_locale(&self) -> &str {
        if !self.default_locale.is_empty() || !self.is_domain_mode() {
            return &self.default_locale;
        }
        self.domains
            .first()
            .map(|d| d.default_locale.as_str())
            .unwrap_or_default()
    }

    /// Effective prefix policy; the deprecated `routes.prefix_default_locale` wins when set.
    pub fn prefix_default_locale(&self) -> bool {
        self.routes
            .prefix_default_locale
            .unwrap_or(self.prefix_default_locale)
    }

    /// Locales served without a `/<locale>` path prefix.
    pub fn unprefixed_locales(&self) -> Vec<String> {
        if !self.is_domain_mode() {
            return if self.prefix_default_locale() {
                Vec::new()
            } else {
                vec![self.default_locale.clone()]
            };
        }
        let mut locales: Vec<String> = Vec::new();
        for domain in self.domains.iter().filter(|d| d.unprefixes_default()) {
            if !locales.contains(&domain.default_locale) {
                locales.push(domain.default_locale.clone());
            }
        }
        locales
    }

    /// Whether `locale`'s top-level output directory is the `(locale)` route group.
    ///
    /// Prefix mode only: domain mode keeps literal locale directories and
    /// strips the prefix at the schema level instead.
    pub fn wraps_locale_dir(&self, locale: &str) -> bool {
        !self.is_domain_mode() && !self.prefix_default_locale() && locale == self.default_locale
    }

    /// Domain serving `locale`, if any.
    pub fn domain_for(&self, locale: &str) -> Option<&DomainConfig> {
        self.domains
            .iter()
            .find(|d| d.locales.iter().any(|l| l == locale))
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.routes.prefix_default_locale.is_some() {
            diag.warn(
                FieldPath::new("routes.prefix_default_locale"),
                "use the top-level `prefix_default_locale` instead",
            );
        }

        if self.is_domain_mode() {
            self.validate_domain_mode(&mut diag);
        } else {
            self.validate_prefix_mode(&mut diag);
        }

        for locale in self.locales() {
            if !is_valid_locale_code(&locale) {
                diag.error_with_hint(
                    FieldPath::new("locales"),
                    format!("`{locale}` is not a usable locale code"),
                    "locale codes must be non-empty and must not contain `/`, `.`, whitespace, parentheses or brackets",
                );
            }
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    fn validate_prefix_mode(&self, diag: &mut ConfigDiagnostics) {
        if self.locales.is_empty() {
            diag.error_with_hint(
                FieldPath::new("locales"),
                "at least one locale is required",
                "locales = [\"en\"]",
            );
            return;
        }

        let mut seen: Vec<&str> = Vec::new();
        for locale in &self.locales {
            if seen.contains(&locale.as_str()) {
                diag.error(
                    FieldPath::new("locales"),
                    format!("locale `{locale}` is listed more than once"),
                );
            }
            seen.push(locale);
        }

        if !self.locales.contains(&self.default_locale) {
            diag.error_with_hint(
                FieldPath::new("default_locale"),
                format!(
                    "`{}` is not one of the configured locales",
                    self.default_locale
                ),
                format!("pick one of: {}", self.locales.join(", ")),
            );
        }
    }

    fn validate_domain_mode(&self, diag: &mut ConfigDiagnostics) {
        if !self.locales.is_empty() {
            diag.error_with_hint(
                FieldPath::new("domains"),
                "`locales` and `[[domains]]` cannot be combined",
                "list locales per domain and remove the top-level `locales`",
            );
        }

        DomainConfig::validate_all(&self.domains, diag);

        if !self.default_locale.is_empty() && !self.locales().contains(&self.default_locale) {
            diag.error(
                FieldPath::new("default_locale"),
                format!(
                    "`{}` is not served by any domain",
                    self.default_locale
                ),
            );
        }
    }
}

/// Locale codes become path segments and `(locale)` route groups.
fn is_valid_locale_code(locale: &str) -> bool {
    !locale.is_empty()
        && !locale
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '.' | '(' | ')' | '[' | ']'))
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required locale fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> I18nConfig {
    let (parsed, ignored) = I18nConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Prefix-mode config (`fi` default, `en`) rooted at `root`.
#[cfg(test)]
pub fn test_config(root: &Path, prefix_default_locale: bool) -> I18nConfig {
    test_parse_config(&format!(
        "locales = [\"fi\", \"en\"]\ndefault_locale = \"fi\"\nprefix_default_locale = {prefix_default_locale}"
    ))
    .with_root(root)
}

// ============================================================================
// tests
// ============================================================================
