//! `[[domains]]` section configuration.
//!
//! Each entry serves a subset of locales from its own host name.
//!
//! ```toml
//! [[domains]]
//! domain = "example.fi"
//! locales = ["fi"]
//! default_locale = "fi"
//!
//! [[domains]]
//! domain = "example.com"
//! locales = ["en", "en-US"]
//! default_locale = "en"
//! prefix_default_locale = true
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One domain and the locales it serves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Host name without scheme, e.g. `example.fi`.
    pub domain: String,
    pub locales: Vec<String>,
    pub default_locale: String,
    /// Keep the `/<locale>` prefix for this domain's default locale.
    pub prefix_default_locale: Option<bool>,
}

impl DomainConfig {
    /// Whether the default locale of this domain is served without a path prefix.
    pub fn unprefixes_default(&self) -> bool {
        self.prefix_default_locale != Some(true)
    }

    /// Validate a list of domains as a whole.
    pub fn validate_all(domains: &[Self], diag: &mut ConfigDiagnostics) {
        let mut served_by: FxHashMap<&str, &str> = FxHashMap::default();

        for domain in domains {
            if domain.domain.trim().is_empty() {
                diag.error_with_hint(
                    FieldPath::new("domains.domain"),
                    "domain name must not be empty",
                    "use a bare host name such as `example.com`",
                );
            }

            if domain.locales.is_empty() {
                diag.error(
                    FieldPath::new("domains.locales"),
                    format!("domain `{}` serves no locales", domain.domain),
                );
            } else if !domain.locales.contains(&domain.default_locale) {
                diag.error_with_hint(
                    FieldPath::new("domains.default_locale"),
                    format!(
                        "`{}` is not one of the locales of domain `{}`",
                        domain.default_locale, domain.domain
                    ),
                    format!("pick one of: {}", domain.locales.join(", ")),
                );
            }

            for locale in &domain.locales {
                if let Some(previous) = served_by.insert(locale, &domain.domain)
                    && previous != domain.domain
                {
                    diag.error(
                        FieldPath::new("domains.locales"),
                        format!(
                            "locale `{locale}` is served by both `{previous}` and `{}`",
                            domain.domain
                        ),
                    );
                }
            }
        }
    }
}
