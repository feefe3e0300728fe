//! `[routes]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [routes]
//! origin_dir = "src/_app"                   # Route files written once
//! localized_dir = "src/app/(i18n)"          # Generated per-locale trees
//! skip_language_alternates_metadata = false # Inject hreflang alternates into pages
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Route generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Directory holding the origin route tree.
    pub origin_dir: PathBuf,

    /// Directory the localized route trees are generated into.
    /// Wiped before every full generation pass.
    pub localized_dir: PathBuf,

    /// Do not generate `generateMetadata` wrappers that add language alternates.
    pub skip_language_alternates_metadata: bool,

    /// Deprecated alias of the top-level `prefix_default_locale`; wins when set.
    pub prefix_default_locale: Option<bool>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            origin_dir: "src/_app".into(),
            localized_dir: "src/app/(i18n)".into(),
            skip_language_alternates_metadata: false,
            prefix_default_locale: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::Path;

    #[test]
    fn test_routes_config() {
        let config = test_parse_config(
            "[routes]\norigin_dir = \"app-origin\"\nlocalized_dir = \"app/[locale]\"\nskip_language_alternates_metadata = true",
        );
        assert_eq!(config.routes.origin_dir, Path::new("app-origin"));
        assert_eq!(config.routes.localized_dir, Path::new("app/[locale]"));
        assert!(config.routes.skip_language_alternates_metadata);
        assert_eq!(config.routes.prefix_default_locale, None);
    }

    #[test]
    fn test_routes_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.routes.origin_dir, Path::new("src/_app"));
        assert_eq!(config.routes.localized_dir, Path::new("src/app/(i18n)"));
        assert!(!config.routes.skip_language_alternates_metadata);
    }
}
