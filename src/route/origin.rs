//! Origin route discovery.
//!
//! Walks the origin directory and produces one [`OriginRoute`] per route file,
//! with the path that file gets in every locale's output tree:
//!
//! ```text
//! src/_app/feed/page.tsx   (feed/i18n.json: {"fi": "syote"})
//!   en -> /en/feed/page.tsx
//!   fi -> /fi/syote/page.tsx        (or /(fi)/syote/page.tsx when unprefixed)
//! ```

use super::{DiscoverError, LocaleMap, RouteKind, grammar, kind::markdown_locale, translation};
use crate::config::I18nConfig;
use crate::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// One discovered file in the origin tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginRoute {
    pub kind: RouteKind,
    /// Slash-separated path relative to the origin root, e.g. `/feed/page.tsx`.
    pub origin_path: String,
    /// Output path per locale; keys are exactly the locales this file exists for.
    pub localized_paths: LocaleMap<String>,
}

impl OriginRoute {
    /// Canonical route name (meaningful for navigable kinds).
    pub fn route_name(&self) -> String {
        grammar::route_name(&self.origin_path)
    }

    /// A route outside parallel slots and intercepting segments.
    pub fn is_plain(&self) -> bool {
        !grammar::has_slot_or_intercept(&self.origin_path)
    }

    /// Absolute path of the origin file.
    pub fn source_path(&self, origin_dir: &Path) -> PathBuf {
        origin_dir.join(self.origin_path.trim_start_matches('/'))
    }
}

/// Discover every route file under the configured origin directory.
///
/// Entries are visited in file-name order, so the result is deterministic.
pub fn discover(config: &I18nConfig) -> Result<Vec<OriginRoute>, DiscoverError> {
    let origin_dir = &config.routes.origin_dir;
    if !origin_dir.is_dir() {
        return Err(DiscoverError::OriginNotFound(origin_dir.clone()));
    }

    let locales = config.locales();
    let roots: LocaleMap<String> = locales
        .iter()
        .map(|locale| {
            let dir = if config.wraps_locale_dir(locale) {
                format!("/({locale})")
            } else {
                format!("/{locale}")
            };
            (locale.clone(), dir)
        })
        .collect();

    let mut routes = Vec::new();
    let walker = Walker { locales: &locales };
    walker.walk(origin_dir, "", &roots, &mut routes)?;
    Ok(routes)
}

struct Walker<'a> {
    locales: &'a [String],
}

impl Walker<'_> {
    /// `parents` holds the already-localized directory path per locale.
    fn walk(
        &self,
        dir: &Path,
        origin_prefix: &str,
        parents: &LocaleMap<String>,
        out: &mut Vec<OriginRoute>,
    ) -> Result<(), DiscoverError> {
        for (name, path, is_dir) in read_dir_sorted(dir)? {
            let origin_path = format!("{origin_prefix}/{name}");

            if is_dir {
                if name.starts_with('_') {
                    debug!("discover"; "skipping private directory {}", origin_path);
                    continue;
                }
                let translations = translation::load_translations(&path, self.locales)?;
                let children: LocaleMap<String> = parents
                    .iter()
                    .map(|(locale, parent)| {
                        let segment = translations
                            .as_ref()
                            .and_then(|t| t.get(locale))
                            .map_or(name.as_str(), String::as_str);
                        (locale.clone(), format!("{parent}/{segment}"))
                    })
                    .collect();
                self.walk(&path, &origin_path, &children, out)?;
                continue;
            }

            let Some(kind) = RouteKind::classify(&name) else {
                continue;
            };

            let localized_paths: LocaleMap<String> = parents
                .iter()
                .filter_map(|(locale, parent)| match kind {
                    RouteKind::Markdown if markdown_locale(&name) != Some(locale.as_str()) => None,
                    RouteKind::Markdown => Some((locale.clone(), format!("{parent}/page.tsx"))),
                    _ => Some((locale.clone(), format!("{parent}/{name}"))),
                })
                .collect();

            if localized_paths.is_empty() {
                debug!("discover"; "no configured locale for {}", origin_path);
                continue;
            }

            out.push(OriginRoute {
                kind,
                origin_path,
                localized_paths,
            });
        }
        Ok(())
    }
}

/// Directory entries as `(name, path, is_dir)`, sorted by name.
fn read_dir_sorted(dir: &Path) -> Result<Vec<(String, PathBuf, bool)>, DiscoverError> {
    let io_err = |err| DiscoverError::Io(dir.to_path_buf(), err);
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!("discover"; "skipping non UTF-8 name {}", path.display());
            continue;
        };
        entries.push((name, path.clone(), path.is_dir()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::testing::write_origin_tree;
    use tempfile::TempDir;

    fn paths_for(routes: &[OriginRoute], locale: &str) -> Vec<String> {
        let mut paths: Vec<String> = routes
            .iter()
            .filter_map(|r| r.localized_paths.get(locale).cloned())
            .collect();
        paths.sort();
        paths
    }

    fn find<'a>(routes: &'a [OriginRoute], origin_path: &str) -> &'a OriginRoute {
        routes
            .iter()
            .find(|r| r.origin_path == origin_path)
            .unwrap_or_else(|| panic!("missing {origin_path}"))
    }

    #[test]
    fn test_discover_prefixed() {
        let dir = TempDir::new().unwrap();
        write_origin_tree(dir.path());
        let config = test_config(dir.path(), true);

        let routes = discover(&config).unwrap();

        let about = find(&routes, "/(static)/about/page.jsx");
        assert_eq!(about.kind, RouteKind::Page);
        assert_eq!(
            about.localized_paths.get("en").map(String::as_str),
            Some("/en/(static)/about-the-site/page.jsx")
        );
        assert_eq!(
            about.localized_paths.get("fi").map(String::as_str),
            Some("/fi/(static)/tietoa-sivustosta/page.jsx")
        );

        let modal = find(&routes, "/feed/@modal/(..)images/[id]/page.tsx");
        assert_eq!(
            modal.localized_paths.get("fi").map(String::as_str),
            Some("/fi/syote/@modal/(..)kuvat/[id]/page.tsx")
        );

        assert_eq!(
            paths_for(&routes, "fi"),
            vec![
                "/fi/(static)/layout.jsx",
                "/fi/(static)/tietoa-sivustosta/page.jsx",
                "/fi/(static)/tietoa-sivustosta/template.jsx",
                "/fi/(static)/tietosuojaseloste/page.tsx",
                "/fi/[...catchAll]/not-found.jsx",
                "/fi/[...catchAll]/page.jsx",
                "/fi/error.tsx",
                "/fi/forbidden.tsx",
                "/fi/icon.tsx",
                "/fi/kuvat/[id]/not-found.tsx",
                "/fi/kuvat/[id]/page.tsx",
                "/fi/kuvat/page.tsx",
                "/fi/layout.tsx",
                "/fi/opengraph-image.alt.txt",
                "/fi/opengraph-image.jpg",
                "/fi/page.tsx",
                "/fi/sitemap.ts",
                "/fi/syote/@modal/(..)kuvat/[id]/not-found.tsx",
                "/fi/syote/@modal/(..)kuvat/[id]/page.tsx",
                "/fi/syote/@modal/default.tsx",
                "/fi/syote/loading.tsx",
                "/fi/syote/page.tsx",
                "/fi/unauthorized.tsx",
            ]
        );
    }

    #[test]
    fn test_discover_unprefixed_default_locale() {
        let dir = TempDir::new().unwrap();
        write_origin_tree(dir.path());
        let config = test_config(dir.path(), false);

        let routes = discover(&config).unwrap();
        let root = find(&routes, "/page.tsx");
        assert_eq!(root.localized_paths.get("fi").map(String::as_str), Some("/(fi)/page.tsx"));
        assert_eq!(root.localized_paths.get("en").map(String::as_str), Some("/en/page.tsx"));
    }

    #[test]
    fn test_markdown_maps_one_locale() {
        let dir = TempDir::new().unwrap();
        write_origin_tree(dir.path());
        let routes = discover(&test_config(dir.path(), true)).unwrap();

        let en = find(&routes, "/(static)/privacy-policy/page.en.mdx");
        assert_eq!(en.kind, RouteKind::Markdown);
        assert_eq!(en.localized_paths.keys().map(String::as_str).collect::<Vec<_>>(), vec!["en"]);
        assert_eq!(
            en.localized_paths.get("en").map(String::as_str),
            Some("/en/(static)/privacy-policy/page.tsx")
        );

        let fi = find(&routes, "/(static)/privacy-policy/page.fi.mdx");
        assert_eq!(fi.localized_paths.keys().map(String::as_str).collect::<Vec<_>>(), vec!["fi"]);
    }

    #[test]
    fn test_markdown_of_unconfigured_locale_is_dropped() {
        let dir = TempDir::new().unwrap();
        write_origin_tree(dir.path());
        fs::write(dir.path().join("src/_app/(static)/privacy-policy/page.sv.mdx"), "# x").unwrap();
        let routes = discover(&test_config(dir.path(), true)).unwrap();
        assert!(!routes.iter().any(|r| r.origin_path.ends_with("page.sv.mdx")));
    }

    #[test]
    fn test_private_directories_and_unknown_files_skipped() {
        let dir = TempDir::new().unwrap();
        write_origin_tree(dir.path());
        let routes = discover(&test_config(dir.path(), true)).unwrap();
        assert!(!routes.iter().any(|r| r.origin_path.contains("_components")));
        assert!(!routes.iter().any(|r| r.origin_path.ends_with("i18n.ts")));
        assert!(!routes.iter().any(|r| r.origin_path.ends_with("utils.ts")));
    }

    #[test]
    fn test_discovery_is_sorted_and_repeatable() {
        let dir = TempDir::new().unwrap();
        write_origin_tree(dir.path());
        let config = test_config(dir.path(), true);
        let first = discover(&config).unwrap();
        assert_eq!(first, discover(&config).unwrap());
        assert_eq!(first[0].origin_path, "/(static)/about/page.jsx");
    }

    #[test]
    fn test_missing_origin_dir() {
        let dir = TempDir::new().unwrap();
        let err = discover(&test_config(dir.path(), true)).unwrap_err();
        assert!(matches!(err, DiscoverError::OriginNotFound(_)));
    }

    #[test]
    fn test_is_plain() {
        let dir = TempDir::new().unwrap();
        write_origin_tree(dir.path());
        let routes = discover(&test_config(dir.path(), true)).unwrap();
        assert!(find(&routes, "/images/[id]/page.tsx").is_plain());
        assert!(!find(&routes, "/feed/@modal/(..)images/[id]/page.tsx").is_plain());
    }
}
