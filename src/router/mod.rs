//! Runtime route matching and href building over a published [`Schema`].
//!
//! A [`Router`] compiles every pattern once and is read-only afterwards, so a
//! single instance can be shared across threads.
//!
//! ```ignore
//! let router = Router::new(Schema::load(path)?)?;
//! let matched = router.match_route("en", "/en/about-the-site");
//! let href = router.build_href("/images/[id]", &params, "fi")?;
//! ```

mod alternates;
mod href;
mod params;
mod pattern;

pub use alternates::{X_DEFAULT, merge_alternates};
pub use href::{HrefOptions, Query};
pub use params::{ParamValue, RouteParams, params_from_pairs};
pub use pattern::{HrefError, PatternError, RoutePattern};

use crate::route::LocaleMap;
use indexmap::IndexMap;
use crate::schema::Schema;
use percent_encoding::percent_decode_str;
use serde::Serialize;

/// Result of matching a pathname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatch {
    pub route_name: String,
    /// Every locale's pattern for the matched route.
    pub localized_paths: LocaleMap<String>,
    pub params: RouteParams,
}

#[derive(Debug, Clone)]
pub struct Router {
    schema: Schema,
    patterns: IndexMap<String, LocaleMap<RoutePattern>>,
}

impl Router {
    pub fn new(schema: Schema) -> Result<Self, PatternError> {
        let mut patterns = IndexMap::new();
        for (route, localized) in schema.routes.iter() {
            let mut compiled = LocaleMap::new();
            for (locale, pattern) in localized.iter() {
                compiled.insert(locale.clone(), RoutePattern::parse(pattern)?);
            }
            patterns.insert(route.clone(), compiled);
        }
        Ok(Self { schema, patterns })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Compiled pattern of `route` in `locale`.
    pub fn pattern(&self, route: &str, locale: &str) -> Option<&RoutePattern> {
        self.patterns.get(route)?.get(locale)
    }

    /// First route, in table order, whose `locale` pattern matches `pathname`.
    pub fn match_route(&self, locale: &str, pathname: &str) -> Option<RouteMatch> {
        self.patterns.iter().find_map(|(route, localized)| {
            let params = localized.get(locale)?.matches(pathname)?;
            Some(RouteMatch {
                route_name: route.to_string(),
                localized_paths: self.schema.routes.get(route).cloned().unwrap_or_default(),
                params,
            })
        })
    }

    /// Localized path of `route` in `locale`.
    ///
    /// An unknown route or a locale the route lacks returns `route` unchanged;
    /// a missing or mistyped parameter is an error.
    pub fn build_href(
        &self,
        route: &str,
        params: &RouteParams,
        locale: &str,
    ) -> Result<String, HrefError> {
        self.href(&HrefOptions::new(route).locale(locale).params(params.clone()))
    }

    /// Build an href from full options.
    pub fn href(&self, options: &HrefOptions) -> Result<String, HrefError> {
        let Some(locale) = options.locale.as_deref() else {
            return Ok(options.decorate(&options.pathname));
        };
        let Some(pattern) = self.pattern(&options.pathname, locale) else {
            return Ok(options.decorate(&options.pathname));
        };

        let href = options.decorate(&pattern.compile(&options.params)?);
        let domain = options
            .include_domain
            .then(|| self.schema.domain_for(locale))
            .flatten();
        Ok(match domain {
            Some(domain) => {
                let scheme = if options.development { "http:" } else { "https:" };
                format!("{scheme}//{}{href}", domain.domain)
            }
            None => href,
        })
    }

    /// Split a leading locale segment off `pathname`.
    ///
    /// Returns the locale (if the first segment is one) and the remaining
    /// path, which is `/` when nothing follows the locale.
    pub fn extract_locale<'a>(&self, pathname: &'a str) -> (Option<&str>, &'a str) {
        let Some(rest) = pathname.strip_prefix('/') else {
            return (None, pathname);
        };
        let (first, tail) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        match self.schema.locales.iter().find(|l| l.as_str() == first) {
            Some(locale) => (Some(locale.as_str()), if tail.is_empty() { "/" } else { tail }),
            None => (None, pathname),
        }
    }

    /// Target of a redirect to `route` (or a raw path) in `locale`.
    pub fn redirect_target(
        &self,
        route: &str,
        params: &RouteParams,
        locale: &str,
    ) -> Result<String, HrefError> {
        self.build_href(route, params, locale)
    }

    /// Decoded path to revalidate for `route` in `locale`.
    pub fn revalidate_path(
        &self,
        route: &str,
        params: &RouteParams,
        locale: &str,
    ) -> Result<String, HrefError> {
        let href = self.build_href(route, params, locale)?;
        Ok(percent_decode_str(&href).decode_utf8_lossy().into_owned())
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::schema::{Domain, RouteTable};

    fn routes(entries: &[(&str, &[(&str, &str)])]) -> RouteTable {
        entries
            .iter()
            .map(|(name, localized)| {
                let map: LocaleMap<String> =
                    localized.iter().map(|(l, p)| (l.to_string(), p.to_string())).collect();
                (name.to_string(), map)
            })
            .collect()
    }

    /// `fi` unprefixed, `en` prefixed.
    pub(crate) fn test_router() -> Router {
        let schema = Schema {
            locales: vec!["fi".into(), "en".into()],
            default_locale: "fi".into(),
            un_prefixed_locales: vec!["fi".into()],
            domains: vec![],
            routes: routes(&[
                ("/", &[("fi", "/"), ("en", "/en")]),
                ("/about", &[("fi", "/tietoa"), ("en", "/en/about-the-site")]),
                ("/images/new", &[("fi", "/kuvat/uusi"), ("en", "/en/images/new")]),
                ("/images/[id]", &[("fi", "/kuvat/:id"), ("en", "/en/images/:id")]),
                ("/docs/[[...rest]]", &[("fi", "/ohjeet{/*rest}"), ("en", "/en/docs{/*rest}")]),
                ("/[...catchAll]", &[("fi", "/*catchAll"), ("en", "/en/*catchAll")]),
            ]),
        };
        Router::new(schema).unwrap()
    }

    #[test]
    fn test_match_static_route() {
        let router = test_router();
        let matched = router.match_route("en", "/en/about-the-site").unwrap();
        assert_eq!(matched.route_name, "/about");
        assert!(matched.params.is_empty());
        assert_eq!(
            matched.localized_paths.get("fi").map(String::as_str),
            Some("/tietoa")
        );
    }

    #[test]
    fn test_match_unprefixed_root() {
        let router = test_router();
        assert_eq!(router.match_route("fi", "/").unwrap().route_name, "/");
        assert_eq!(router.match_route("en", "/en/").unwrap().route_name, "/");
        assert!(router.match_route("en", "/").is_none());
    }

    #[test]
    fn test_table_order_decides_overlaps() {
        let router = test_router();
        assert_eq!(router.match_route("fi", "/kuvat/uusi").unwrap().route_name, "/images/new");
        let image = router.match_route("fi", "/kuvat/7").unwrap();
        assert_eq!(image.route_name, "/images/[id]");
        assert_eq!(image.params.get("id"), Some(&ParamValue::One("7".into())));
        assert_eq!(router.match_route("fi", "/mita/tahansa").unwrap().route_name, "/[...catchAll]");
    }

    #[test]
    fn test_no_match() {
        let router = test_router();
        assert!(router.match_route("en", "/fi/tietoa").is_none());
        assert!(router.match_route("sv", "/").is_none());
        assert!(router.match_route("fi", "//").is_none());
        assert!(router.match_route("en", "/en//").is_none());
    }

    #[test]
    fn test_build_href() {
        let router = test_router();
        let params = params_from_pairs([("id", "7")]);
        assert_eq!(router.build_href("/images/[id]", &params, "fi").unwrap(), "/kuvat/7");
        assert_eq!(router.build_href("/images/[id]", &params, "en").unwrap(), "/en/images/7");
        assert_eq!(
            router.build_href("/images/[id]", &RouteParams::new(), "en"),
            Err(HrefError::Missing("id".into()))
        );
    }

    #[test]
    fn test_unknown_route_falls_back_to_input() {
        let router = test_router();
        let empty = RouteParams::new();
        assert_eq!(router.build_href("/nope", &empty, "en").unwrap(), "/nope");
        assert_eq!(router.build_href("/about", &empty, "sv").unwrap(), "/about");
        assert_eq!(
            router.build_href("/nope?x=1#top", &empty, "en").unwrap(),
            "/nope?x=1#top"
        );
    }

    #[test]
    fn test_round_trip() {
        let router = test_router();
        let cases: Vec<(&str, RouteParams)> = vec![
            ("/", RouteParams::new()),
            ("/about", RouteParams::new()),
            ("/images/[id]", params_from_pairs([("id", "ä ö/1")])),
            ("/docs/[[...rest]]", RouteParams::new()),
            ("/docs/[[...rest]]", params_from_pairs([("rest", "a"), ("rest", "b")])),
            ("/[...catchAll]", params_from_pairs([("catchAll", "x"), ("catchAll", "y?z")])),
        ];
        for locale in ["fi", "en"] {
            for (route, params) in &cases {
                let href = router.build_href(route, params, locale).unwrap();
                let matched = router
                    .match_route(locale, &href)
                    .unwrap_or_else(|| panic!("{href} did not match"));
                assert_eq!(&matched.route_name, route, "{href}");
                assert_eq!(&matched.params, params, "{href}");
            }
        }
    }

    #[test]
    fn test_href_with_query_hash_and_domain() {
        let mut router = test_router();
        router.schema.domains.push(Domain {
            domain: "example.fi".into(),
            locales: vec!["fi".into()],
            default_locale: "fi".into(),
            prefix_default_locale: None,
        });

        let options = HrefOptions::new("/about?tab=team#top").locale("fi");
        assert_eq!(router.href(&options).unwrap(), "/tietoa?tab=team#top");
        assert_eq!(
            router.href(&options.clone().with_domain(false)).unwrap(),
            "https://example.fi/tietoa?tab=team#top"
        );
        assert_eq!(
            router.href(&options.with_domain(true)).unwrap(),
            "http://example.fi/tietoa?tab=team#top"
        );
        let en = HrefOptions::new("/about").locale("en").with_domain(false);
        assert_eq!(router.href(&en).unwrap(), "/en/about-the-site");
    }

    #[test]
    fn test_extract_locale() {
        let router = test_router();
        assert_eq!(router.extract_locale("/en/about"), (Some("en"), "/about"));
        assert_eq!(router.extract_locale("/en"), (Some("en"), "/"));
        assert_eq!(router.extract_locale("/english"), (None, "/english"));
        assert_eq!(router.extract_locale("/"), (None, "/"));
    }

    #[test]
    fn test_revalidate_path_is_decoded() {
        let router = test_router();
        let params = params_from_pairs([("id", "ä")]);
        assert_eq!(router.redirect_target("/images/[id]", &params, "en").unwrap(), "/en/images/%C3%A4");
        assert_eq!(router.revalidate_path("/images/[id]", &params, "en").unwrap(), "/en/images/ä");
    }

    #[test]
    fn test_malformed_schema_pattern() {
        let mut schema = test_router().schema().clone();
        schema.routes.insert("/bad".into(), [("en".to_string(), "en/bad".to_string())].into_iter().collect());
        assert!(matches!(Router::new(schema), Err(PatternError::NotRooted(_))));
    }
}
