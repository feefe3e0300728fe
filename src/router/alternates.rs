//! Language alternates: one URL per locale for the same route.

use super::{HrefError, RouteParams, Router};
use crate::route::LocaleMap;
use url::Url;

/// Fallback entry pointing at the default locale.
pub const X_DEFAULT: &str = "x-default";

impl Router {
    /// Href of `route` in every locale, plus [`X_DEFAULT`] for the default locale.
    pub fn language_alternates(
        &self,
        route: &str,
        params: &RouteParams,
    ) -> Result<LocaleMap<String>, HrefError> {
        let schema = self.schema();
        let mut languages = LocaleMap::new();
        for locale in &schema.locales {
            languages.insert(locale.clone(), self.build_href(route, params, locale)?);
        }
        languages.insert(
            X_DEFAULT.to_string(),
            self.build_href(route, params, &schema.default_locale)?,
        );
        Ok(languages)
    }

    /// HTTP `Link` header value listing the alternates of `pathname`.
    ///
    /// `pathname` is matched in `locale`; each alternate is resolved against
    /// `base_url`, moved to the locale's domain when one serves it, and has
    /// its query removed. Returns `None` when nothing matches.
    pub fn alternate_link_header(
        &self,
        locale: &str,
        pathname: &str,
        base_url: &Url,
    ) -> Option<String> {
        let matched = self.match_route(locale, pathname)?;
        let schema = self.schema();
        let links: Vec<String> = schema
            .locales
            .iter()
            .filter_map(|alternate| {
                let pattern = self.pattern(&matched.route_name, alternate)?;
                let path = pattern.compile(&matched.params).ok()?;
                let mut url = base_url.join(&path).ok()?;
                if let Some(domain) = schema.domain_for(alternate) {
                    url.set_host(Some(&domain.domain)).ok()?;
                }
                url.set_query(None);

                let mut link = format!("<{url}>; rel=\"alternate\"; hreflang=\"{alternate}\"");
                if *alternate == schema.default_locale {
                    link.push_str(&format!(", <{url}>; rel=\"alternate\"; hreflang=\"{X_DEFAULT}\""));
                }
                Some(link)
            })
            .collect();
        (!links.is_empty()).then(|| links.join(", "))
    }
}

/// Generated alternates with caller-provided entries layered on top.
///
/// Existing entries win; keys keep their first position.
pub fn merge_alternates(generated: &LocaleMap<String>, existing: &LocaleMap<String>) -> LocaleMap<String> {
    let mut merged = generated.clone();
    for (key, value) in existing {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
