//! Href options: route, locale, params, query and fragment of a link.

use super::params::RouteParams;
use indexmap::IndexMap;
use url::form_urlencoded;

/// Query parameters, in insertion order. A repeated key keeps its first
/// position and its last value.
pub type Query = IndexMap<String, String>;

/// Everything needed to build one href.
///
/// `pathname` is a route name (`/images/[id]`) or a raw path; a `?query`
/// or `#hash` written into it is split off by [`HrefOptions::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HrefOptions {
    pub pathname: String,
    pub locale: Option<String>,
    pub params: RouteParams,
    pub query: Option<Query>,
    pub hash: Option<String>,
    pub include_domain: bool,
    /// Use `http:` for domain-qualified hrefs.
    pub development: bool,
}

impl HrefOptions {
    pub fn new(pathname: &str) -> Self {
        let (rest, hash) = match pathname.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (pathname, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(parse_query(query))),
            None => (rest, None),
        };
        Self {
            pathname: path.to_string(),
            hash,
            query,
            ..Self::default()
        }
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.get_or_insert_with(Query::new).insert(key.into(), value.into());
        self
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Prefix the href with the locale's domain when it has one.
    pub fn with_domain(mut self, development: bool) -> Self {
        self.include_domain = true;
        self.development = development;
        self
    }

    /// Append this option's query and hash to a path.
    pub(super) fn decorate(&self, path: &str) -> String {
        let mut href = path.to_string();
        if let Some(query) = self.query.as_ref().filter(|q| !q.is_empty()) {
            href.push('?');
            href.push_str(&encode_query(query));
        }
        if let Some(hash) = self.hash.as_deref().filter(|h| !h.is_empty()) {
            href.push('#');
            href.push_str(hash);
        }
        href
    }
}

fn parse_query(query: &str) -> Query {
    form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

fn encode_query(query: &Query) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter())
        .finish()
}
