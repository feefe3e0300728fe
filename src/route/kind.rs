//! Route file roles.
//!
//! Every file in the origin tree is classified once by its file name. The
//! role decides which wrapper template is used and whether the route is
//! navigable (part of the public route table).

use regex::Regex;
use std::sync::LazyLock;

/// Role of a file in the origin route tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Page,
    /// `page.<locale>.mdx`: a page that exists for one locale only.
    Markdown,
    Layout,
    Template,
    Default,
    Loading,
    NotFound,
    Forbidden,
    Unauthorized,
    Error,
    Sitemap,
    Icon,
    AppleIcon,
    OpengraphImage,
    TwitterImage,
    /// Static asset copied byte for byte.
    Copy,
}

/// How the output file for a kind is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateClass {
    /// Component wrapper forwarding props and locale.
    Component,
    /// Component wrapper without props (loading, not-found, ...).
    PropLess,
    /// Client-side error boundary; no request locale store.
    ClientError,
    /// Function wrapper (sitemap, image generators).
    Function,
    /// Verbatim copy.
    Copy,
}

/// Classification table, checked in order.
static KIND_PATTERNS: LazyLock<Vec<(RouteKind, Regex)>> = LazyLock::new(|| {
    use RouteKind::*;
    [
        (Page, r"^page\.(j|t)sx?$"),
        (Markdown, r"^page\.[^.]*\.mdx$"),
        (Layout, r"^layout\.(j|t)sx?$"),
        (Template, r"^template\.(j|t)sx?$"),
        (Default, r"^default\.(j|t)sx?$"),
        (Loading, r"^loading\.(j|t)sx?$"),
        (NotFound, r"^not-found\.(j|t)sx?$"),
        (Forbidden, r"^forbidden\.(j|t)sx?$"),
        (Unauthorized, r"^unauthorized\.(j|t)sx?$"),
        (Error, r"^error\.(j|t)sx?$"),
        (Sitemap, r"^sitemap\.(j|t)s$"),
        (Icon, r"^icon\.(j|t)sx?$"),
        (AppleIcon, r"^apple-icon\.(j|t)sx?$"),
        (OpengraphImage, r"^opengraph-image\.(j|t)sx?$"),
        (TwitterImage, r"^twitter-image\.(j|t)sx?$"),
        (
            Copy,
            r"^(sitemap\.xml|icon\d*\.(ico|jpg|jpeg|png|svg)|apple-icon\d*\.(jpg|jpeg|png)|(opengraph|twitter)-image\.(jpg|jpeg|png|gif|alt\.txt))$",
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("valid regex")))
    .collect()
});

impl RouteKind {
    /// Classify a file name, `None` for files that are not route files.
    pub fn classify(file_name: &str) -> Option<Self> {
        KIND_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(file_name))
            .map(|(kind, _)| *kind)
    }

    /// Pages appear in the route table and get language alternates.
    pub const fn is_navigable(self) -> bool {
        matches!(self, Self::Page | Self::Markdown)
    }

    pub const fn template_class(self) -> TemplateClass {
        match self {
            Self::Page | Self::Markdown | Self::Layout | Self::Template | Self::Default => {
                TemplateClass::Component
            }
            Self::Loading | Self::NotFound | Self::Forbidden | Self::Unauthorized => {
                TemplateClass::PropLess
            }
            Self::Error => TemplateClass::ClientError,
            Self::Sitemap
            | Self::Icon
            | Self::AppleIcon
            | Self::OpengraphImage
            | Self::TwitterImage => TemplateClass::Function,
            Self::Copy => TemplateClass::Copy,
        }
    }

    /// File-name form, e.g. `not-found`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Markdown => "markdown",
            Self::Layout => "layout",
            Self::Template => "template",
            Self::Default => "default",
            Self::Loading => "loading",
            Self::NotFound => "not-found",
            Self::Forbidden => "forbidden",
            Self::Unauthorized => "unauthorized",
            Self::Error => "error",
            Self::Sitemap => "sitemap",
            Self::Icon => "icon",
            Self::AppleIcon => "apple-icon",
            Self::OpengraphImage => "opengraph-image",
            Self::TwitterImage => "twitter-image",
            Self::Copy => "copy",
        }
    }

    /// Identifier used for the generated wrapper, e.g. `NotFound`.
    ///
    /// Markdown pages render as ordinary pages.
    pub fn component_name(self) -> String {
        let label = match self {
            Self::Markdown => "page",
            other => other.label(),
        };
        label
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                chars
                    .next()
                    .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Locale encoded in a markdown page file name (`page.fi.mdx` -> `fi`).
pub fn markdown_locale(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix("page.")?
        .strip_suffix(".mdx")
        .filter(|locale| !locale.is_empty())
}
