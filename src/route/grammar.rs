//! Route path grammar.
//!
//! Pure rewrites from file-system route paths to:
//! - a route *name*, shared by all locale variants (`/feed/@modal/(..)images/[id]/page.tsx`
//!   -> `/images/[id]`)
//! - a route *pattern* for one locale (`/fi/syote/@modal/(..)kuvat/[id]/page.tsx`
//!   -> `/fi/kuvat/:id`)
//!
//! Pipeline order: page file, parallel slots, route groups, intercept markers,
//! then (patterns only) dynamic segment syntax. Groups are removed before
//! intercepts are resolved because `(..)` counts route segments, and groups
//! and slots are not route segments.
//!
//! Malformed input (unbalanced parens or brackets) is not diagnosed.

use regex::Regex;
use std::sync::LazyLock;

static PAGE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/page(\.[^./]+)?\.(js|ts|md)x?$").expect("valid regex"));

static OPTIONAL_CATCH_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\[\[\.\.\.([^\]/]+)\]\]").expect("valid regex"));

static CATCH_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\[\.\.\.([^\]/]+)\]").expect("valid regex"));

static NAMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\[([^\]/]+)\]").expect("valid regex"));

/// Canonical route name of an origin page file.
pub fn route_name(origin_path: &str) -> String {
    let path = remove_page_segment(origin_path);
    let path = remove_parallel_segments(&path);
    let path = remove_group_segments(&path);
    let path = remove_intercepted_segments(&path);
    as_root_path(&path)
}

/// Matchable pattern of a localized page file.
///
/// `unprefixed` strips the leading locale directory, for locales served
/// without a `/<locale>` prefix.
pub fn route_pattern(localized_path: &str, unprefixed: bool) -> String {
    let path = if unprefixed {
        remove_locale_segment(localized_path)
    } else {
        localized_path
    };
    let path = remove_page_segment(path);
    let path = remove_parallel_segments(&path);
    let path = remove_group_segments(&path);
    let path = remove_intercepted_segments(&path);
    let path = format_dynamic_segments(&path);
    as_root_path(&path)
}

/// Drop the trailing `/page.tsx` / `/page.<locale>.mdx` segment.
pub fn remove_page_segment(path: &str) -> String {
    PAGE_SEGMENT.replace(path, "").into_owned()
}

/// Drop the leading `/<segment>` once.
pub fn remove_locale_segment(path: &str) -> &str {
    let rest = path.strip_prefix('/').unwrap_or(path);
    match rest.find('/') {
        Some(i) => &rest[i..],
        None => "",
    }
}

/// Drop every `@slot` segment.
pub fn remove_parallel_segments(path: &str) -> String {
    filter_segments(path, |segment| !segment.starts_with('@'))
}

/// Drop every `(group)` segment; intercept markers such as `(..)` are kept.
pub fn remove_group_segments(path: &str) -> String {
    filter_segments(path, |segment| !is_group(segment))
}

/// Resolve intercept markers.
///
/// `(.)` stays at the current level, `(..)` removes the preceding segment,
/// `(...)` (or more dots) resolves from the root. Markers may be stacked,
/// e.g. `(..)(..)photo`. A `(..)` with nothing left to remove stops at the root.
pub fn remove_intercepted_segments(path: &str) -> String {
    let mut resolved: Vec<&str> = Vec::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let mut rest = segment;
        while let Some((dots, tail)) = split_intercept_marker(rest) {
            match dots {
                1 => {}
                2 => {
                    resolved.pop();
                }
                _ => resolved.clear(),
            }
            rest = tail;
        }
        if !rest.is_empty() {
            resolved.push(rest);
        }
    }
    join_segments(resolved)
}

/// Rewrite dynamic segments into pattern tokens.
///
/// `[[...x]]` -> `{/*x}`, `[...x]` -> `/*x`, `[x]` -> `/:x`, most specific first.
pub fn format_dynamic_segments(path: &str) -> String {
    let path = OPTIONAL_CATCH_ALL.replace_all(path, "{/*$1}");
    let path = CATCH_ALL.replace_all(&path, "/*$1");
    NAMED.replace_all(&path, "/:$1").into_owned()
}

/// Ensure a leading `/`; the empty path becomes `/`.
pub fn as_root_path(path: &str) -> String {
    if path.starts_with('/') || path.starts_with("{/") {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// `(name)` where `name` is not made of dots only.
fn is_group(segment: &str) -> bool {
    segment
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .is_some_and(|inner| !inner.is_empty() && !inner.chars().all(|c| c == '.') && !inner.contains(')'))
}

/// Split a leading `(.)`, `(..)`, `(...)` marker off a segment.
fn split_intercept_marker(segment: &str) -> Option<(usize, &str)> {
    let inner = segment.strip_prefix('(')?;
    let dots = inner.bytes().take_while(|&b| b == b'.').count();
    if dots == 0 {
        return None;
    }
    let tail = inner[dots..].strip_prefix(')')?;
    Some((dots, tail))
}

fn filter_segments(path: &str, keep: impl Fn(&str) -> bool) -> String {
    join_segments(path.split('/').filter(|s| !s.is_empty() && keep(s)))
}

fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut result = String::new();
    for segment in segments {
        result.push('/');
        result.push_str(segment);
    }
    result
}

/// Whether a path contains a parallel slot or an intercept marker.
pub fn has_slot_or_intercept(path: &str) -> bool {
    path.split('/')
        .any(|s| s.starts_with('@') || split_intercept_marker(s).is_some())
}

// ============================================================================
// tests
// ============================================================================
