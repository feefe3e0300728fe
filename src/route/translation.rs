//! Per-directory segment translations.
//!
//! A directory may declare how its own segment is named in each locale:
//!
//! ```text
//! about/
//! ├── i18n.json     {"en": "about-the-site", "fi": "tietoa-sivustosta"}
//! └── page.tsx
//! ```
//!
//! Lookup order: `i18n.json`, `i18n.toml`, `i18n.ts`, `i18n.js`. Script files
//! are not evaluated; the static `locale: "segment"` pairs of their default
//! export are read textually, which covers both an exported object literal and
//! a function returning one.

use super::DiscoverError;
use crate::log;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// `locale -> segment` for one directory.
pub type SegmentTranslations = FxHashMap<String, String>;

const DECLARATION_FILES: [&str; 4] = ["i18n.json", "i18n.toml", "i18n.ts", "i18n.js"];

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*//.*$").expect("valid regex"));

static PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:"([^"\n]+)"|'([^'\n]+)'|([A-Za-z_$][\w$]*))\s*:\s*(?:"([^"\n]*)"|'([^'\n]*)'|`([^`$\n]*)`)"#,
    )
    .expect("valid regex")
});

/// Load the segment translations declared in `dir`, if any.
///
/// Entries for locales outside `locales` are ignored.
pub fn load_translations(
    dir: &Path,
    locales: &[String],
) -> Result<Option<SegmentTranslations>, DiscoverError> {
    for name in DECLARATION_FILES {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        let content =
            fs::read_to_string(&path).map_err(|err| DiscoverError::Io(path.clone(), err))?;
        let raw = parse_declaration(name, &content).map_err(|message| {
            DiscoverError::Translation {
                path: path.clone(),
                message,
            }
        })?;

        let translations: SegmentTranslations = raw
            .into_iter()
            .filter(|(locale, segment)| locales.contains(locale) && !segment.is_empty())
            .collect();

        if translations.is_empty() {
            log!("warning"; "no usable segment translations in {}", path.display());
            return Ok(None);
        }
        return Ok(Some(translations));
    }
    Ok(None)
}

fn parse_declaration(name: &str, content: &str) -> Result<Vec<(String, String)>, String> {
    match name.rsplit('.').next() {
        Some("json") => serde_json::from_str::<FxHashMap<String, String>>(content)
            .map(|map| map.into_iter().collect())
            .map_err(|e| e.to_string()),
        Some("toml") => toml::from_str::<FxHashMap<String, String>>(content)
            .map(|map| map.into_iter().collect())
            .map_err(|e| e.message().to_string()),
        _ => Ok(extract_script_pairs(content)),
    }
}

/// Extract `key: "value"` pairs from the default export of a script module.
///
/// Only the object literal the default export evaluates to is scanned: the
/// exported literal itself, the literal bound to an exported identifier, or
/// the literal a default-exported function returns.
fn extract_script_pairs(source: &str) -> Vec<(String, String)> {
    let source = BLOCK_COMMENT.replace_all(source, "");
    let source = LINE_COMMENT.replace_all(&source, "");
    let Some(object) = default_export_object(&source) else {
        return Vec::new();
    };

    PAIR.captures_iter(object)
        .filter_map(|caps| {
            let key = caps.get(1).or(caps.get(2)).or(caps.get(3))?;
            let value = caps.get(4).or(caps.get(5)).or(caps.get(6))?;
            Some((key.as_str().to_string(), value.as_str().to_string()))
        })
        .collect()
}

static DEFAULT_EXPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bexport\s+default\b\s*").expect("valid regex"));

static ARROW_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*(?::[^=]*)?=>\s*").expect("valid regex")
});

static IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*").expect("valid regex"));

static RETURN_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\breturn\s*\(?\s*\{").expect("valid regex"));

/// Identifier hops followed before giving up (guards `a = b; b = a`).
const MAX_INDIRECTION: usize = 4;

/// The braces of the object literal the default export evaluates to.
fn default_export_object(source: &str) -> Option<&str> {
    let start = DEFAULT_EXPORT.find(source)?.end();
    resolve_object(source, &source[start..], 0)
}

/// Resolve the expression at the start of `expr` to an object literal.
fn resolve_object<'a>(source: &'a str, expr: &'a str, hops: usize) -> Option<&'a str> {
    let expr = expr.trim_start();
    let literal = expr.trim_start_matches(|c: char| c == '(' || c.is_whitespace());
    if literal.starts_with('{') {
        return balanced_braces(literal);
    }

    let unwrapped = expr
        .strip_prefix("async")
        .filter(|rest| rest.starts_with(|c: char| c.is_whitespace() || c == '('))
        .map_or(expr, str::trim_start);
    if let Some(rest) = unwrapped.strip_prefix("function")
        && !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '$')
    {
        let body = &rest[rest.find(')')?..];
        return returned_object(balanced_braces(&body[body.find('{')?..])?);
    }
    if let Some(head) = ARROW_HEAD.find(unwrapped) {
        let body = &unwrapped[head.end()..];
        if body.starts_with('{') {
            return returned_object(balanced_braces(body)?);
        }
        return resolve_object(source, body, hops);
    }

    let name = IDENT.find(expr)?.as_str();
    if hops >= MAX_INDIRECTION {
        return None;
    }
    let name = regex::escape(name);
    let declaration = Regex::new(&format!(
        r"(?:\b(?:const|let|var)\s+{name}\s*(?::[^=]*)?=\s*|\b(function\s+{name})\b)"
    ))
    .ok()?;
    let caps = declaration.captures(source)?;
    match caps.get(1) {
        // `function name(...) { return {...} }`
        Some(function) => {
            let rest = &source[function.end()..];
            let body = &rest[rest.find(')')?..];
            returned_object(balanced_braces(&body[body.find('{')?..])?)
        }
        None => {
            let end = caps.get(0)?.end();
            resolve_object(source, &source[end..], hops + 1)
        }
    }
}

/// The object literal of the first `return { ... }` in a function body.
fn returned_object(body: &str) -> Option<&str> {
    let open = RETURN_OBJECT.find(body)?.end() - 1;
    balanced_braces(&body[open..])
}

/// The `{ ... }` block `text` starts with, braces inside strings skipped.
fn balanced_braces(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                _ if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
