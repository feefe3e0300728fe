//! Compiled route patterns.
//!
//! Pattern syntax, as written into the schema:
//!
//! | Token     | Matches                                  |
//! |-----------|------------------------------------------|
//! | `text`    | one segment equal to `text`              |
//! | `:name`   | one non-empty segment                    |
//! | `*name`   | one or more trailing segments            |
//! | `{/*name}`| zero or more trailing segments           |

use super::params::{ParamValue, RouteParams};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::borrow::Cow;
use thiserror::Error;

/// Characters left unescaped in a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern `{0}` must start with `/`")]
    NotRooted(String),

    #[error("pattern `{0}` contains an empty parameter name")]
    EmptyName(String),

    #[error("parameter `{name}` appears twice in `{pattern}`")]
    DuplicateParam { pattern: String, name: String },

    #[error("catch-all `{name}` must be the last segment of `{pattern}`")]
    CatchAllNotLast { pattern: String, name: String },

    #[error("optional catch-all in `{0}` must close with `}}` at the end of the pattern")]
    BadOptional(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HrefError {
    #[error("missing parameter `{0}`")]
    Missing(String),

    #[error("parameter `{0}` expects a single value")]
    ExpectedOne(String),

    #[error("parameter `{0}` must not be empty")]
    Empty(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Static(String),
    Param(String),
    CatchAll(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    tokens: Vec<Token>,
    optional: Option<String>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let (body, optional) = match pattern.find("{/*") {
            Some(start) => {
                let name = pattern[start + 3..]
                    .strip_suffix('}')
                    .filter(|name| !name.contains(['/', '{', '}']))
                    .ok_or_else(|| PatternError::BadOptional(pattern.to_string()))?;
                (&pattern[..start], Some(name.to_string()))
            }
            None => (pattern, None),
        };

        let rooted = body.starts_with('/') || (body.is_empty() && optional.is_some());
        if !rooted {
            return Err(PatternError::NotRooted(pattern.to_string()));
        }

        let mut tokens = Vec::new();
        let mut names: Vec<&str> = Vec::new();
        for segment in body.split('/').skip(1).filter(|s| !s.is_empty()) {
            let token = if let Some(name) = segment.strip_prefix(':') {
                Token::Param(name.to_string())
            } else if let Some(name) = segment.strip_prefix('*') {
                Token::CatchAll(name.to_string())
            } else {
                Token::Static(segment.to_string())
            };
            if let Some(Token::CatchAll(name)) = tokens.last() {
                return Err(PatternError::CatchAllNotLast {
                    pattern: pattern.to_string(),
                    name: name.clone(),
                });
            }
            if let Token::Param(name) | Token::CatchAll(name) = &token {
                names.push(&segment[1..]);
                if name.is_empty() {
                    return Err(PatternError::EmptyName(pattern.to_string()));
                }
            }
            tokens.push(token);
        }

        if let Some(name) = &optional {
            if name.is_empty() {
                return Err(PatternError::EmptyName(pattern.to_string()));
            }
            if let Some(Token::CatchAll(previous)) = tokens.last() {
                return Err(PatternError::CatchAllNotLast {
                    pattern: pattern.to_string(),
                    name: previous.clone(),
                });
            }
            names.push(name);
        }

        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(PatternError::DuplicateParam {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                });
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
            optional,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of the dynamic segments, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Param(name) | Token::CatchAll(name) => Some(name.as_str()),
                Token::Static(_) => None,
            })
            .chain(self.optional.as_deref())
    }

    pub fn is_static(&self) -> bool {
        self.param_names().next().is_none()
    }

    /// Match a concrete pathname, returning decoded parameters.
    ///
    /// One trailing slash is tolerated, so `//` is an empty segment and never
    /// the root. Query strings and fragments are not stripped here.
    pub fn matches(&self, pathname: &str) -> Option<RouteParams> {
        if !pathname.starts_with('/') {
            return None;
        }
        let trimmed = match pathname.strip_suffix('/') {
            Some(rest) if !rest.is_empty() && !rest.ends_with('/') => rest,
            _ => pathname,
        };
        let segments: Vec<&str> = if trimmed == "/" {
            Vec::new()
        } else {
            trimmed[1..].split('/').collect()
        };
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let mut params = RouteParams::new();
        let mut rest = segments.as_slice();
        for token in &self.tokens {
            match token {
                Token::Static(text) => {
                    let (first, tail) = rest.split_first()?;
                    if decode(first) != text.as_str() {
                        return None;
                    }
                    rest = tail;
                }
                Token::Param(name) => {
                    let (first, tail) = rest.split_first()?;
                    params.insert(name.clone(), ParamValue::One(decode(first).into_owned()));
                    rest = tail;
                }
                Token::CatchAll(name) => {
                    if rest.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), ParamValue::Many(decode_all(rest)));
                    rest = &[];
                }
            }
        }

        if let Some(name) = &self.optional {
            if !rest.is_empty() {
                params.insert(name.clone(), ParamValue::Many(decode_all(rest)));
                rest = &[];
            }
        }

        rest.is_empty().then_some(params)
    }

    /// Substitute parameters into the pattern, percent-encoding each value.
    ///
    /// A catch-all accepts a single value as a one-segment list. Matching
    /// always reports catch-all values as lists, so `One("a")` given for a
    /// catch-all comes back from [`matches`](Self::matches) as `Many(["a"])`.
    /// Parameters the pattern does not use are ignored.
    pub fn compile(&self, params: &RouteParams) -> Result<String, HrefError> {
        let mut path = String::new();
        for token in &self.tokens {
            match token {
                Token::Static(text) => {
                    path.push('/');
                    path.push_str(text);
                }
                Token::Param(name) => match params.get(name) {
                    Some(ParamValue::One(value)) if value.is_empty() => {
                        return Err(HrefError::Empty(name.clone()));
                    }
                    Some(ParamValue::One(value)) => {
                        path.push('/');
                        path.extend(utf8_percent_encode(value, SEGMENT));
                    }
                    Some(ParamValue::Many(_)) => return Err(HrefError::ExpectedOne(name.clone())),
                    None => return Err(HrefError::Missing(name.clone())),
                },
                Token::CatchAll(name) => {
                    let value = params.get(name).ok_or_else(|| HrefError::Missing(name.clone()))?;
                    push_segments(&mut path, name, value.segments())?;
                }
            }
        }
        if let Some(name) = &self.optional {
            if let Some(value) = params.get(name) {
                if !value.segments().is_empty() {
                    push_segments(&mut path, name, value.segments())?;
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

fn push_segments(path: &mut String, name: &str, segments: &[String]) -> Result<(), HrefError> {
    if segments.is_empty() || segments.iter().any(String::is_empty) {
        return Err(HrefError::Empty(name.to_string()));
    }
    for segment in segments {
        path.push('/');
        path.extend(utf8_percent_encode(segment, SEGMENT));
    }
    Ok(())
}

fn decode(segment: &str) -> Cow<'_, str> {
    percent_decode_str(segment).decode_utf8_lossy()
}

fn decode_all(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| decode(s).into_owned()).collect()
}
