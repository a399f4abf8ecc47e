//! Path normalization and pattern matching.
//!
//! A pattern is a `/`-separated list of segments where a segment is either a
//! literal or a braced placeholder such as `{id}`. Two matching strategies are
//! provided and share one contract: on success they return the bound values in
//! placeholder order, on failure `None`.
//!
//! - [`PathPattern::match_plain`] compares segments positionally and pairs
//!   every disagreeing pattern segment with the concrete segment.
//! - [`PathPattern::match_pattern`] compiles the pattern into an anchored
//!   regular expression and accepts `[A-Za-z0-9_-]+` for each placeholder.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};
use crate::request::PathParams;

/// Character class a placeholder accepts under [`MatchStrategy::Pattern`].
const PLACEHOLDER_CLASS: &str = "[A-Za-z0-9_-]+";

/// Which matcher the route table uses for parameterized routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Segment-by-segment comparison.
    #[default]
    Positional,
    /// Anchored regular expression.
    Pattern,
}

/// Normalizes a path to a single leading `/` and no trailing `/`.
///
/// ```
/// use oxide_route::path::normalize;
///
/// assert_eq!(normalize("users/"), "/users");
/// assert_eq!(normalize("//"), "/");
/// ```
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Joins a group prefix and a route path into a normalized path.
pub fn join(prefix: &str, path: &str) -> String {
    normalize(&format!(
        "{}/{}",
        prefix.trim_matches('/'),
        path.trim_matches('/')
    ))
}

/// Expands the first optional segment (`{name?}`) into two paths.
///
/// A segment is optional when it ends with `?`. The first path stops before
/// it, the second keeps it with its trailing `?` removed. Paths without an optional segment come back unchanged.
pub fn expand_optional(path: &str) -> Vec<String> {
    let normalized = normalize(path);
    let mut segments: Vec<&str> = normalized.split('/').collect();

    let Some(index) = segments.iter().position(|s| s.ends_with('?')) else {
        return vec![normalized];
    };

    let prefix = normalize(&segments[..index].join("/"));
    segments[index] = segments[index].trim_end_matches('?');
    vec![prefix, segments.join("/")]
}

/// Returns the name inside a whole-segment placeholder (`{id}` → `id`).
fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}

/// Scans `{...}` tokens in appearance order.
fn placeholder_tokens(pattern: &str) -> Vec<(usize, usize)> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while let Some(start) = pattern[offset..].find('{') {
        let start = offset + start;
        match pattern[start..].find('}') {
            Some(len) => {
                tokens.push((start, start + len + 1));
                offset = start + len + 1;
            }
            None => break,
        }
    }

    tokens
}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The normalized pattern string.
    pattern: String,
    /// Placeholder names in appearance order.
    placeholders: Vec<String>,
    /// Anchored regex, present when the pattern has placeholders.
    regex: Option<Regex>,
}

impl PathPattern {
    /// Compiles a pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_route::path::PathPattern;
    ///
    /// let pattern = PathPattern::new("/posts/{id}/comments/{comment_id}").unwrap();
    /// let params = pattern.match_plain("/posts/123/comments/456").unwrap();
    /// assert_eq!(params.get("id"), Some("123"));
    /// assert_eq!(params.values(), vec!["123", "456"]);
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = normalize(pattern);
        let tokens = placeholder_tokens(&pattern);

        let placeholders = tokens
            .iter()
            .map(|&(start, end)| pattern[start + 1..end - 1].to_string())
            .collect();

        let regex = if tokens.is_empty() {
            None
        } else {
            let mut regex_str = String::from("(?s)^");
            let mut last = 0;
            for &(start, end) in &tokens {
                regex_str.push_str(&regex::escape(&pattern[last..start]));
                regex_str.push_str(PLACEHOLDER_CLASS);
                last = end;
            }
            regex_str.push_str(&regex::escape(&pattern[last..]));
            regex_str.push('$');

            let compiled = Regex::new(&regex_str)
                .map_err(|e| RouterError::InvalidPattern(format!("{pattern}: {e}")))?;
            Some(compiled)
        };

        Ok(Self {
            pattern,
            placeholders,
            regex,
        })
    }

    /// Returns the pattern string.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns the placeholder names.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Whether the pattern contains a placeholder token.
    pub fn is_parameterized(&self) -> bool {
        self.pattern.contains('{')
    }

    /// Matches with the given strategy.
    pub fn matches(&self, path: &str, strategy: MatchStrategy) -> Option<PathParams> {
        match strategy {
            MatchStrategy::Positional => self.match_plain(path),
            MatchStrategy::Pattern => self.match_pattern(path),
        }
    }

    /// Positional matcher.
    ///
    /// Every position where the pattern and the path disagree must be a
    /// placeholder facing a non-empty segment. The pattern is then rebuilt
    /// with the collected values (the first value wins for a repeated
    /// placeholder) and must reproduce the path exactly.
    pub fn match_plain(&self, path: &str) -> Option<PathParams> {
        let pattern_segments: Vec<&str> = self.pattern.split('/').collect();
        let path_segments: Vec<&str> = path.split('/').collect();

        if pattern_segments.len() != path_segments.len() {
            return None;
        }

        let mut find = Vec::new();
        let mut replace = Vec::new();
        for (&expected, &actual) in pattern_segments.iter().zip(&path_segments) {
            if expected != actual {
                placeholder_name(expected)?;
                if actual.is_empty() {
                    return None;
                }
                find.push(expected);
                replace.push(actual);
            }
        }

        let rebuilt: Vec<&str> = pattern_segments
            .iter()
            .map(|segment| {
                find.iter()
                    .position(|f| f == segment)
                    .map_or(*segment, |i| replace[i])
            })
            .collect();
        if rebuilt.join("/") != path {
            return None;
        }

        let mut params = PathParams::new();
        for (token, value) in find.into_iter().zip(replace) {
            if let Some(name) = placeholder_name(token) {
                params.insert(name, value);
            }
        }
        Some(params)
    }

    /// Regex matcher.
    ///
    /// Only applies to parameterized patterns. Values are the concrete segments
    /// that differ from the pattern, bound to placeholder names in order.
    pub fn match_pattern(&self, path: &str) -> Option<PathParams> {
        let regex = self.regex.as_ref()?;
        if !regex.is_match(path) {
            return None;
        }

        let values = self
            .pattern
            .split('/')
            .zip(path.split('/'))
            .filter(|(expected, actual)| expected != actual)
            .map(|(_, actual)| actual);

        let mut params = PathParams::new();
        for (name, value) in self.placeholders.iter().zip(values) {
            params.insert(name.as_str(), value);
        }
        Some(params)
    }

    /// Replaces `{key}` tokens with the given values.
    ///
    /// Keys without a token are ignored and tokens without a value are kept.
    pub fn substitute(&self, values: &HashMap<String, String>) -> String {
        substitute(&self.pattern, values)
    }
}

/// Replaces `{key}` tokens in `path` with the given values.
///
/// Each token is looked up once; substituted values are never scanned again.
pub fn substitute(path: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(path.len());
    let mut last = 0;

    for (start, end) in placeholder_tokens(path) {
        out.push_str(&path[last..start]);
        match values.get(&path[start + 1..end - 1]) {
            Some(value) => out.push_str(value),
            None => out.push_str(&path[start..end]),
        }
        last = end;
    }

    out.push_str(&path[last..]);
    out
}
