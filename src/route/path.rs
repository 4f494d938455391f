//! Path template matching and parameter extraction.
//!
//! Templates are `/`-separated segments; a segment written `{name}` binds the
//! literal segment text to `name`. Matching is exact-depth: a template and a
//! path with different segment counts never match.
//!
//! ```ignore
//! let result = PathMatcher::match_path("/users/{id}", "/Users/7", None, &Constraints::default());
//! assert_eq!(result.unwrap().data["id"], "7");
//! ```

use crate::page::PageData;

use super::request::Cookie;

// ============================================================================
// Constraints
// ============================================================================

/// Fixed values a page requires on top of its template.
///
/// Two pages may share one template and differ only by a fixed field value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Constraints<'a> {
    /// Required path-data values.
    pub data: Option<&'a PageData>,
    /// Required query values.
    pub query: Option<&'a PageData>,
}

// ============================================================================
// MatchResult
// ============================================================================

/// Values extracted by a successful match.
///
/// A failed match is `None`; it carries nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Path parameters bound from `{name}` segments.
    pub data: PageData,
    /// Query parameters.
    pub params: PageData,
    /// Cookies of the request that was matched.
    pub cookies: Vec<Cookie>,
}

impl MatchResult {
    /// Attaches the request's cookies.
    #[must_use]
    pub fn with_cookies(mut self, cookies: &[Cookie]) -> Self {
        self.cookies = cookies.to_vec();
        self
    }
}

// ============================================================================
// PathMatcher
// ============================================================================

/// Matches literal paths against page templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathMatcher;

impl PathMatcher {
    /// Matches `path` against `template`.
    ///
    /// # Arguments
    ///
    /// * `template` - Path template, e.g. `/users/{id}`
    /// * `path` - Literal path with the site prefix already stripped
    /// * `query` - Raw query string without the leading `?`
    /// * `constraints` - Fixed values the extracted maps must carry
    ///
    /// Returns the full extracted maps, including fields no constraint names.
    #[must_use]
    pub fn match_path(
        template: &str,
        path: &str,
        query: Option<&str>,
        constraints: &Constraints<'_>,
    ) -> Option<MatchResult> {
        let data = Self::bind_segments(template, path)?;
        let params = query.map(parse_query).unwrap_or_default();

        if !satisfies(&data, constraints.data) || !satisfies(&params, constraints.query) {
            return None;
        }

        Some(MatchResult {
            data,
            params,
            cookies: Vec::new(),
        })
    }

    /// Binds template segments to path segments.
    fn bind_segments(template: &str, path: &str) -> Option<PageData> {
        let template_segments: Vec<&str> = split_segments(template).collect();
        let path_segments: Vec<&str> = split_segments(path).collect();

        if template_segments.len() != path_segments.len() {
            return None;
        }

        let mut data = PageData::new();
        for (pattern, literal) in template_segments.iter().zip(&path_segments) {
            match placeholder_name(pattern) {
                Some(name) => {
                    data.insert(name.to_string(), (*literal).to_string());
                }
                None if eq_ignore_case(pattern, literal) => {}
                None => return None,
            }
        }

        Some(data)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Splits a path into segments, ignoring one leading `/`.
fn split_segments(path: &str) -> std::str::Split<'_, char> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

/// Returns `name` for a `{name}` segment.
fn placeholder_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
}

/// Splits a raw query string into key/value pairs.
///
/// Pairs without `=` are skipped. No percent-decoding is applied.
fn parse_query(query: &str) -> PageData {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Checks every required value against the extracted map.
fn satisfies(extracted: &PageData, required: Option<&PageData>) -> bool {
    required.is_none_or(|required| {
        required.iter().all(|(key, expected)| {
            extracted
                .get(key)
                .is_some_and(|actual| eq_ignore_case(actual, expected))
        })
    })
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

// ============================================================================
// Tests
// ============================================================================
