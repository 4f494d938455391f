//! Navigation intent: a URL plus the cookies to install before visiting it.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

// ============================================================================
// Cookie
// ============================================================================

/// A cookie to install on the browser context before navigating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Cookie domain. Defaults to the target host when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Cookie path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Cookie {
    /// Creates a host-scoped cookie.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
        }
    }

    /// Sets the cookie domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the cookie path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

// ============================================================================
// RequestData
// ============================================================================

/// A URL to navigate to and the cookies that go with it.
///
/// The URL is kept as the literal string that was built or received.
/// Query strings are never percent-encoded or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestData {
    url: String,
    cookies: Vec<Cookie>,
}

impl RequestData {
    /// Creates request data for a URL without cookies.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cookies: Vec::new(),
        }
    }

    /// Creates request data after checking the URL parses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if the URL is malformed.
    pub fn parse(url: &str) -> Result<Self> {
        Url::parse(url)?;
        Ok(Self::new(url))
    }

    /// Attaches cookies.
    #[must_use]
    pub fn with_cookies(mut self, cookies: impl IntoIterator<Item = Cookie>) -> Self {
        self.cookies.extend(cookies);
        self
    }

    /// Returns the literal URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the cookies.
    #[inline]
    #[must_use]
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Returns the literal path, without query or fragment.
    ///
    /// Nothing is decoded: `/users/a b` stays `/users/a b`. An empty path
    /// reads as `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        let rest = after_authority(&self.url);
        let end = rest.find(['?', '#']).unwrap_or(rest.len());
        match &rest[..end] {
            "" => "/",
            path => path,
        }
    }

    /// Returns the literal query string, without the `?` and fragment.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        let rest = after_authority(&self.url);
        let start = rest.find(['?', '#'])?;
        let query = rest[start..].strip_prefix('?')?;
        Some(query.split_once('#').map_or(query, |(query, _)| query))
    }

    /// Parses the URL into its components.
    ///
    /// The `url` crate normalizes and percent-encodes; use [`Self::path`]
    /// and [`Self::query`] for the literal text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if the URL is malformed.
    pub fn parsed(&self) -> Result<Url> {
        Ok(Url::parse(&self.url)?)
    }
}

/// Returns everything from the end of the authority on.
fn after_authority(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.find(['/', '?', '#']).map_or("", |start| &rest[start..])
}

impl fmt::Display for RequestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl From<&str> for RequestData {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for RequestData {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

// ============================================================================
// Tests
// ============================================================================
