//! Base URL components of a service or resolved page.

use serde::{Deserialize, Serialize};

// ============================================================================
// BaseUrlInfo
// ============================================================================

/// Host and site prefix a page lives under.
///
/// A resolved page carries the components of the URL it was matched from;
/// a service carries its configured defaults. [`BaseUrlInfo::apply`] merges
/// the two when assembling a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseUrlInfo {
    /// Registrable domain, e.g. `example.com`.
    pub domain: String,
    /// Subdomain in front of the domain, e.g. `shop`.
    pub sub_domain: Option<String>,
    /// Site prefix prepended to every page path, e.g. `/app`.
    pub absolute_path: String,
}

impl BaseUrlInfo {
    /// Creates base URL info for a bare domain.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            sub_domain: None,
            absolute_path: String::new(),
        }
    }

    /// Sets the subdomain.
    #[must_use]
    pub fn with_sub_domain(mut self, sub_domain: impl Into<String>) -> Self {
        self.sub_domain = Some(sub_domain.into());
        self
    }

    /// Sets the site prefix.
    #[must_use]
    pub fn with_absolute_path(mut self, path: impl Into<String>) -> Self {
        self.absolute_path = path.into();
        self
    }

    /// Merges `self` (the actual values) over `default`.
    ///
    /// Each field of `self` wins only when non-empty; otherwise the default
    /// is kept.
    #[must_use]
    pub fn apply(&self, default: &BaseUrlInfo) -> BaseUrlInfo {
        let pick = |actual: &str, fallback: &str| {
            if actual.is_empty() {
                fallback.to_string()
            } else {
                actual.to_string()
            }
        };

        let sub_domain = match self.sub_domain.as_deref() {
            Some(sub) if !sub.is_empty() => Some(sub.to_string()),
            _ => default.sub_domain.clone().filter(|sub| !sub.is_empty()),
        };

        BaseUrlInfo {
            domain: pick(&self.domain, &default.domain),
            sub_domain,
            absolute_path: pick(&self.absolute_path, &default.absolute_path),
        }
    }

    /// Returns the full host name (`sub.domain` or `domain`).
    #[must_use]
    pub fn host(&self) -> String {
        match self.sub_domain.as_deref() {
            Some(sub) if !sub.is_empty() => format!("{sub}.{}", self.domain),
            _ => self.domain.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
