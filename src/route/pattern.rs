//! Domain and subdomain classification of URLs.
//!
//! A [`UrlPattern`] is compiled once per service from its domain list, an
//! optional required subdomain and an optional site-prefix pattern.
//!
//! | Configured | URL host | Result |
//! |------------|----------|--------|
//! | subdomain `a` | `a.example.com` | [`DomainMatch::FullDomain`] |
//! | subdomain `a` | `b.example.com` | [`DomainMatch::Unmatched`] |
//! | no subdomain | `example.com` | [`DomainMatch::FullDomain`] |
//! | no subdomain | `b.example.com` | [`DomainMatch::BaseDomain`] |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use regex::Regex;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Optional scheme and userinfo in front of the host.
const SCHEME_PREFIX: &str = r"^(?:[a-z][a-z0-9+.\-]*://)?(?:[^@/?#]*@)?";

/// Any dotted label sequence in front of the domain.
const ANY_SUB_DOMAIN: &str = r"(?:(?P<any>[^./?#:@]+(?:\.[^./?#:@]+)*)\.)?";

/// Optional port after the domain.
const HOST_SUFFIX: &str = r"(?::\d+)?";

/// Path, query or fragment after the matched prefix.
const URL_REST: &str = r"(?:[/?#].*)?$";

// ============================================================================
// DomainMatch
// ============================================================================

/// Host components captured by a successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMatch {
    /// The matched domain, as written in the URL.
    pub domain: String,
    /// The subdomain in front of it, if any.
    pub sub_domain: Option<String>,
}

/// Confidence of a URL-to-service classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainMatch {
    /// The URL is not served by this pattern.
    Unmatched,
    /// Only the generic subdomain capture matched. Lower confidence.
    BaseDomain(HostMatch),
    /// The required subdomain matched, or none was required and none present.
    FullDomain(HostMatch),
}

impl DomainMatch {
    /// Returns `true` for [`DomainMatch::FullDomain`].
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::FullDomain(_))
    }

    /// Returns `true` for [`DomainMatch::BaseDomain`].
    #[inline]
    #[must_use]
    pub fn is_base(&self) -> bool {
        matches!(self, Self::BaseDomain(_))
    }

    /// Returns the captured host, if matched.
    #[inline]
    #[must_use]
    pub fn host(&self) -> Option<&HostMatch> {
        match self {
            Self::Unmatched => None,
            Self::BaseDomain(host) | Self::FullDomain(host) => Some(host),
        }
    }
}

// ============================================================================
// UrlPattern
// ============================================================================

/// Compiled domain/subdomain/path pattern for one service.
#[derive(Clone)]
pub struct UrlPattern {
    regex: Regex,
    requires_sub_domain: bool,
}

impl fmt::Debug for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlPattern")
            .field("regex", &self.regex.as_str())
            .field("requires_sub_domain", &self.requires_sub_domain)
            .finish()
    }
}

impl UrlPattern {
    /// Compiles a pattern.
    ///
    /// # Arguments
    ///
    /// * `domains` - Literal domains, escaped here before alternation
    /// * `sub_domain` - Required literal subdomain, or `None` to accept any
    /// * `path` - Regex for the site prefix; the caller escapes it
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `domains` is empty or holds an empty entry
    /// - [`Error::InvalidPattern`] if the path pattern does not compile
    pub fn new<S: AsRef<str>>(
        domains: &[S],
        sub_domain: Option<&str>,
        path: Option<&str>,
    ) -> Result<Self> {
        if domains.is_empty() {
            return Err(Error::config("URL pattern needs at least one domain"));
        }
        if domains.iter().any(|domain| domain.as_ref().is_empty()) {
            return Err(Error::config("URL pattern domain must not be empty"));
        }

        let alternation = domains
            .iter()
            .map(|domain| regex::escape(domain.as_ref()))
            .collect::<Vec<_>>()
            .join("|");

        let sub_domain = sub_domain.filter(|sub| !sub.is_empty());
        let sub_part = match sub_domain {
            Some(sub) => format!(r"(?P<sub>{})\.", regex::escape(sub)),
            None => ANY_SUB_DOMAIN.to_string(),
        };
        let path_part = path
            .filter(|path| !path.is_empty())
            .map(|path| format!("(?P<path>{path})"))
            .unwrap_or_default();

        let source = format!(
            "(?i){SCHEME_PREFIX}{sub_part}(?P<domain>{alternation}){HOST_SUFFIX}{path_part}{URL_REST}"
        );
        let regex = Regex::new(&source)?;

        Ok(Self {
            regex,
            requires_sub_domain: sub_domain.is_some(),
        })
    }

    /// Classifies a URL against this pattern.
    #[must_use]
    pub fn classify(&self, url: &str) -> DomainMatch {
        let Some(captures) = self.regex.captures(url) else {
            return DomainMatch::Unmatched;
        };

        let domain = captures
            .name("domain")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        if self.requires_sub_domain {
            let sub_domain = captures.name("sub").map(|m| m.as_str().to_string());
            return DomainMatch::FullDomain(HostMatch { domain, sub_domain });
        }

        match captures.name("any").map(|m| m.as_str()) {
            Some(any) if !any.is_empty() => DomainMatch::BaseDomain(HostMatch {
                domain,
                sub_domain: Some(any.to_string()),
            }),
            _ => DomainMatch::FullDomain(HostMatch {
                domain,
                sub_domain: None,
            }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
