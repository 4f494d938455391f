//! Builder pattern for service configuration.
//!
//! Provides a fluent API for configuring and creating [`Service`] instances.
//!
//! # Example
//!
//! ```ignore
//! use pom_navigator::Service;
//!
//! let service = Service::builder("https://shop.example.com")
//!     .domain("example.com")
//!     .sub_domain("shop")
//!     .page::<CartPage>()
//!     .build()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::page::Page;
use crate::route::{BaseUrlInfo, UrlPattern};

use super::core::Service;
use super::router::{PageFactory, Router};

// ============================================================================
// ServiceBuilder
// ============================================================================

/// Builder for configuring a [`Service`] instance.
///
/// Use [`Service::builder()`] to create a new builder.
#[derive(Debug, Clone)]
pub struct ServiceBuilder {
    /// Base URL the service is rooted at.
    base_url: String,
    /// Display name.
    name: Option<String>,
    /// Domains the service answers on.
    domains: Vec<String>,
    /// Required subdomain.
    sub_domain: Option<String>,
    /// Site prefix; taken from the base URL path when unset.
    path_prefix: Option<String>,
    /// Pages in registration order.
    pages: Vec<PageFactory>,
}

// ============================================================================
// ServiceBuilder Implementation
// ============================================================================

impl ServiceBuilder {
    /// Creates a builder for a service rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            name: None,
            domains: Vec::new(),
            sub_domain: None,
            path_prefix: None,
            pages: Vec::new(),
        }
    }

    /// Sets the display name used in logs.
    #[inline]
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a domain the service answers on.
    ///
    /// When no domain is added, the base URL's host is used, minus the
    /// required subdomain if one is set.
    #[inline]
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domains.push(domain.into());
        self
    }

    /// Adds several domains.
    #[inline]
    #[must_use]
    pub fn domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains.extend(domains.into_iter().map(Into::into));
        self
    }

    /// Requires a literal subdomain.
    #[inline]
    #[must_use]
    pub fn sub_domain(mut self, sub_domain: impl Into<String>) -> Self {
        self.sub_domain = Some(sub_domain.into());
        self
    }

    /// Sets the site prefix stripped from every path before matching.
    #[inline]
    #[must_use]
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    /// Registers page type `P`.
    #[inline]
    #[must_use]
    pub fn page<P: Page + Default>(mut self) -> Self {
        self.pages.push(PageFactory::of::<P>());
        self
    }

    /// Registers a list of page factories.
    #[inline]
    #[must_use]
    pub fn pages(mut self, factories: impl IntoIterator<Item = PageFactory>) -> Self {
        self.pages.extend(factories);
        self
    }

    /// Builds the service with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if the base URL does not parse
    /// - [`Error::Config`] if no domain is set and the base URL has no host
    /// - [`Error::DuplicatePage`] if a page type is listed twice
    /// - [`Error::InvalidPattern`] if the domain pattern does not compile
    pub fn build(self) -> Result<Service> {
        let url = Url::parse(&self.base_url)?;
        let sub_domain = self.sub_domain.filter(|sub| !sub.is_empty());
        let domains = validate_domains(self.domains, &url, sub_domain.as_deref())?;
        let path_prefix = normalize_prefix(self.path_prefix.as_deref().unwrap_or(url.path()));

        let escaped_prefix = (!path_prefix.is_empty()).then(|| regex::escape(&path_prefix));
        let pattern = UrlPattern::new(&domains, sub_domain.as_deref(), escaped_prefix.as_deref())?;

        let mut router = Router::new();
        router.register_all(self.pages)?;

        let base_info = BaseUrlInfo {
            domain: domains[0].clone(),
            sub_domain,
            absolute_path: path_prefix,
        };
        let name = self.name.unwrap_or_else(|| base_info.host());

        debug!(service = %name, base_url = %self.base_url, pages = router.len(), "Service built");

        Ok(Service::from_parts(name, self.base_url, base_info, pattern, router))
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Returns the configured domains, or the one implied by the base URL.
fn validate_domains(domains: Vec<String>, url: &Url, sub_domain: Option<&str>) -> Result<Vec<String>> {
    if !domains.is_empty() {
        return Ok(domains);
    }

    let host = url.host_str().ok_or_else(|| {
        Error::config(format!(
            "Service base URL has no host: {url}\n\
             Use .domain() to set the domain explicitly."
        ))
    })?;

    let domain = sub_domain
        .and_then(|sub| host.strip_prefix(sub))
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(host);

    Ok(vec![domain.to_string()])
}

/// Trims the trailing `/` and maps the root path to no prefix.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

// ============================================================================
// Tests
// ============================================================================
