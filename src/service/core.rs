//! A registered application boundary: base URL, domain pattern and pages.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use crate::identifiers::ServiceId;
use crate::page::Page;
use crate::route::{BaseUrlInfo, DomainMatch, RequestData, UrlPattern};

use super::builder::ServiceBuilder;
use super::router::Router;

// ============================================================================
// Service
// ============================================================================

/// One logical service under test.
///
/// Built with [`Service::builder`]; every page the service serves is listed
/// there, so the full registry is known before the first navigation.
///
/// # Example
///
/// ```ignore
/// let shop = Service::builder("https://shop.example.com/app")
///     .domain("example.com")
///     .sub_domain("shop")
///     .page::<CartPage>()
///     .page::<ProductPage>()
///     .build()?;
/// ```
pub struct Service {
    id: ServiceId,
    name: String,
    base_url: String,
    base_info: BaseUrlInfo,
    pattern: UrlPattern,
    router: Router,
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("pages", &self.router)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Service - Constructor
// ============================================================================

impl Service {
    /// Starts building a service rooted at `base_url`.
    #[inline]
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> ServiceBuilder {
        ServiceBuilder::new(base_url)
    }

    /// Assembles a service from validated parts.
    pub(crate) fn from_parts(
        name: String,
        base_url: String,
        base_info: BaseUrlInfo,
        pattern: UrlPattern,
        router: Router,
    ) -> Self {
        Self {
            id: ServiceId::new(),
            name,
            base_url,
            base_info,
            pattern,
            router,
        }
    }
}

// ============================================================================
// Service - Accessors
// ============================================================================

impl Service {
    /// Returns the instance identity.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ServiceId {
        self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configured base URL.
    ///
    /// Its length orders services in a directory.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default host, e.g. `shop.example.com`.
    #[must_use]
    pub fn host(&self) -> String {
        self.base_info.host()
    }

    /// Returns the site prefix, e.g. `/app`.
    #[inline]
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.base_info.absolute_path
    }

    /// Returns the default base URL components.
    #[inline]
    #[must_use]
    pub fn base_info(&self) -> &BaseUrlInfo {
        &self.base_info
    }

    /// Returns the page registry.
    #[inline]
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }
}

// ============================================================================
// Service - Routing
// ============================================================================

impl Service {
    /// Classifies a request against this service's domain pattern.
    #[must_use]
    pub fn classify(&self, request: &RequestData) -> DomainMatch {
        self.pattern.classify(request.url())
    }

    /// Resolves a request to one of this service's pages.
    ///
    /// The resolved page carries the host actually matched, so a page
    /// reached on another subdomain navigates back to that subdomain.
    #[must_use]
    pub fn resolve(&self, request: &RequestData) -> Option<Box<dyn Page>> {
        let host = self.classify(request).host()?.clone();
        let actual = BaseUrlInfo {
            domain: host.domain,
            sub_domain: host.sub_domain,
            absolute_path: self.base_info.absolute_path.clone(),
        };
        self.router.resolve(request, &actual)
    }

    /// Returns `true` if the page's type is registered on this service.
    #[must_use]
    pub fn owns(&self, page: &dyn Page) -> bool {
        self.router.contains(page.kind())
    }

    /// Assembles the request reaching `page`.
    #[must_use]
    pub fn request_data(&self, page: &dyn Page) -> RequestData {
        self.router.request_data(page, &self.base_info)
    }
}

// ============================================================================
// Tests
// ============================================================================
