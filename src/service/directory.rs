//! Multi-service registry with URL-to-service precedence.
//!
//! Services are kept sorted by base URL length, longest first, so the most
//! specific service is tried first. A full-domain match short-circuits the
//! scan; a base-domain match is only used when no full-domain match exists,
//! and two base-domain matches for one URL are a routing conflict.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::page::Page;
use crate::route::{DomainMatch, RequestData};

use super::core::Service;

// ============================================================================
// ServiceDirectory
// ============================================================================

/// Registry of the services active in one session.
#[derive(Debug, Default)]
pub struct ServiceDirectory {
    /// Services in precedence order.
    services: RwLock<Vec<Arc<Service>>>,
}

impl ServiceDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service and re-sorts by base URL length, longest first.
    ///
    /// Services with equal lengths keep their registration order.
    pub fn register_service(&self, service: Arc<Service>) {
        debug!(service = %service.name(), base_url = %service.base_url(), "Service registered");

        let mut services = self.services.write();
        services.push(service);
        services.sort_by(|a, b| b.base_url().len().cmp(&a.base_url().len()));
    }

    /// Returns the services in precedence order.
    #[must_use]
    pub fn services(&self) -> Vec<Arc<Service>> {
        self.services.read().clone()
    }

    /// Returns the number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.read().len()
    }

    /// Returns `true` if no service is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.read().is_empty()
    }
}

// ============================================================================
// ServiceDirectory - Resolution
// ============================================================================

impl ServiceDirectory {
    /// Finds the service serving a request.
    ///
    /// Returns `Ok(None)` when no service matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RoutingConflict`] when two services reach a
    /// base-domain match before any full-domain match is found.
    pub fn match_service(&self, request: &RequestData) -> Result<Option<Arc<Service>>> {
        let services = self.services.read();
        let mut base_match: Option<&Arc<Service>> = None;

        for service in services.iter() {
            match service.classify(request) {
                DomainMatch::FullDomain(_) => {
                    debug!(url = %request, service = %service.name(), "Full domain match");
                    return Ok(Some(Arc::clone(service)));
                }
                DomainMatch::BaseDomain(_) => {
                    if let Some(first) = base_match {
                        warn!(
                            url = %request,
                            first = %first.base_url(),
                            second = %service.base_url(),
                            "Ambiguous base domain routing"
                        );
                        return Err(Error::routing_conflict(
                            request.url(),
                            first.base_url(),
                            service.base_url(),
                        ));
                    }
                    base_match = Some(service);
                }
                DomainMatch::Unmatched => {}
            }
        }

        if let Some(service) = base_match {
            debug!(url = %request, service = %service.name(), "Base domain match");
        }
        Ok(base_match.map(Arc::clone))
    }

    /// Resolves a request to a page of the matching service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RoutingConflict`] as [`Self::match_service`] does.
    pub fn resolve(&self, request: &RequestData) -> Result<Option<Box<dyn Page>>> {
        Ok(self
            .match_service(request)?
            .and_then(|service| service.resolve(request)))
    }

    /// Returns the first service owning the page's type.
    #[must_use]
    pub fn service_for(&self, page: &dyn Page) -> Option<Arc<Service>> {
        self.services
            .read()
            .iter()
            .find(|service| service.owns(page))
            .cloned()
    }

    /// Assembles the request reaching `page` through its owning service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceNotFound`] if no service owns the page.
    pub fn request_data(&self, page: &dyn Page) -> Result<RequestData> {
        self.service_for(page)
            .map(|service| service.request_data(page))
            .ok_or_else(|| Error::service_not_found(page.kind().name()))
    }
}

// ============================================================================
// Tests
// ============================================================================
