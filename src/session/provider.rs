//! Process-wide session factory.
//!
//! The [`SessionProvider`] is built once per test run and shared read-only.
//! Each test asks it for an isolated [`TestSession`].
//!
//! # Example
//!
//! ```ignore
//! use pom_navigator::SessionProvider;
//!
//! let provider = SessionProvider::builder()
//!     .service(shop_service)
//!     .service(admin_service)
//!     .build()?;
//!
//! let session = provider.create_test_session(context_source)?;
//! let mut navigator = session.navigator();
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::info;

use crate::context::{ContextPool, ContextSource};
use crate::error::{Error, Result};
use crate::identifiers::SessionId;
use crate::service::{Service, ServiceDirectory};

use super::core::TestSession;

// ============================================================================
// Types
// ============================================================================

/// Builds a fresh service instance for one session.
pub type ServiceFactory = Arc<dyn Fn() -> Result<Service> + Send + Sync>;

/// Internal shared state for the provider.
pub(crate) struct ProviderInner {
    /// Service factories in registration order.
    factories: Vec<ServiceFactory>,

    /// Sessions currently alive.
    pub live: AtomicUsize,
}

// ============================================================================
// SessionProvider
// ============================================================================

/// Shared root that creates isolated test sessions.
///
/// Holds only immutable configuration and a live-session counter, so one
/// provider can serve many concurrent tests.
#[derive(Clone)]
pub struct SessionProvider {
    /// Shared inner state.
    pub(crate) inner: Arc<ProviderInner>,
}

impl fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionProvider")
            .field("services", &self.inner.factories.len())
            .field("live_sessions", &self.session_count())
            .finish()
    }
}

// ============================================================================
// SessionProvider - Public API
// ============================================================================

impl SessionProvider {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> SessionProviderBuilder {
        SessionProviderBuilder::new()
    }

    /// Creates an isolated session bound to `source`.
    ///
    /// The session gets its own context pool, its own service instances and
    /// its own directory. Nothing is shared with other sessions.
    ///
    /// # Errors
    ///
    /// Returns any error raised while building a service.
    pub fn create_test_session(&self, source: Arc<dyn ContextSource>) -> Result<TestSession> {
        let session_id = SessionId::new();

        let pool = Arc::new(ContextPool::new());
        pool.configure(source);

        let services = self
            .inner
            .factories
            .iter()
            .map(|factory| factory().map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        let directory = Arc::new(ServiceDirectory::new());
        for service in &services {
            directory.register_service(Arc::clone(service));
        }

        let live = self.inner.live.fetch_add(1, Ordering::SeqCst) + 1;
        info!(session_id = %session_id, services = services.len(), live, "Test session created");

        Ok(TestSession::new(
            session_id,
            directory,
            pool,
            services,
            Arc::clone(&self.inner),
        ))
    }

    /// Returns the number of sessions not yet disposed.
    #[inline]
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.inner.live.load(Ordering::SeqCst)
    }
}

// ============================================================================
// SessionProviderBuilder
// ============================================================================

/// Builder for a [`SessionProvider`].
#[derive(Default, Clone)]
pub struct SessionProviderBuilder {
    factories: Vec<ServiceFactory>,
}

impl fmt::Debug for SessionProviderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionProviderBuilder")
            .field("services", &self.factories.len())
            .finish()
    }
}

impl SessionProviderBuilder {
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a service factory, called once per session.
    #[inline]
    #[must_use]
    pub fn service<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Result<Service> + Send + Sync + 'static,
    {
        self.factories.push(Arc::new(factory));
        self
    }

    /// Builds the provider with validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no service was added.
    pub fn build(self) -> Result<SessionProvider> {
        if self.factories.is_empty() {
            return Err(Error::config(
                "At least one service is required. Use .service() to add one.\n\
                 Example: SessionProvider::builder().service(|| Service::builder(\"https://example.com\").build())",
            ));
        }

        Ok(SessionProvider {
            inner: Arc::new(ProviderInner {
                factories: self.factories,
                live: AtomicUsize::new(0),
            }),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
