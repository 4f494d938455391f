//! One test's isolated session.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use tracing::info;

use crate::context::ContextPool;
use crate::identifiers::SessionId;
use crate::navigation::Navigator;
use crate::service::{Service, ServiceDirectory};

use super::provider::ProviderInner;

// ============================================================================
// TestSession
// ============================================================================

/// Services, directory and context pool of one test.
///
/// Disposed explicitly with [`TestSession::dispose`] or on drop. Disposal
/// releases the cached contexts without closing them.
pub struct TestSession {
    id: SessionId,
    directory: Arc<ServiceDirectory>,
    pool: Arc<ContextPool>,
    services: Vec<Arc<Service>>,
    root: Arc<ProviderInner>,
    disposed: bool,
}

impl fmt::Debug for TestSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSession")
            .field("id", &self.id)
            .field("services", &self.services.len())
            .field("pool", &self.pool)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl TestSession {
    /// Creates a session handle.
    pub(crate) fn new(
        id: SessionId,
        directory: Arc<ServiceDirectory>,
        pool: Arc<ContextPool>,
        services: Vec<Arc<Service>>,
        root: Arc<ProviderInner>,
    ) -> Self {
        Self {
            id,
            directory,
            pool,
            services,
            root,
            disposed: false,
        }
    }

    /// Returns the session ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the session's service directory.
    #[inline]
    #[must_use]
    pub fn directory(&self) -> &Arc<ServiceDirectory> {
        &self.directory
    }

    /// Returns the session's context pool.
    #[inline]
    #[must_use]
    pub fn pool(&self) -> &Arc<ContextPool> {
        &self.pool
    }

    /// Returns the session's services in registration order.
    #[inline]
    #[must_use]
    pub fn services(&self) -> &[Arc<Service>] {
        &self.services
    }

    /// Returns the service with the given name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&Arc<Service>> {
        self.services.iter().find(|service| service.name() == name)
    }

    /// Creates a navigator bound to this session.
    #[must_use]
    pub fn navigator(&self) -> Navigator {
        Navigator::new(Arc::clone(&self.directory), Arc::clone(&self.pool))
    }

    /// Returns `true` once disposed.
    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Releases the session. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        self.pool.dispose();
        let live = self.root.live.fetch_sub(1, Ordering::SeqCst) - 1;
        info!(session_id = %self.id, live, "Test session disposed");
    }
}

impl Drop for TestSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
