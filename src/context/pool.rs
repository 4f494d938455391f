//! Per-session browser context cache.
//!
//! Holds at most one context per service for the lifetime of the pool,
//! created lazily on first request.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │              ContextPool                 │
//! │  ┌────────────────────────────────────┐  │
//! │  │ ServiceId=A → OnceCell(Context A)  │  │
//! │  │ ServiceId=B → OnceCell(Context B)  │  │
//! │  └────────────────────────────────────┘  │
//! │            ContextSource (bound once)    │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Lookup is optimistic under a read lock. On a miss the write lock is taken,
//! the map is checked again and the service's cell is inserted if absent.
//! The cell itself is the single-flight point: racing callers for the same
//! service all await one creation, while other services' cells are unaffected.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::identifiers::ServiceId;
use crate::service::Service;

use super::driver::{BrowserContext, ContextSource};

// ============================================================================
// Types
// ============================================================================

/// Lazily filled slot for one service's context.
type ContextCell = Arc<OnceCell<Arc<dyn BrowserContext>>>;

// ============================================================================
// ContextPool
// ============================================================================

/// Thread-safe, lazily filled map from service to browser context.
///
/// # Example
///
/// ```ignore
/// let pool = ContextPool::new();
/// pool.configure(source);
///
/// let first = pool.get_context(&service).await?;
/// let again = pool.get_context(&service).await?;
/// assert!(Arc::ptr_eq(&first, &again));
/// ```
pub struct ContextPool {
    /// Context factory, bound once per session.
    source: RwLock<Option<Arc<dyn ContextSource>>>,

    /// One cell per service that has been requested.
    contexts: RwLock<FxHashMap<ServiceId, ContextCell>>,

    /// Number of contexts created so far.
    created: AtomicUsize,
}

impl fmt::Debug for ContextPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextPool")
            .field("configured", &self.is_configured())
            .field("contexts", &self.context_count())
            .finish_non_exhaustive()
    }
}

impl Default for ContextPool {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ContextPool - Constructor
// ============================================================================

impl ContextPool {
    /// Creates an empty pool with no context source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: RwLock::new(None),
            contexts: RwLock::new(FxHashMap::default()),
            created: AtomicUsize::new(0),
        }
    }

    /// Binds the context source.
    ///
    /// Replaces any previously bound source; cached contexts are kept.
    pub fn configure(&self, source: Arc<dyn ContextSource>) {
        *self.source.write() = Some(source);
        debug!("ContextPool source configured");
    }
}

// ============================================================================
// ContextPool - Public API
// ============================================================================

impl ContextPool {
    /// Returns the context for `service`, creating it on first use.
    ///
    /// Concurrent first calls for the same service create exactly one
    /// context and all observe it. Calls for distinct services never wait
    /// on each other.
    ///
    /// # Errors
    ///
    /// - [`Error::ContextSourceMissing`] if no source was configured
    /// - Any error returned by the source. The cell stays empty, so each
    ///   caller queued behind a failed attempt runs its own creation.
    pub async fn get_context(&self, service: &Service) -> Result<Arc<dyn BrowserContext>> {
        let service_id = service.id();

        if let Some(context) = self.cached(service_id) {
            return Ok(context);
        }

        let source = self
            .source
            .read()
            .clone()
            .ok_or(Error::ContextSourceMissing)?;

        let cell = {
            let mut contexts = self.contexts.write();
            Arc::clone(contexts.entry(service_id).or_default())
        };

        let context = cell
            .get_or_try_init(|| async {
                debug!(service_id = %service_id, base_url = %service.base_url(), "Creating browser context");
                let context = source.create_context(service).await?;
                let total = self.created.fetch_add(1, Ordering::SeqCst) + 1;
                info!(service_id = %service_id, total, "Browser context created");
                Ok::<_, Error>(context)
            })
            .await?;

        Ok(Arc::clone(context))
    }

    /// Returns `true` if a context source is bound.
    #[inline]
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.source.read().is_some()
    }

    /// Returns the number of cached contexts.
    #[must_use]
    pub fn context_count(&self) -> usize {
        self.contexts
            .read()
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    /// Returns the number of contexts created over the pool's lifetime.
    #[inline]
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

// ============================================================================
// ContextPool - Lifecycle
// ============================================================================

impl ContextPool {
    /// Drops all cached entries and unbinds the source.
    ///
    /// The contexts themselves are not closed: their lifetime belongs to the
    /// driver that created them.
    pub fn dispose(&self) {
        let released = {
            let mut contexts = self.contexts.write();
            let count = contexts.len();
            contexts.clear();
            count
        };
        self.source.write().take();

        info!(released, "ContextPool disposed");
    }
}

// ============================================================================
// ContextPool - Internal
// ============================================================================

impl ContextPool {
    /// Optimistic lookup under the read lock.
    fn cached(&self, service_id: ServiceId) -> Option<Arc<dyn BrowserContext>> {
        self.contexts
            .read()
            .get(&service_id)
            .and_then(|cell| cell.get())
            .map(Arc::clone)
    }
}

// ============================================================================
// Tests
// ============================================================================
