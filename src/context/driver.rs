//! Browser driver seams.
//!
//! The navigation layer never talks to a browser directly. It drives these
//! traits, which a driver crate (or a test fake) implements.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::route::Cookie;
use crate::service::Service;

// ============================================================================
// BrowserPage
// ============================================================================

/// One browser tab.
#[async_trait]
pub trait BrowserPage: Send + Sync + fmt::Debug {
    /// Returns the URL currently loaded.
    async fn url(&self) -> Result<String>;

    /// Navigates to a URL.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Reloads the current page.
    async fn reload(&self) -> Result<()>;

    /// Navigates back in history.
    async fn back(&self) -> Result<()>;

    /// Returns the context owning this tab, if still alive.
    fn context(&self) -> Option<Arc<dyn BrowserContext>>;
}

// ============================================================================
// BrowserContext
// ============================================================================

/// An isolated browser environment owning zero or more tabs.
#[async_trait]
pub trait BrowserContext: Send + Sync + fmt::Debug {
    /// Returns the open tabs.
    fn pages(&self) -> Vec<Arc<dyn BrowserPage>>;

    /// Opens a new tab.
    async fn new_page(&self) -> Result<Arc<dyn BrowserPage>>;

    /// Installs cookies for subsequent requests.
    async fn add_cookies(&self, cookies: &[Cookie]) -> Result<()>;
}

// ============================================================================
// ContextSource
// ============================================================================

/// Creates browser contexts on demand.
///
/// Bound into a session's [`ContextPool`](super::ContextPool); called at most
/// once per service per session.
#[async_trait]
pub trait ContextSource: Send + Sync {
    /// Creates a fresh context for `service`.
    async fn create_context(&self, service: &Service) -> Result<Arc<dyn BrowserContext>>;
}
