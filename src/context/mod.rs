//! Browser contexts: driver seams and the per-session context pool.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BrowserPage`] | One tab: URL, navigate, reload, back |
//! | [`BrowserContext`] | Isolated environment owning tabs |
//! | [`ContextSource`] | Factory bound into a pool |
//! | [`ContextPool`] | One lazily created context per service |

// ============================================================================
// Submodules
// ============================================================================

/// Traits implemented by the browser driver.
pub mod driver;

/// Thread-safe context cache.
pub mod pool;

// ============================================================================
// Re-exports
// ============================================================================

pub use driver::{BrowserContext, BrowserPage, ContextSource};
pub use pool::ContextPool;
