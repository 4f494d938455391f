//! Per-test sessions.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SessionProvider`] | Shared root, built once per test run |
//! | [`SessionProviderBuilder`] | Fluent provider configuration |
//! | [`TestSession`] | Isolated services, directory and context pool |

// ============================================================================
// Submodules
// ============================================================================

/// Test session handle.
pub mod core;

/// Session factory.
pub mod provider;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::TestSession;
pub use provider::{ServiceFactory, SessionProvider, SessionProviderBuilder};
