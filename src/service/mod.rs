//! Services and their page registries.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Service`] | Base URL, domain pattern and pages of one application |
//! | [`ServiceBuilder`] | Fluent service configuration |
//! | [`Router`] | Ordered page registry, forward and reverse resolution |
//! | [`ServiceDirectory`] | Precedence-ordered set of a session's services |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for services.
pub mod builder;

/// Service struct and routing entry points.
pub mod core;

/// Multi-service registry.
pub mod directory;

/// Per-service page registry.
pub mod router;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ServiceBuilder;
pub use self::core::Service;
pub use directory::ServiceDirectory;
pub use router::{PageFactory, Router};
