//! Navigation state and actions.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`NavigationState`] | Page resolved from the browser's current URL |
//! | [`Navigator`] | Page/URL goto, refresh, back |

// ============================================================================
// Submodules
// ============================================================================

mod controller;
mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use controller::Navigator;
pub use state::NavigationState;
