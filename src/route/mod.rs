//! URL classification, path matching and reverse assembly.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `base_url` | Host and site-prefix components, merge rule |
//! | `request` | Navigation intent: URL and cookies |
//! | `pattern` | Domain/subdomain classification |
//! | `path` | Template matching, parameter extraction |
//! | `assembler` | Template and data to URL |

// ============================================================================
// Submodules
// ============================================================================

mod assembler;
mod base_url;
mod path;
mod pattern;
mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use assembler::{SCHEME, UrlAssembler};
pub use base_url::BaseUrlInfo;
pub use path::{Constraints, MatchResult, PathMatcher};
pub use pattern::{DomainMatch, HostMatch, UrlPattern};
pub use request::{Cookie, RequestData};
