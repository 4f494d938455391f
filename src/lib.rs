//! Page-object navigation engine.
//!
//! This library resolves, in both directions, the relationship between a URL
//! and a typed page belonging to one of several registered services, and
//! manages one browser context per service per test session.
//!
//! # Architecture
//!
//! - **Forward**: URL → service (domain pattern, precedence) → page (path
//!   template, constraints) with extracted data and params
//! - **Reverse**: page instance → template + data → absolute URL
//! - **Contexts**: one lazily created browser context per service, shared by
//!   every caller in the session
//!
//! Key design principles:
//!
//! - Matchers never fail: no match is a normal, result-based outcome
//! - Only setup mistakes (duplicate pages, ambiguous routing, missing context
//!   source) and navigation mismatches surface as errors
//! - Sessions share nothing but the immutable [`SessionProvider`]
//!
//! # Quick Start
//!
//! ```ignore
//! use pom_navigator::{Service, SessionProvider, Result};
//!
//! async fn run(source: Arc<dyn ContextSource>) -> Result<()> {
//!     let provider = SessionProvider::builder()
//!         .service(|| {
//!             Service::builder("https://shop.example.com")
//!                 .sub_domain("shop")
//!                 .page::<CartPage>()
//!                 .page::<ProductPage>()
//!                 .build()
//!         })
//!         .build()?;
//!
//!     let session = provider.create_test_session(source)?;
//!     let mut navigator = session.navigator();
//!
//!     navigator.to_page::<CartPage>().await?;
//!     navigator.to_url("https://shop.example.com/products/42").await?;
//!     assert!(navigator.page_is::<ProductPage>());
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`route`] | Domain patterns, path matching, URL assembly |
//! | [`page`] | Page trait and descriptors |
//! | [`service`] | Services, routers, directory |
//! | [`context`] | Browser driver seams and the context pool |
//! | [`navigation`] | Navigation state and actions |
//! | [`session`] | Session provider and test sessions |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |

// ============================================================================
// Modules
// ============================================================================

/// Browser contexts: driver traits and the per-session pool.
pub mod context;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for services and sessions.
pub mod identifiers;

/// Navigation state and the navigator.
pub mod navigation;

/// Page trait and descriptors.
pub mod page;

/// URL classification, matching and assembly.
pub mod route;

/// Services, page routers and the service directory.
pub mod service;

/// Session provider and test sessions.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

// Context types
pub use context::{BrowserContext, BrowserPage, ContextPool, ContextSource};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ServiceId, SessionId};

// Navigation types
pub use navigation::{NavigationState, Navigator};

// Page types
pub use page::{Page, PageData, PageDescriptor, PageKind, PageState};

// Routing types
pub use route::{
    BaseUrlInfo, Constraints, Cookie, DomainMatch, HostMatch, MatchResult, PathMatcher,
    RequestData, UrlAssembler, UrlPattern,
};

// Service types
pub use service::{PageFactory, Router, Service, ServiceBuilder, ServiceDirectory};

// Session types
pub use session::{ServiceFactory, SessionProvider, SessionProviderBuilder, TestSession};
