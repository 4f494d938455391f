//! Error types for page navigation.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use pom_navigator::{Result, Error};
//!
//! async fn example(navigator: &mut Navigator) -> Result<()> {
//!     navigator.to_page::<LoginPage>().await?;
//!     navigator.refresh().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidPattern`], [`Error::DuplicatePage`], [`Error::RoutingConflict`], [`Error::ContextSourceMissing`] |
//! | Navigation | [`Error::NavigationMismatch`], [`Error::Unresolved`], [`Error::NoActivePage`], [`Error::ServiceNotFound`] |
//! | External | [`Error::InvalidUrl`], [`Error::Driver`] |
//!
//! Matchers never produce errors: a URL that matches nothing is a normal
//! outcome and is reported as `None` or an unmatched result.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when a builder is given invalid or incomplete settings.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Domain pattern failed to compile.
    #[error("Invalid URL pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Same page kind registered twice on one router.
    #[error("Page already registered: {page}")]
    DuplicatePage {
        /// Name of the page kind.
        page: &'static str,
    },

    /// Two services only reached a base-domain match for the same URL.
    ///
    /// Routing is ambiguous and must be fixed in the service setup.
    #[error("Routing conflict for {url}: both {first} and {second} match its base domain")]
    RoutingConflict {
        /// The URL being routed.
        url: String,
        /// Base URL of the first matching service.
        first: String,
        /// Base URL of the second matching service.
        second: String,
    },

    /// Context pool used before a context source was configured.
    #[error("Configuration error: no context source configured for the context pool")]
    ContextSourceMissing,

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// Navigation landed on a different page than requested.
    #[error("Navigation mismatch: expected {expected}, landed on {actual} at {url}")]
    NavigationMismatch {
        /// Requested page kind.
        expected: &'static str,
        /// Page kind actually resolved.
        actual: &'static str,
        /// URL the browser ended on.
        url: String,
    },

    /// Navigation landed on a URL no registered page matches.
    #[error("No registered page matches {url}")]
    Unresolved {
        /// URL the browser ended on.
        url: String,
    },

    /// Refresh or back requested before any navigation.
    #[error("No active browser page")]
    NoActivePage,

    /// No registered service owns the page or URL.
    #[error("No service found for {target}")]
    ServiceNotFound {
        /// Page kind name or URL that was looked up.
        target: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// URL parse error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Error reported by the browser driver.
    #[error("Driver error: {message}")]
    Driver {
        /// Description of the driver failure.
        message: String,
    },
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a duplicate page error.
    #[inline]
    pub fn duplicate_page(page: &'static str) -> Self {
        Self::DuplicatePage { page }
    }

    /// Creates a routing conflict error.
    #[inline]
    pub fn routing_conflict(
        url: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::RoutingConflict {
            url: url.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Creates a navigation mismatch error.
    #[inline]
    pub fn navigation_mismatch(
        expected: &'static str,
        actual: &'static str,
        url: impl Into<String>,
    ) -> Self {
        Self::NavigationMismatch {
            expected,
            actual,
            url: url.into(),
        }
    }

    /// Creates an unresolved navigation error.
    #[inline]
    pub fn unresolved(url: impl Into<String>) -> Self {
        Self::Unresolved { url: url.into() }
    }

    /// Creates a service not found error.
    #[inline]
    pub fn service_not_found(target: impl Into<String>) -> Self {
        Self::ServiceNotFound {
            target: target.into(),
        }
    }

    /// Creates a driver error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a setup error.
    ///
    /// Setup errors are fatal and point at the service or session wiring.
    #[inline]
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::InvalidPattern(_)
                | Self::DuplicatePage { .. }
                | Self::RoutingConflict { .. }
                | Self::ContextSourceMissing
        )
    }

    /// Returns `true` if this is a navigation outcome error.
    #[inline]
    #[must_use]
    pub fn is_navigation_error(&self) -> bool {
        matches!(
            self,
            Self::NavigationMismatch { .. }
                | Self::Unresolved { .. }
                | Self::NoActivePage
                | Self::ServiceNotFound { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
