//! Page descriptors.
//!
//! A page type describes one reachable location within a service: a path
//! template, optional fixed constraints, and the values an instance carries.
//!
//! # Example
//!
//! ```ignore
//! use pom_navigator::{Page, PageDescriptor};
//!
//! #[derive(Debug)]
//! struct UserPage {
//!     descriptor: PageDescriptor,
//! }
//!
//! impl Default for UserPage {
//!     fn default() -> Self {
//!         Self { descriptor: PageDescriptor::new("/users/{id}") }
//!     }
//! }
//!
//! impl Page for UserPage {
//!     fn descriptor(&self) -> &PageDescriptor { &self.descriptor }
//!     fn descriptor_mut(&mut self) -> &mut PageDescriptor { &mut self.descriptor }
//! }
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod descriptor;
mod kind;

// ============================================================================
// Imports
// ============================================================================

use std::any::Any;
use std::fmt;

use async_trait::async_trait;

use crate::context::BrowserPage;
use crate::error::Result;

// ============================================================================
// Re-exports
// ============================================================================

pub use descriptor::{PageData, PageDescriptor, PageState};
pub use kind::PageKind;

// ============================================================================
// Page
// ============================================================================

/// A typed page of a service.
///
/// Implementors are registered on a service's router by type. The router
/// keeps one default-constructed instance as the matching template and
/// builds a fresh instance for every resolved navigation.
#[async_trait]
pub trait Page: Any + Send + Sync + fmt::Debug {
    /// Returns the routing descriptor.
    fn descriptor(&self) -> &PageDescriptor;

    /// Returns the routing descriptor for editing.
    fn descriptor_mut(&mut self) -> &mut PageDescriptor;

    /// Returns the page kind of the concrete type.
    fn kind(&self) -> PageKind {
        PageKind::of::<Self>()
    }

    /// Called once after the router resolved this instance.
    fn activate(&mut self) {}

    /// Waits until the browser finished loading this page.
    ///
    /// Runs after every navigation that resolves to this page, before
    /// control returns to the caller.
    async fn wait_until_loaded(&self, _browser_page: &dyn BrowserPage) -> Result<()> {
        Ok(())
    }
}

impl dyn Page {
    /// Returns `true` if the concrete type is `T`.
    #[inline]
    #[must_use]
    pub fn is<T: Page>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Downcasts to the concrete type.
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Page>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

// ============================================================================
// Tests
// ============================================================================
