//! Current navigation state: the page the browser is on, if any.

use std::fmt;

use crate::page::{Page, PageKind};

// ============================================================================
// NavigationState
// ============================================================================

/// The page resolved from the browser's current URL.
///
/// Unresolved when nothing has been navigated yet, or when the last URL
/// matched no registered page. Unresolved is a normal outcome.
#[derive(Default)]
pub struct NavigationState {
    url: Option<String>,
    page: Option<Box<dyn Page>>,
}

impl fmt::Debug for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationState")
            .field("url", &self.url)
            .field("page", &self.page_kind())
            .finish()
    }
}

impl NavigationState {
    /// Creates an unresolved state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current page.
    #[inline]
    #[must_use]
    pub fn page(&self) -> Option<&(dyn Page + 'static)> {
        self.page.as_deref()
    }

    /// Returns the current page as `T`.
    #[must_use]
    pub fn page_as<T: Page>(&self) -> Option<&T> {
        self.page().and_then(|page| page.downcast_ref::<T>())
    }

    /// Returns `true` if the current page is a `T`.
    #[must_use]
    pub fn page_is<T: Page>(&self) -> bool {
        self.page().is_some_and(|page| page.is::<T>())
    }

    /// Returns `true` if a page is resolved.
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.page.is_some()
    }

    /// Returns the kind of the current page.
    #[must_use]
    pub fn page_kind(&self) -> Option<PageKind> {
        self.page().map(|page| page.kind())
    }

    /// Returns the URL last actualized, resolved or not.
    #[inline]
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Moves to a resolved page.
    pub(crate) fn resolve(&mut self, url: String, page: Box<dyn Page>) {
        self.url = Some(url);
        self.page = Some(page);
    }

    /// Moves to the unresolved state.
    pub(crate) fn unresolve(&mut self, url: String) {
        self.url = Some(url);
        self.page = None;
    }
}

// ============================================================================
// Tests
// ============================================================================
