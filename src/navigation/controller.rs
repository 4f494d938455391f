//! Navigation actions over the browser driver.
//!
//! Every action (page goto, URL goto, refresh, back) ends by actualizing:
//! the browser's resulting URL is resolved again through the session's
//! services, and the [`NavigationState`] follows it.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::{BrowserPage, ContextPool};
use crate::error::{Error, Result};
use crate::page::{Page, PageKind};
use crate::route::RequestData;
use crate::service::{Service, ServiceDirectory};

use super::state::NavigationState;

// ============================================================================
// Navigator
// ============================================================================

/// Drives navigation for one test session.
///
/// Actions take `&mut self`: one session never runs two navigations at once.
///
/// # Example
///
/// ```ignore
/// let mut navigator = session.navigator();
///
/// let user = navigator.to_page::<UserPage>().await?;
/// navigator.to_url("https://example.com/users/7").await?;
/// assert!(navigator.page_is::<UserPage>());
/// ```
pub struct Navigator {
    /// Services of the session.
    directory: Arc<ServiceDirectory>,
    /// Contexts of the session.
    pool: Arc<ContextPool>,
    /// Tab of the last navigation.
    browser_page: Option<Arc<dyn BrowserPage>>,
    /// Page resolved from the tab's URL.
    state: NavigationState,
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("services", &self.directory.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Navigator - Constructor
// ============================================================================

impl Navigator {
    /// Creates a navigator over a session's services and contexts.
    #[must_use]
    pub fn new(directory: Arc<ServiceDirectory>, pool: Arc<ContextPool>) -> Self {
        Self {
            directory,
            pool,
            browser_page: None,
            state: NavigationState::new(),
        }
    }
}

// ============================================================================
// Navigator - Accessors
// ============================================================================

impl Navigator {
    /// Returns the navigation state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Returns the current page, if resolved.
    #[inline]
    #[must_use]
    pub fn current_page(&self) -> Option<&(dyn Page + 'static)> {
        self.state.page()
    }

    /// Returns the current page as `T`.
    #[inline]
    #[must_use]
    pub fn page_as<T: Page>(&self) -> Option<&T> {
        self.state.page_as::<T>()
    }

    /// Returns `true` if the current page is a `T`.
    #[inline]
    #[must_use]
    pub fn page_is<T: Page>(&self) -> bool {
        self.state.page_is::<T>()
    }

    /// Returns the browser tab of the last navigation.
    #[inline]
    #[must_use]
    pub fn browser_page(&self) -> Option<&Arc<dyn BrowserPage>> {
        self.browser_page.as_ref()
    }
}

// ============================================================================
// Navigator - Navigation
// ============================================================================

impl Navigator {
    /// Navigates to a default instance of page type `T`.
    ///
    /// # Errors
    ///
    /// - [`Error::ServiceNotFound`] if no service registers `T`
    /// - [`Error::NavigationMismatch`] if the browser landed on another page
    /// - [`Error::Unresolved`] if the browser landed on an unknown URL
    pub async fn to_page<T: Page + Default>(&mut self) -> Result<&T> {
        self.to_page_instance(T::default()).await
    }

    /// Navigates to a page instance, using its data and params for the URL.
    ///
    /// # Errors
    ///
    /// Same as [`Self::to_page`].
    pub async fn to_page_instance<T: Page>(&mut self, page: T) -> Result<&T> {
        let service = self
            .directory
            .service_for(&page)
            .ok_or_else(|| Error::service_not_found(page.kind().name()))?;
        let request = service.request_data(&page);

        debug!(page = %page.kind(), url = %request, service = %service.name(), "Navigating to page");

        let browser_page = self.browser_page_for(&service).await?;
        self.navigate(browser_page, &request).await?;
        self.expect_page::<T>()
    }

    /// Navigates to a literal URL.
    ///
    /// # Errors
    ///
    /// - [`Error::ServiceNotFound`] if no service matches and no tab is open yet
    /// - [`Error::RoutingConflict`] if the URL is ambiguous
    pub async fn to_url(&mut self, url: &str) -> Result<&NavigationState> {
        self.to_request(RequestData::new(url)).await
    }

    /// Navigates to a URL with cookies.
    ///
    /// The target page is not resolved up front; the state follows whatever
    /// the browser ends on.
    ///
    /// # Errors
    ///
    /// Same as [`Self::to_url`].
    pub async fn to_request(&mut self, request: RequestData) -> Result<&NavigationState> {
        debug!(url = %request, "Navigating to URL");

        let browser_page = match self.directory.match_service(&request)? {
            Some(service) => self.browser_page_for(&service).await?,
            None => self
                .browser_page
                .clone()
                .ok_or_else(|| Error::service_not_found(request.url()))?,
        };

        self.navigate(browser_page, &request).await?;
        Ok(&self.state)
    }

    /// Reloads the current tab.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActivePage`] before the first navigation.
    pub async fn refresh(&mut self) -> Result<&NavigationState> {
        let browser_page = self.active_browser_page()?;
        debug!("Refreshing page");
        browser_page.reload().await?;
        self.actualize(&browser_page).await?;
        Ok(&self.state)
    }

    /// Navigates back in history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActivePage`] before the first navigation.
    pub async fn back(&mut self) -> Result<&NavigationState> {
        let browser_page = self.active_browser_page()?;
        debug!("Navigating back");
        browser_page.back().await?;
        self.actualize(&browser_page).await?;
        Ok(&self.state)
    }
}

// ============================================================================
// Navigator - Internal
// ============================================================================

impl Navigator {
    /// Returns the tab to use for `service`.
    ///
    /// Keeps the current tab when it already belongs to the service's
    /// context; otherwise takes the context's first tab or opens one.
    async fn browser_page_for(&self, service: &Service) -> Result<Arc<dyn BrowserPage>> {
        let context = self.pool.get_context(service).await?;

        if let Some(current) = &self.browser_page
            && current
                .context()
                .is_some_and(|owner| Arc::ptr_eq(&owner, &context))
        {
            return Ok(Arc::clone(current));
        }

        match context.pages().into_iter().next() {
            Some(page) => Ok(page),
            None => context.new_page().await,
        }
    }

    /// Installs cookies, navigates and actualizes.
    async fn navigate(
        &mut self,
        browser_page: Arc<dyn BrowserPage>,
        request: &RequestData,
    ) -> Result<()> {
        if !request.cookies().is_empty()
            && let Some(context) = browser_page.context()
        {
            context.add_cookies(request.cookies()).await?;
        }

        browser_page.goto(request.url()).await?;
        self.browser_page = Some(Arc::clone(&browser_page));
        self.actualize(&browser_page).await
    }

    /// Re-resolves the state from the tab's current URL.
    ///
    /// The state is committed before any error is returned, so it always
    /// describes the URL the tab is on.
    async fn actualize(&mut self, browser_page: &Arc<dyn BrowserPage>) -> Result<()> {
        let url = browser_page.url().await?;

        match self.directory.resolve(&RequestData::new(url.as_str())) {
            Ok(Some(page)) => {
                debug!(url = %url, page = %page.kind(), "Navigation resolved");
                self.state.resolve(url, page);
            }
            Ok(None) => {
                debug!(url = %url, "Navigation unresolved");
                self.state.unresolve(url);
            }
            Err(e) => {
                self.state.unresolve(url);
                return Err(e);
            }
        }

        if let Some(page) = self.state.page() {
            page.wait_until_loaded(browser_page.as_ref()).await?;
        }

        Ok(())
    }

    /// Returns the tab of the last navigation.
    fn active_browser_page(&self) -> Result<Arc<dyn BrowserPage>> {
        self.browser_page.clone().ok_or(Error::NoActivePage)
    }

    /// Requires the resolved page to be a `T`.
    fn expect_page<T: Page>(&self) -> Result<&T> {
        let url = self.state.url().unwrap_or_default();
        let Some(page) = self.state.page() else {
            warn!(url = %url, expected = %PageKind::of::<T>(), "Navigation ended on an unknown page");
            return Err(Error::unresolved(url));
        };

        page.downcast_ref::<T>().ok_or_else(|| {
            let expected = PageKind::of::<T>();
            warn!(url = %url, expected = %expected, actual = %page.kind(), "Navigation mismatch");
            Error::navigation_mismatch(expected.name(), page.kind().name(), url)
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
