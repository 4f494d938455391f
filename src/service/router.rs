//! Per-service page registry: URL to page and page to URL.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::page::{Page, PageKind};
use crate::route::{BaseUrlInfo, PathMatcher, RequestData, UrlAssembler};

// ============================================================================
// PageFactory
// ============================================================================

/// Zero-argument constructor for one page type.
#[derive(Clone, Copy)]
pub struct PageFactory {
    kind: PageKind,
    build: fn() -> Box<dyn Page>,
}

impl PageFactory {
    /// Returns the factory for `P`.
    #[must_use]
    pub fn of<P: Page + Default>() -> Self {
        Self {
            kind: PageKind::of::<P>(),
            build: build_page::<P>,
        }
    }

    /// Returns the page kind this factory builds.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> PageKind {
        self.kind
    }

    /// Builds a fresh, unpopulated instance.
    #[inline]
    #[must_use]
    pub fn build(&self) -> Box<dyn Page> {
        (self.build)()
    }
}

fn build_page<P: Page + Default>() -> Box<dyn Page> {
    Box::new(P::default())
}

impl fmt::Debug for PageFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PageFactory").field(&self.kind).finish()
    }
}

// ============================================================================
// Router
// ============================================================================

/// Registered page.
struct Route {
    factory: PageFactory,
    /// Instance used only for matching.
    template: Box<dyn Page>,
}

/// Ordered registry of a service's pages.
///
/// Templates are tried in registration order; the first match wins even
/// when a later template would also match.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|route| route.factory.kind))
            .finish()
    }
}

// ============================================================================
// Router - Registration
// ============================================================================

impl Router {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers page type `P`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePage`] if `P` is already registered.
    pub fn register<P: Page + Default>(&mut self) -> Result<()> {
        self.register_factory(PageFactory::of::<P>())
    }

    /// Registers one page factory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePage`] if its kind is already registered.
    pub fn register_factory(&mut self, factory: PageFactory) -> Result<()> {
        let kind = factory.kind();
        if self.contains(kind) {
            return Err(Error::duplicate_page(kind.name()));
        }

        trace!(page = %kind, "Page registered");
        self.routes.push(Route {
            factory,
            template: factory.build(),
        });
        Ok(())
    }

    /// Registers a list of page factories, each exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePage`] on the first repeated kind.
    pub fn register_all(&mut self, factories: impl IntoIterator<Item = PageFactory>) -> Result<()> {
        factories
            .into_iter()
            .try_for_each(|factory| self.register_factory(factory))
    }

    /// Returns `true` if `kind` is registered.
    #[must_use]
    pub fn contains(&self, kind: PageKind) -> bool {
        self.routes.iter().any(|route| route.factory.kind == kind)
    }

    /// Returns the registered kinds in registration order.
    #[must_use]
    pub fn kinds(&self) -> Vec<PageKind> {
        self.routes.iter().map(|route| route.factory.kind).collect()
    }

    /// Returns the number of registered pages.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no page is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// ============================================================================
// Router - Resolution
// ============================================================================

impl Router {
    /// Resolves a request to a fresh page instance.
    ///
    /// The site prefix in `base_url` is stripped from the request path before
    /// matching. Returns `None` when no template matches or the URL does not
    /// parse.
    #[must_use]
    pub fn resolve(&self, request: &RequestData, base_url: &BaseUrlInfo) -> Option<Box<dyn Page>> {
        if let Err(e) = request.parsed() {
            debug!(url = %request, error = %e, "Unparseable URL, not resolving");
            return None;
        }

        let path = strip_site_prefix(request.path(), &base_url.absolute_path)?;
        let query = request.query();

        self.routes.iter().find_map(|route| {
            let descriptor = route.template.descriptor();
            let matched = PathMatcher::match_path(
                descriptor.template(),
                path,
                query,
                &descriptor.constraints(),
            )?;

            debug!(url = %request, page = %route.factory.kind, "Page resolved");
            let mut page = route.factory.build();
            page.descriptor_mut()
                .populate(base_url.clone(), matched.with_cookies(request.cookies()));
            page.activate();
            Some(page)
        })
    }

    /// Assembles the request reaching a populated page instance.
    ///
    /// # Arguments
    ///
    /// * `page` - Page instance carrying its data and params
    /// * `default` - Base URL info of the owning service
    #[must_use]
    pub fn request_data(&self, page: &dyn Page, default: &BaseUrlInfo) -> RequestData {
        let descriptor = page.descriptor();
        let state = descriptor.state();
        let actual = state.base_url.clone().unwrap_or_default();

        let url = UrlAssembler::assemble(
            descriptor.template(),
            &descriptor.effective_data(),
            &descriptor.effective_params(),
            &actual,
            default,
        );

        RequestData::new(url).with_cookies(state.cookies.iter().cloned())
    }
}

/// Removes the site prefix from a path, keeping a leading `/`.
fn strip_site_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return Some(path);
    }

    let head = path.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }

    let rest = &path[prefix.len()..];
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
