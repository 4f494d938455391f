//! Shared fixtures for integration tests.
//!
//! Provides:
//! - An in-memory browser (context, tabs, history, redirects)
//! - A counting context source
//! - Sample pages and services
//! - Logging initialization

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Once, Weak};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use pom_navigator::{
    BrowserContext, BrowserPage, ContextSource, Cookie, Error, Page, PageDescriptor, Result,
    Service, SessionProvider,
};

// ============================================================================
// Logging
// ============================================================================

static INIT: Once = Once::new();

/// Initialize tracing once per test binary.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("pom_navigator=debug")),
            )
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Fake Browser
// ============================================================================

/// URL rewrites applied by the fake server, e.g. login redirects.
pub type Redirects = Arc<HashMap<String, String>>;

/// A tab with linear history.
#[derive(Debug)]
pub struct FakePage {
    context: Weak<FakeContext>,
    redirects: Redirects,
    history: Mutex<Vec<String>>,
    reloads: AtomicUsize,
}

impl FakePage {
    fn new(context: Weak<FakeContext>, redirects: Redirects) -> Self {
        Self {
            context,
            redirects,
            history: Mutex::new(vec!["about:blank".to_string()]),
            reloads: AtomicUsize::new(0),
        }
    }

    /// Returns the number of reloads.
    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserPage for FakePage {
    async fn url(&self) -> Result<String> {
        Ok(self.history.lock().last().cloned().unwrap_or_default())
    }

    async fn goto(&self, url: &str) -> Result<()> {
        let landed = self.redirects.get(url).cloned().unwrap_or_else(|| url.to_string());
        self.history.lock().push(landed);
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn back(&self) -> Result<()> {
        let mut history = self.history.lock();
        if history.len() > 1 {
            history.pop();
        }
        Ok(())
    }

    fn context(&self) -> Option<Arc<dyn BrowserContext>> {
        self.context
            .upgrade()
            .map(|context| context as Arc<dyn BrowserContext>)
    }
}

/// An isolated browser context.
#[derive(Debug)]
pub struct FakeContext {
    me: Weak<FakeContext>,
    redirects: Redirects,
    pages: Mutex<Vec<Arc<FakePage>>>,
    cookies: Mutex<Vec<Cookie>>,
}

impl FakeContext {
    pub fn new(redirects: Redirects) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            redirects,
            pages: Mutex::new(Vec::new()),
            cookies: Mutex::new(Vec::new()),
        })
    }

    /// Returns the installed cookies.
    pub fn cookies(&self) -> Vec<Cookie> {
        self.cookies.lock().clone()
    }
}

#[async_trait]
impl BrowserContext for FakeContext {
    fn pages(&self) -> Vec<Arc<dyn BrowserPage>> {
        self.pages
            .lock()
            .iter()
            .map(|page| Arc::clone(page) as Arc<dyn BrowserPage>)
            .collect()
    }

    async fn new_page(&self) -> Result<Arc<dyn BrowserPage>> {
        let page = Arc::new(FakePage::new(self.me.clone(), Arc::clone(&self.redirects)));
        self.pages.lock().push(Arc::clone(&page));
        Ok(page)
    }

    async fn add_cookies(&self, cookies: &[Cookie]) -> Result<()> {
        self.cookies.lock().extend_from_slice(cookies);
        Ok(())
    }
}

/// Context source that counts creations and remembers what it made.
#[derive(Debug, Default)]
pub struct FakeSource {
    redirects: Redirects,
    delay: Duration,
    created: AtomicUsize,
    contexts: Mutex<Vec<Arc<FakeContext>>>,
}

impl FakeSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_redirects(redirects: &[(&str, &str)]) -> Arc<Self> {
        let redirects = redirects
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Arc::new(Self {
            redirects: Arc::new(redirects),
            ..Self::default()
        })
    }

    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            ..Self::default()
        })
    }

    /// Returns the number of contexts created.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Returns the contexts created, in order.
    pub fn contexts(&self) -> Vec<Arc<FakeContext>> {
        self.contexts.lock().clone()
    }
}

#[async_trait]
impl ContextSource for FakeSource {
    async fn create_context(&self, _service: &Service) -> Result<Arc<dyn BrowserContext>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let context = FakeContext::new(Arc::clone(&self.redirects));
        self.contexts.lock().push(Arc::clone(&context));
        Ok(context)
    }
}

/// Context source that always fails.
#[derive(Debug, Default)]
pub struct BrokenSource;

#[async_trait]
impl ContextSource for BrokenSource {
    async fn create_context(&self, _service: &Service) -> Result<Arc<dyn BrowserContext>> {
        Err(Error::driver("browser crashed"))
    }
}

// ============================================================================
// Pages
// ============================================================================

macro_rules! page {
    ($name:ident, $descriptor:expr) => {
        #[derive(Debug)]
        pub struct $name {
            descriptor: PageDescriptor,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    descriptor: $descriptor,
                }
            }
        }

        impl Page for $name {
            fn descriptor(&self) -> &PageDescriptor {
                &self.descriptor
            }

            fn descriptor_mut(&mut self) -> &mut PageDescriptor {
                &mut self.descriptor
            }
        }
    };
}

page!(HomePage, PageDescriptor::new("/"));
page!(UserPage, PageDescriptor::new("/users/{id}"));
page!(OrderPage, PageDescriptor::new("/users/{id}/orders/{oid}"));
page!(LoginPage, PageDescriptor::new("/login"));
page!(OpenTickets, PageDescriptor::new("/tickets/{state}").with_data("state", "open"));
page!(ClosedTickets, PageDescriptor::new("/tickets/{state}").with_data("state", "closed"));
page!(AdminDashboard, PageDescriptor::new("/dashboard"));

/// Page that records its lifecycle hooks.
#[derive(Debug)]
pub struct ReportPage {
    descriptor: PageDescriptor,
    pub activated: bool,
    pub loaded: AtomicBool,
}

impl Default for ReportPage {
    fn default() -> Self {
        Self {
            descriptor: PageDescriptor::new("/reports/{year}"),
            activated: false,
            loaded: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Page for ReportPage {
    fn descriptor(&self) -> &PageDescriptor {
        &self.descriptor
    }

    fn descriptor_mut(&mut self) -> &mut PageDescriptor {
        &mut self.descriptor
    }

    fn activate(&mut self) {
        self.activated = true;
    }

    async fn wait_until_loaded(&self, browser_page: &dyn BrowserPage) -> Result<()> {
        let url = browser_page.url().await?;
        if url.contains("/reports/") {
            self.loaded.store(true, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Page whose load check always times out.
#[derive(Debug)]
pub struct FlakyPage {
    descriptor: PageDescriptor,
}

impl Default for FlakyPage {
    fn default() -> Self {
        Self {
            descriptor: PageDescriptor::new("/flaky"),
        }
    }
}

#[async_trait]
impl Page for FlakyPage {
    fn descriptor(&self) -> &PageDescriptor {
        &self.descriptor
    }

    fn descriptor_mut(&mut self) -> &mut PageDescriptor {
        &mut self.descriptor
    }

    async fn wait_until_loaded(&self, _browser_page: &dyn BrowserPage) -> Result<()> {
        Err(Error::driver("timeout"))
    }
}

// ============================================================================
// Services
// ============================================================================

/// Main site: `example.com`, any subdomain at base-domain confidence.
pub fn main_service() -> Result<Service> {
    Service::builder("https://example.com")
        .name("main")
        .page::<HomePage>()
        .page::<UserPage>()
        .page::<OrderPage>()
        .page::<LoginPage>()
        .page::<OpenTickets>()
        .page::<ClosedTickets>()
        .page::<ReportPage>()
        .page::<FlakyPage>()
        .build()
}

/// Mirror site under `/mirror` on the same domain, any subdomain.
///
/// Shares base-domain matches with [`main_service`] on subdomains.
pub fn mirror_service() -> Result<Service> {
    Service::builder("https://example.com/mirror")
        .name("mirror")
        .page::<HomePage>()
        .build()
}

/// Admin site: requires the `admin` subdomain, lives under `/console`.
pub fn admin_service() -> Result<Service> {
    Service::builder("https://admin.example.com/console")
        .name("admin")
        .domain("example.com")
        .sub_domain("admin")
        .page::<AdminDashboard>()
        .build()
}

/// Provider with both services.
pub fn provider() -> SessionProvider {
    SessionProvider::builder()
        .service(main_service)
        .service(admin_service)
        .build()
        .expect("provider")
}
