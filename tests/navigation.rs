//! Navigation integration tests against the in-memory browser.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::Result;
use pom_navigator::{BrowserContext, Cookie, Error, Page, RequestData};

use common::{
    AdminDashboard, BrokenSource, ClosedTickets, FakeSource, FlakyPage, HomePage, LoginPage,
    OpenTickets, OrderPage, ReportPage, UserPage, init_logging, provider,
};

// ============================================================================
// Page Navigation
// ============================================================================

#[tokio::test]
async fn test_to_page_resolves_default_instance() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    let home = navigator.to_page::<HomePage>().await?;
    assert_eq!(home.descriptor().template(), "/");

    assert!(navigator.page_is::<HomePage>());
    assert_eq!(navigator.state().url(), Some("https://example.com/"));
    Ok(())
}

#[tokio::test]
async fn test_to_page_instance_round_trips_data_and_params() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    let mut target = OrderPage::default();
    target.descriptor_mut().set_data("id", "7");
    target.descriptor_mut().set_data("oid", "42");
    target.descriptor_mut().set_param("tab", "items");

    let order = navigator.to_page_instance(target).await?;
    let state = order.descriptor().state();
    assert_eq!(state.data.get("id").map(String::as_str), Some("7"));
    assert_eq!(state.data.get("oid").map(String::as_str), Some("42"));
    assert_eq!(state.params.get("tab").map(String::as_str), Some("items"));

    assert_eq!(
        navigator.state().url(),
        Some("https://example.com/users/7/orders/42?tab=items")
    );
    Ok(())
}

#[tokio::test]
async fn test_to_page_instance_keeps_unencoded_values() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    let mut target = UserPage::default();
    target.descriptor_mut().set_data("id", "a b");
    target.descriptor_mut().set_param("q", "x y{1}");

    let user = navigator.to_page_instance(target).await?;
    let state = user.descriptor().state();
    assert_eq!(state.data.get("id").map(String::as_str), Some("a b"));
    assert_eq!(state.params.get("q").map(String::as_str), Some("x y{1}"));
    Ok(())
}

#[tokio::test]
async fn test_fixed_data_selects_between_shared_templates() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    navigator.to_page::<ClosedTickets>().await?;
    assert!(navigator.page_is::<ClosedTickets>());
    assert!(!navigator.page_is::<OpenTickets>());

    navigator.to_page::<OpenTickets>().await?;
    assert!(navigator.page_is::<OpenTickets>());
    Ok(())
}

#[tokio::test]
async fn test_resolved_page_is_activated_and_loaded() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    let mut target = ReportPage::default();
    target.descriptor_mut().set_data("year", "2024");
    assert!(!target.activated);

    let report = navigator.to_page_instance(target).await?;
    assert!(report.activated);
    assert!(report.loaded.load(Ordering::SeqCst));
    Ok(())
}

#[tokio::test]
async fn test_redirect_reports_navigation_mismatch() -> Result<()> {
    init_logging();
    let source = FakeSource::with_redirects(&[(
        "https://example.com/users/1",
        "https://example.com/login",
    )]);
    let session = provider().create_test_session(source)?;
    let mut navigator = session.navigator();

    let mut target = UserPage::default();
    target.descriptor_mut().set_data("id", "1");

    let err = navigator.to_page_instance(target).await.unwrap_err();
    assert!(err.is_navigation_error());
    assert!(matches!(err, Error::NavigationMismatch { .. }));

    // The state still follows the browser.
    assert!(navigator.page_is::<LoginPage>());
    Ok(())
}

#[tokio::test]
async fn test_redirect_to_unknown_url_reports_unresolved() -> Result<()> {
    init_logging();
    let source = FakeSource::with_redirects(&[("https://example.com/login", "https://elsewhere.org/")]);
    let session = provider().create_test_session(source)?;
    let mut navigator = session.navigator();

    let err = navigator.to_page::<LoginPage>().await.unwrap_err();
    assert!(matches!(err, Error::Unresolved { .. }));
    assert!(navigator.current_page().is_none());
    assert_eq!(navigator.state().url(), Some("https://elsewhere.org/"));
    Ok(())
}

#[tokio::test]
async fn test_failed_load_wait_still_updates_state() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    navigator.to_page::<HomePage>().await?;
    let err = navigator.to_page::<FlakyPage>().await.unwrap_err();
    assert!(matches!(err, Error::Driver { .. }));

    assert_eq!(navigator.state().url(), Some("https://example.com/flaky"));
    assert!(navigator.page_is::<FlakyPage>());
    assert!(!navigator.page_is::<HomePage>());
    Ok(())
}

#[tokio::test]
async fn test_routing_conflict_after_redirect_unresolves_state() -> Result<()> {
    init_logging();
    let provider = pom_navigator::SessionProvider::builder()
        .service(common::main_service)
        .service(common::mirror_service)
        .build()?;
    let source = FakeSource::with_redirects(&[(
        "https://example.com/",
        "https://www.example.com/mirror/",
    )]);
    let session = provider.create_test_session(source)?;
    let mut navigator = session.navigator();

    navigator.to_page::<LoginPage>().await?;
    let err = navigator.to_url("https://example.com/").await.unwrap_err();
    assert!(matches!(err, Error::RoutingConflict { .. }));

    assert_eq!(navigator.state().url(), Some("https://www.example.com/mirror/"));
    assert!(navigator.current_page().is_none());
    Ok(())
}

#[tokio::test]
async fn test_unregistered_page_is_service_not_found() -> Result<()> {
    init_logging();
    let provider = pom_navigator::SessionProvider::builder()
        .service(common::admin_service)
        .build()?;
    let session = provider.create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    let err = navigator.to_page::<HomePage>().await.unwrap_err();
    assert!(matches!(err, Error::ServiceNotFound { .. }));
    assert!(navigator.browser_page().is_none());
    Ok(())
}

// ============================================================================
// URL Navigation
// ============================================================================

#[tokio::test]
async fn test_to_url_resolves_page() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    let state = navigator.to_url("https://example.com/users/9?ref=mail").await?;
    assert!(state.is_resolved());

    let user = navigator.page_as::<UserPage>().expect("user page");
    let state = user.descriptor().state();
    assert_eq!(state.data.get("id").map(String::as_str), Some("9"));
    assert_eq!(state.params.get("ref").map(String::as_str), Some("mail"));
    Ok(())
}

#[tokio::test]
async fn test_to_url_unknown_path_leaves_state_unresolved() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    let state = navigator.to_url("https://example.com/nowhere/at/all").await?;
    assert!(!state.is_resolved());
    assert!(navigator.current_page().is_none());
    assert!(!navigator.page_is::<HomePage>());
    Ok(())
}

#[tokio::test]
async fn test_to_url_full_domain_service_wins() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    navigator.to_url("https://admin.example.com/console/dashboard").await?;
    assert!(navigator.page_is::<AdminDashboard>());
    Ok(())
}

#[tokio::test]
async fn test_to_url_foreign_host_without_tab_fails() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    let err = navigator.to_url("https://elsewhere.org/").await.unwrap_err();
    assert!(matches!(err, Error::ServiceNotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn test_to_url_foreign_host_reuses_current_tab() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    navigator.to_page::<HomePage>().await?;
    let tab = Arc::clone(navigator.browser_page().expect("tab"));

    let state = navigator.to_url("https://elsewhere.org/").await?;
    assert!(!state.is_resolved());
    assert!(Arc::ptr_eq(navigator.browser_page().expect("tab"), &tab));
    Ok(())
}

#[tokio::test]
async fn test_to_request_installs_cookies() -> Result<()> {
    init_logging();
    let source = FakeSource::new();
    let session = provider().create_test_session(source.clone())?;
    let mut navigator = session.navigator();

    let request = RequestData::parse("https://example.com/login")?
        .with_cookies([Cookie::new("sid", "abc").with_domain("example.com")]);
    navigator.to_request(request).await?;

    let contexts = source.contexts();
    assert_eq!(contexts.len(), 1);
    let cookies = contexts[0].cookies();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "sid");
    assert_eq!(cookies[0].value, "abc");
    Ok(())
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_refresh_and_back_before_navigation_fail() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    assert!(matches!(navigator.refresh().await, Err(Error::NoActivePage)));
    assert!(matches!(navigator.back().await, Err(Error::NoActivePage)));
    Ok(())
}

#[tokio::test]
async fn test_back_actualizes_previous_page() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(FakeSource::new())?;
    let mut navigator = session.navigator();

    navigator.to_page::<HomePage>().await?;
    navigator.to_page::<LoginPage>().await?;
    assert!(navigator.page_is::<LoginPage>());

    let state = navigator.back().await?;
    assert!(state.page_is::<HomePage>());
    Ok(())
}

#[tokio::test]
async fn test_refresh_keeps_page() -> Result<()> {
    init_logging();
    let source = FakeSource::new();
    let session = provider().create_test_session(source.clone())?;
    let mut navigator = session.navigator();

    navigator.to_page::<LoginPage>().await?;
    let state = navigator.refresh().await?;
    assert!(state.page_is::<LoginPage>());
    Ok(())
}

// ============================================================================
// Contexts
// ============================================================================

#[tokio::test]
async fn test_one_context_per_service() -> Result<()> {
    init_logging();
    let source = FakeSource::new();
    let session = provider().create_test_session(source.clone())?;
    let mut navigator = session.navigator();

    navigator.to_page::<HomePage>().await?;
    navigator.to_page::<LoginPage>().await?;
    assert_eq!(source.created(), 1);

    navigator.to_page::<AdminDashboard>().await?;
    assert_eq!(source.created(), 2);

    navigator.to_page::<HomePage>().await?;
    assert_eq!(source.created(), 2);
    assert_eq!(session.pool().context_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_tab_is_reused_within_service() -> Result<()> {
    init_logging();
    let source = FakeSource::new();
    let session = provider().create_test_session(source.clone())?;
    let mut navigator = session.navigator();

    navigator.to_page::<HomePage>().await?;
    let first = Arc::clone(navigator.browser_page().expect("tab"));
    navigator.to_page::<LoginPage>().await?;
    assert!(Arc::ptr_eq(navigator.browser_page().expect("tab"), &first));

    let contexts = source.contexts();
    assert_eq!(contexts[0].pages().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_context_failure_surfaces_driver_error() -> Result<()> {
    init_logging();
    let session = provider().create_test_session(Arc::new(BrokenSource))?;
    let mut navigator = session.navigator();

    let err = navigator.to_page::<HomePage>().await.unwrap_err();
    assert!(matches!(err, Error::Driver { .. }));
    assert_eq!(session.pool().context_count(), 0);
    Ok(())
}
