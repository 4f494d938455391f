//! Session isolation and concurrency tests.

mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures_util::future::join_all;
use pom_navigator::Page;

use common::{FakeSource, HomePage, UserPage, init_logging, provider};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sessions_are_isolated() -> Result<()> {
    init_logging();
    let provider = provider();

    let runs = (0..8).map(|i| {
        let provider = provider.clone();
        tokio::spawn(async move {
            let source = FakeSource::new();
            let session = provider.create_test_session(source.clone())?;
            let mut navigator = session.navigator();

            let mut target = UserPage::default();
            target.descriptor_mut().set_data("id", i.to_string());
            let user = navigator.to_page_instance(target).await?;
            let id = user.descriptor().state().data.get("id").cloned();

            anyhow::Ok((id, source.created()))
        })
    });

    for (i, joined) in join_all(runs).await.into_iter().enumerate() {
        let (id, created) = joined??;
        assert_eq!(id, Some(i.to_string()));
        assert_eq!(created, 1);
    }

    assert_eq!(provider.session_count(), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_session_creates_one_context_per_service() -> Result<()> {
    init_logging();
    let source = FakeSource::with_delay(Duration::from_millis(20));
    let session = provider().create_test_session(source.clone())?;
    let service = Arc::clone(session.service("main").expect("main service"));
    let pool = Arc::clone(session.pool());

    let lookups = (0..16).map(|_| {
        let pool = Arc::clone(&pool);
        let service = Arc::clone(&service);
        tokio::spawn(async move { pool.get_context(&service).await })
    });

    let contexts = join_all(lookups)
        .await
        .into_iter()
        .map(|joined| Ok(joined??))
        .collect::<Result<Vec<_>>>()?;

    assert!(contexts.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert_eq!(source.created(), 1);
    assert_eq!(pool.created_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_navigators_of_one_session_share_contexts() -> Result<()> {
    init_logging();
    let source = FakeSource::new();
    let session = provider().create_test_session(source.clone())?;

    let mut first = session.navigator();
    let mut second = session.navigator();
    first.to_page::<HomePage>().await?;
    second.to_page::<HomePage>().await?;

    assert_eq!(source.created(), 1);
    Ok(())
}

#[tokio::test]
async fn test_dispose_releases_pool() -> Result<()> {
    init_logging();
    let provider = provider();
    let mut session = provider.create_test_session(FakeSource::new())?;

    let mut navigator = session.navigator();
    navigator.to_page::<HomePage>().await?;
    assert_eq!(session.pool().context_count(), 1);
    assert_eq!(provider.session_count(), 1);

    session.dispose();
    assert!(session.is_disposed());
    assert_eq!(session.pool().context_count(), 0);
    assert!(!session.pool().is_configured());
    assert_eq!(provider.session_count(), 0);

    let err = navigator.to_page::<HomePage>().await.unwrap_err();
    assert!(matches!(err, pom_navigator::Error::ContextSourceMissing));
    Ok(())
}

#[test]
fn test_session_services_are_named() -> Result<()> {
    let session = provider().create_test_session(FakeSource::new())?;
    assert!(session.service("main").is_some());
    assert!(session.service("admin").is_some());
    assert!(session.service("missing").is_none());
    Ok(())
}
