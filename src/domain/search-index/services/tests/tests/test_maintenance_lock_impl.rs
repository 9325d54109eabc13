// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use cms_search::*;
use cms_search_inmem::*;
use cms_search_services::*;
use internal_error::InternalError;
use pretty_assertions::{assert_eq, assert_ne};
use time_source::SystemTimeSourceStub;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const SHORT: Duration = Duration::from_millis(50);

#[test_log::test(tokio::test)]
async fn test_lock_is_exclusive() {
    let harness = MaintenanceLockHarness::new();

    let news_holder = harness.lock.acquire("news", SHORT).await.unwrap().unwrap();
    assert!(harness.lock.is_under_maintenance("news"));

    assert_eq!(harness.lock.acquire("news", SHORT).await.unwrap(), None);
    // Other indexes are independent
    assert!(harness.lock.acquire("blog", SHORT).await.unwrap().is_some());

    assert!(harness.lock.release("news", &news_holder).await.unwrap());
    assert!(!harness.lock.is_under_maintenance("news"));

    assert!(harness.lock.acquire("news", SHORT).await.unwrap().is_some());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_every_acquisition_gets_its_own_holder() {
    let harness = MaintenanceLockHarness::new();

    let first = harness.lock.acquire("news", SHORT).await.unwrap().unwrap();
    assert!(harness.lock.release("news", &first).await.unwrap());

    let second = harness.lock.acquire("news", SHORT).await.unwrap().unwrap();
    assert_ne!(first, second);

    // A stale holder cannot release the current one
    assert!(!harness.lock.release("news", &first).await.unwrap());
    assert!(harness.lock.is_under_maintenance("news"));
    assert_eq!(harness.lock.acquire("news", SHORT).await.unwrap(), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_expired_holder_release_keeps_new_holder_lock() {
    let harness = MaintenanceLockHarness::new();

    let a = MaintenanceLockGuard::acquire(harness.lock.clone(), "news", SHORT)
        .await
        .unwrap()
        .unwrap();

    // A stalls past its lease TTL and B takes over
    harness.clock.advance(chrono::Duration::seconds(601));
    let b = MaintenanceLockGuard::acquire(harness.lock.clone(), "news", SHORT)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(a.holder(), b.holder());

    assert!(!a.release().await.unwrap());

    assert!(harness.lock.is_under_maintenance("news"));
    assert_eq!(
        harness.lock.acquire("news", Duration::ZERO).await.unwrap(),
        None
    );

    let lease = harness
        .lease_store
        .get_lease("search:maintenance:news")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(lease.holder, b.holder());

    assert!(b.release().await.unwrap());
    assert!(!harness.lock.is_under_maintenance("news"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_stale_holder_cannot_clear_liveness() {
    let harness = MaintenanceLockHarness::new();

    let a = harness.lock.acquire("news", SHORT).await.unwrap().unwrap();
    harness.clock.advance(chrono::Duration::seconds(601));
    let _b = harness.lock.acquire("news", SHORT).await.unwrap().unwrap();

    harness.lock.clear_liveness("news", &a);
    assert!(harness.lock.is_under_maintenance("news"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_waiting_acquire_succeeds_once_released() {
    let harness = MaintenanceLockHarness::new();
    let holder = harness.lock.acquire("news", SHORT).await.unwrap().unwrap();

    let lock = harness.lock.clone();
    let waiter =
        tokio::spawn(async move { lock.acquire("news", Duration::from_secs(5)).await.unwrap() });

    tokio::time::sleep(Duration::from_millis(30)).await;
    harness.lock.release("news", &holder).await.unwrap();

    assert!(waiter.await.unwrap().is_some());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_failed_acquire_never_sets_flag() {
    let harness = MaintenanceLockHarness::new();

    harness
        .lease_store
        .try_acquire("search:maintenance:news", "someone-else", Duration::from_secs(600))
        .await
        .unwrap();

    assert_eq!(harness.lock.acquire("news", SHORT).await.unwrap(), None);
    assert!(!harness.lock.is_under_maintenance("news"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_dropped_guard_clears_flag_and_releases_lease() {
    let harness = MaintenanceLockHarness::new();

    {
        let guard = MaintenanceLockGuard::acquire(harness.lock.clone(), "news", SHORT)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(guard.index_name(), "news");
        assert!(harness.lock.is_under_maintenance("news"));
        // Holder goes away without releasing
    }

    assert!(!harness.lock.is_under_maintenance("news"));

    // The lease is released in the background, no TTL wait needed
    assert!(
        harness
            .lock
            .acquire("news", Duration::from_secs(1))
            .await
            .unwrap()
            .is_some()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_guard_dropped_outside_runtime_leaves_lease_to_expire() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let harness = MaintenanceLockHarness::new();

    let guard = rt
        .block_on(MaintenanceLockGuard::acquire(
            harness.lock.clone(),
            "news",
            SHORT,
        ))
        .unwrap()
        .unwrap();
    drop(guard);

    assert!(!harness.lock.is_under_maintenance("news"));
    assert_eq!(rt.block_on(harness.lock.acquire("news", SHORT)).unwrap(), None);

    harness.clock.advance(chrono::Duration::seconds(601));
    assert!(
        rt.block_on(harness.lock.acquire("news", SHORT))
            .unwrap()
            .is_some()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_guard_clears_flag_when_holder_panics() {
    let harness = MaintenanceLockHarness::new();

    let lock = harness.lock.clone();
    let res = tokio::spawn(async move {
        let _guard = MaintenanceLockGuard::acquire(lock, "news", SHORT)
            .await
            .unwrap()
            .unwrap();
        panic!("worker crashed");
    })
    .await;

    assert!(res.unwrap_err().is_panic());
    assert!(!harness.lock.is_under_maintenance("news"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_release_clears_flag_when_lease_release_fails() {
    let mut lease_store = MockLeaseStore::new();
    lease_store.expect_try_acquire().returning(|_, _, _| Ok(true));
    lease_store
        .expect_release()
        .returning(|_, _| InternalError::bail("lease store unreachable"));

    let liveness_cache = Arc::new(InMemoryLivenessCache::new());
    let lock = MaintenanceLockImpl::new(
        Arc::new(lease_store),
        liveness_cache.clone(),
        Arc::new(SystemTimeSourceStub::new()),
        Arc::new(MaintenanceConfig::default()),
    );

    let holder = lock.acquire("news", SHORT).await.unwrap().unwrap();
    assert!(lock.is_under_maintenance("news"));

    assert!(lock.release("news", &holder).await.is_err());
    assert!(!lock.is_under_maintenance("news"));
    assert!(liveness_cache.get("search:maintenance:news").is_none());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct MaintenanceLockHarness {
    lock: Arc<dyn MaintenanceLock>,
    lease_store: Arc<dyn LeaseStore>,
    clock: SystemTimeSourceStub,
}

impl MaintenanceLockHarness {
    fn new() -> Self {
        let clock = SystemTimeSourceStub::new();
        let lease_store: Arc<dyn LeaseStore> =
            Arc::new(InMemoryLeaseStore::new(Arc::new(clock.clone())));

        let lock = Arc::new(MaintenanceLockImpl::new(
            lease_store.clone(),
            Arc::new(InMemoryLivenessCache::new()),
            Arc::new(clock.clone()),
            Arc::new(MaintenanceConfig {
                lock_timeout_secs: 1,
                lease_ttl_secs: 600,
                poll_interval_ms: 5,
            }),
        ));

        Self {
            lock,
            lease_store,
            clock,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
