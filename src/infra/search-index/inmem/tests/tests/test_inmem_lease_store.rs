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

use chrono::{TimeZone, Utc};
use cms_search::*;
use cms_search_inmem::*;
use time_source::SystemTimeSourceStub;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_lease_is_exclusive_until_expiry() {
    let clock = SystemTimeSourceStub::new_set(Utc.with_ymd_and_hms(2050, 1, 1, 12, 0, 0).unwrap());
    let store = InMemoryLeaseStore::new(Arc::new(clock.clone()));
    let ttl = Duration::from_secs(60);

    assert!(store.try_acquire("k", "a", ttl).await.unwrap());
    assert!(!store.try_acquire("k", "b", ttl).await.unwrap());

    clock.advance(chrono::Duration::seconds(61));

    assert!(store.get_lease("k").await.unwrap().is_none());
    assert!(store.try_acquire("k", "b", ttl).await.unwrap());
    assert_eq!(store.get_lease("k").await.unwrap().unwrap().holder, "b");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_release_requires_the_holder() {
    let store = InMemoryLeaseStore::new(Arc::new(SystemTimeSourceStub::new()));
    let ttl = Duration::from_secs(60);

    assert!(store.try_acquire("k", "a", ttl).await.unwrap());

    assert!(!store.release("k", "b").await.unwrap());
    assert!(store.release("k", "a").await.unwrap());
    assert!(!store.release("k", "a").await.unwrap());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
