// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use cms_search::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::search_harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_index_lifecycle() {
    let harness = SearchHarness::new();
    let admin = harness.admin();

    assert_eq!(
        admin.execute("news", "create").await.unwrap(),
        IndexAdminOutcome::Created
    );
    assert_eq!(
        admin.execute("news", "createIndex").await.unwrap(),
        IndexAdminOutcome::AlreadyExists
    );

    harness.engine.clear_operations();
    assert_eq!(
        admin.execute("news", "update-mapping").await.unwrap(),
        IndexAdminOutcome::MappingUpdated
    );
    assert_eq!(
        harness.engine.operation_names(),
        vec!["index_exists", "close_index", "put_mapping", "open_index"]
    );

    assert_eq!(
        admin.execute("news", "update-settings").await.unwrap(),
        IndexAdminOutcome::SettingsUpdated
    );
    assert_eq!(
        harness.engine.index("cms_news").unwrap().settings,
        json!({"number_of_replicas": 0})
    );

    assert_eq!(
        admin.execute("CMS_NEWS", "delete").await.unwrap(),
        IndexAdminOutcome::Deleted
    );
    assert!(harness.engine.index("cms_news").is_none());

    assert!(!harness.maintenance_lock().is_under_maintenance("news"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_update_on_missing_index_creates_it() {
    let harness = SearchHarness::new();

    assert_eq!(
        harness
            .admin()
            .execute("blog", "update-mapping")
            .await
            .unwrap(),
        IndexAdminOutcome::Created
    );
    assert!(harness.engine.index("cms_blog").unwrap().open);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_deleting_missing_index_succeeds() {
    let harness = SearchHarness::new();

    assert_eq!(
        harness.admin().execute("news", "delete").await.unwrap(),
        IndexAdminOutcome::Deleted
    );
    assert!(harness.engine.index("cms_news").is_none());
    assert!(harness.error_reporter.reports().is_empty());
    assert!(!harness.maintenance_lock().is_under_maintenance("news"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_rejected_requests_release_the_lock() {
    let harness = SearchHarness::new();
    let admin = harness.admin();

    let err = admin.execute("news", "drop-everything").await.unwrap_err();
    assert!(matches!(
        err,
        SearchJobError::Configuration(ConfigurationError::UnknownAdminAction(_))
    ));
    assert!(!err.is_retryable());

    let err = admin.execute("everything", "create").await.unwrap_err();
    assert!(matches!(
        err,
        SearchJobError::Configuration(ConfigurationError::VirtualIndex { .. })
    ));

    assert!(!harness.maintenance_lock().is_under_maintenance("news"));
    assert!(!harness.maintenance_lock().is_under_maintenance("everything"));
    assert!(harness.engine.operations().is_empty());

    assert_eq!(
        admin.execute("news", "create").await.unwrap(),
        IndexAdminOutcome::Created
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(start_paused = true))]
async fn test_busy_index_fails_with_lock_unavailable() {
    let harness = SearchHarness::new();
    let lock = harness.maintenance_lock();
    let holder = lock.acquire("news", Duration::ZERO).await.unwrap().unwrap();

    // Name is normalized before locking
    let err = harness
        .admin()
        .execute("CMS_News", "create")
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        SearchJobError::LockUnavailable(e) if e.index_name == "news" && e.timeout_secs == 1
    ));
    assert!(err.is_retryable());
    assert!(harness.engine.operations().is_empty());

    // The holder keeps its lock
    assert!(lock.is_under_maintenance("news"));
    assert!(lock.release("news", &holder).await.unwrap());

    assert_eq!(
        harness.admin().execute("news", "create").await.unwrap(),
        IndexAdminOutcome::Created
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_engine_failure_is_returned_and_lock_released() {
    let harness = SearchHarness::new();
    harness.engine.fail_next("create_index", 1);

    let err = harness
        .admin()
        .execute("news", "create")
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        SearchJobError::EngineCommunication(e) if e.operation == "create_index"
    ));
    assert!(!harness.maintenance_lock().is_under_maintenance("news"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
