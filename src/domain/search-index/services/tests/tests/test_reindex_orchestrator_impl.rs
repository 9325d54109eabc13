// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use cms_search::testing::RecordingProgressReporter;
use cms_search::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::search_harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_reindex_creates_index_and_upserts() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One"), news(2, "Two")]);

    let outcome = harness.reindex_all("news").await.unwrap();

    assert_eq!(
        outcome,
        ReindexOutcome {
            total: 2,
            processed: 2,
            upserted: 2,
            ..Default::default()
        }
    );

    let index = harness.engine.index("cms_news").unwrap();
    assert!(index.open);
    assert_eq!(index.settings, json!({"number_of_replicas": 0}));
    assert_eq!(harness.engine.document_ids("cms_news"), vec!["1", "2"]);
    assert_eq!(
        harness.engine.document("cms_news", "1").unwrap()["body"],
        json!("One body")
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_reindex_is_idempotent() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One"), news(2, "Two")]);

    harness.reindex_all("news").await.unwrap();
    let first = harness.engine.index("cms_news").unwrap().documents;

    harness.engine.clear_operations();
    let outcome = harness.reindex_all("news").await.unwrap();
    let second = harness.engine.index("cms_news").unwrap().documents;

    assert_eq!(first, second);
    assert_eq!(outcome.upserted, 2);

    // Existing index gets its mapping updated in place, documents are updated
    let ops = harness.engine.operation_names();
    assert_eq!(
        ops[..4],
        ["index_exists", "close_index", "put_mapping", "open_index"]
    );
    assert_eq!(ops.iter().filter(|op| **op == "update_document").count(), 2);
    assert!(!ops.contains(&"index_document"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_excluded_record_is_removed_then_ignored() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One"), news(2, "Two")]);
    harness.reindex_all("news").await.unwrap();

    harness.add_records([news(2, "Two").with_enabled(false)]);

    let outcome = harness.reindex_all("news").await.unwrap();
    assert_eq!(outcome.removed, 1);
    assert_eq!(outcome.upserted, 1);
    assert_eq!(harness.engine.document_ids("cms_news"), vec!["1"]);

    harness.engine.clear_operations();
    let outcome = harness.reindex_all("news").await.unwrap();
    assert_eq!(outcome.removed, 0);
    assert_eq!(outcome.unchanged, 1);
    assert!(
        !harness
            .engine
            .operation_names()
            .contains(&"delete_document")
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_record_failure_does_not_stop_the_run() {
    let harness = SearchHarness::new();
    harness.add_records([
        news(1, "One"),
        news(2, "Two").with_field("body", ContentValue::ElementCollection(vec![RecordId(9)])),
        news(3, "Three"),
    ]);

    let progress = RecordingProgressReporter::new();
    let orchestrator = harness
        .catalog
        .get_one::<dyn ReindexOrchestrator>()
        .unwrap();

    let outcome = orchestrator
        .reindex(
            &UpdateJobArgs {
                index_name: "news".to_string(),
                ..Default::default()
            },
            ProgressMode::Foreground,
            &progress,
        )
        .await
        .unwrap();

    assert_eq!(outcome.processed, 3);
    assert_eq!(outcome.failed, 1);
    assert_eq!(progress.calls(), vec![(1, 3), (2, 3), (3, 3)]);
    assert_eq!(harness.engine.document_ids("cms_news"), vec!["1", "3"]);

    let reports = harness.error_reporter.reports_of(ErrorSeverity::Error);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].context["record_id"], "2");
    assert_eq!(reports[0].context["index_name"], "news");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_engine_failure_on_one_record_is_isolated() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One"), news(2, "Two")]);
    harness.reindex_all("news").await.unwrap();

    harness.engine.fail_next("update_document", 1);
    let outcome = harness.reindex_all("news").await.unwrap();

    assert_eq!(outcome.processed, 2);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.upserted, 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_background_progress_is_sampled() {
    let harness = SearchHarness::new();
    harness.add_records((1..=25).map(|i| news(i, &format!("Item {i}"))));

    let progress = RecordingProgressReporter::new();
    let orchestrator = harness
        .catalog
        .get_one::<dyn ReindexOrchestrator>()
        .unwrap();

    orchestrator
        .reindex(
            &UpdateJobArgs {
                index_name: "news".to_string(),
                ..Default::default()
            },
            ProgressMode::Background,
            &progress,
        )
        .await
        .unwrap();

    assert_eq!(progress.calls(), vec![(10, 25), (20, 25), (25, 25)]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_empty_scope_reports_completion() {
    let harness = SearchHarness::new();

    let progress = RecordingProgressReporter::new();
    let orchestrator = harness
        .catalog
        .get_one::<dyn ReindexOrchestrator>()
        .unwrap();

    let outcome = orchestrator
        .reindex(
            &UpdateJobArgs {
                index_name: "news".to_string(),
                ..Default::default()
            },
            ProgressMode::Background,
            &progress,
        )
        .await
        .unwrap();

    assert_eq!(outcome.total, 0);
    assert_eq!(progress.calls(), vec![(0, 0)]);
    assert!(harness.engine.index("cms_news").is_some());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_explicit_ids_and_missing_records() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One"), news(2, "Two")]);

    let outcome = harness
        .reindex(UpdateJobArgs {
            index_name: "news".to_string(),
            record_ids: Some(vec![RecordId(2), RecordId(42)]),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(outcome.processed, 2);
    assert_eq!(outcome.upserted, 1);
    assert_eq!(outcome.missing, 1);
    assert_eq!(harness.engine.document_ids("cms_news"), vec!["2"]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delete_first_rebuilds_from_scratch() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One"), news(2, "Two")]);
    harness.reindex_all("news").await.unwrap();

    harness.content.remove_record(RecordId(2));
    harness.engine.clear_operations();

    harness
        .reindex(UpdateJobArgs {
            index_name: "news".to_string(),
            delete_index_first: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(harness.engine.document_ids("cms_news"), vec!["1"]);
    assert_eq!(
        harness.engine.operation_names()[..3],
        ["delete_index", "index_exists", "create_index"]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_sayt_covers_every_section_and_needs_a_title() {
    let harness = SearchHarness::new();
    harness.add_records([
        news(1, "Spring sale"),
        ContentRecord::new(2, "blog").with_title("Release notes"),
        ContentRecord::new(3, "blog"),
    ]);

    let outcome = harness.reindex_all("suggest").await.unwrap();

    assert_eq!(outcome.upserted, 2);
    assert_eq!(outcome.unchanged, 1);
    assert_eq!(
        harness.engine.document("cms_suggest", "1").unwrap(),
        json!({
            "suggest": {"input": ["Spring sale", "sale"]},
            "title": "Spring sale",
        })
        .as_object()
        .cloned()
        .unwrap()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_eager_loads_honor_the_disabled_related_flag() {
    let harness = SearchHarness::new();
    harness.add_records([
        news(1, "One").with_field(
            "tags",
            ContentValue::ElementCollection(vec![RecordId(10), RecordId(11)]),
        ),
        ContentRecord::new(10, "tags").with_title("Rust"),
        ContentRecord::new(11, "tags").with_title("Hidden").with_enabled(false),
    ]);

    harness.reindex_all("news").await.unwrap();
    assert_eq!(
        harness.engine.document("cms_news", "1").unwrap()["tags"],
        json!([10])
    );

    harness
        .reindex(UpdateJobArgs {
            index_name: "news".to_string(),
            include_disabled_related: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        harness.engine.document("cms_news", "1").unwrap()["tags"],
        json!([10, 11])
    );

    let (_, plan) = harness.content.requested_plans().pop().unwrap();
    assert_eq!(plan.fields, vec!["tags"]);
    assert!(plan.include_disabled_related);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_reindex_rejects_bad_targets() {
    let mut config = harness_config();
    config.definitions[1].search_handler = Some("nope".to_string());
    let harness = SearchHarness::with_config(config);

    let err = harness.reindex_all("everything").await.unwrap_err();
    assert!(matches!(
        err,
        SearchJobError::Configuration(ConfigurationError::VirtualIndex { .. })
    ));
    assert!(!err.is_retryable());

    let err = harness.reindex_all("blog").await.unwrap_err();
    assert!(matches!(
        err,
        SearchJobError::Configuration(ConfigurationError::UnknownSearchHandler { .. })
    ));

    let err = harness.reindex_all("missing").await.unwrap_err();
    assert!(matches!(
        err,
        SearchJobError::Configuration(ConfigurationError::IndexNotFound { .. })
    ));

    assert!(harness.engine.operations().is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_reindex_does_not_wait_for_maintenance_lock() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One")]);

    assert!(
        harness
            .maintenance_lock()
            .acquire("news", Duration::from_millis(10))
            .await
            .unwrap()
            .is_some()
    );

    harness.reindex_all("news").await.unwrap();

    assert_eq!(harness.engine.document_ids("cms_news"), vec!["1"]);
    assert!(harness.maintenance_lock().is_under_maintenance("news"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
