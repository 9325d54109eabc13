// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cms_search::*;
use pretty_assertions::assert_eq;

use super::search_harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn delete_args(index_name: &str, record_id: u64) -> DeleteJobArgs {
    DeleteJobArgs {
        index_name: index_name.to_string(),
        record_id: RecordId(record_id),
        refresh_policy: RefreshPolicy::WaitFor,
    }
}

async fn indexed_harness() -> SearchHarness {
    let harness = SearchHarness::new();
    harness.add_records([
        news(1, "One"),
        news(2, "Two"),
        ContentRecord::new(5, "blog").with_title("Post"),
    ]);
    harness.reindex_all("news").await.unwrap();
    harness.reindex_all("blog").await.unwrap();
    harness.reindex_all("suggest").await.unwrap();
    harness
}

#[test_log::test(tokio::test)]
async fn test_deletes_from_primary_and_suggest_indexes() {
    let harness = indexed_harness().await;

    let outcome = harness
        .deleter()
        .delete_record(&delete_args("news", 1))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DeleteOutcome {
            removed_from: vec!["cms_news".to_string(), "cms_suggest".to_string()],
            absent_from: Vec::new(),
        }
    );
    assert_eq!(harness.engine.document_ids("cms_news"), vec!["2"]);
    assert_eq!(harness.engine.document_ids("cms_suggest"), vec!["2", "5"]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_manual_primary_index_is_left_alone() {
    let harness = indexed_harness().await;

    let outcome = harness
        .deleter()
        .delete_record(&delete_args("blog", 5))
        .await
        .unwrap();

    assert_eq!(outcome.removed_from, vec!["cms_suggest".to_string()]);
    assert_eq!(harness.engine.document_ids("cms_blog"), vec!["5"]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_absent_documents_are_not_errors() {
    let harness = indexed_harness().await;

    let outcome = harness
        .deleter()
        .delete_record(&delete_args("news", 77))
        .await
        .unwrap();

    assert!(outcome.removed_from.is_empty());
    assert_eq!(
        outcome.absent_from,
        vec!["cms_news".to_string(), "cms_suggest".to_string()]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_failures_are_collected_without_short_circuit() {
    let harness = indexed_harness().await;
    harness.engine.fail_next("delete_document", 1);

    let err = harness
        .deleter()
        .delete_record(&delete_args("news", 2))
        .await
        .unwrap_err();

    let SearchJobError::DeletionIncomplete(e) = err else {
        panic!("Expected an incomplete deletion");
    };
    assert_eq!(e.record_id, RecordId(2));
    assert_eq!(e.failures.len(), 1);
    assert_eq!(e.failures[0].index_name, "cms_news");

    // Second target was still attempted
    assert_eq!(harness.engine.document_ids("cms_suggest"), vec!["1", "5"]);

    let reports = harness.error_reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].context["index_name"], "cms_news");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_virtual_index_cannot_be_a_delete_target() {
    let harness = indexed_harness().await;

    let err = harness
        .deleter()
        .delete_record(&delete_args("everything", 1))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchJobError::Configuration(ConfigurationError::VirtualIndex { .. })
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
