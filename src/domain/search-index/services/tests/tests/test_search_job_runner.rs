// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use chrono::Utc;
use cms_search::*;
use cms_search_services::SearchJobWorkerStats;
use pretty_assertions::assert_eq;

use super::search_harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn update_envelope(index_name: &str, policy: RetryPolicy) -> JobEnvelope {
    JobEnvelope::new(
        SearchJobPayload::Update(UpdateJobArgs {
            index_name: index_name.to_string(),
            record_ids: Some(vec![RecordId(1)]),
            ..Default::default()
        }),
        policy,
        Utc::now(),
    )
}

#[test_log::test(tokio::test)]
async fn test_successful_job_completes() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One")]);

    let disposition = harness
        .runner()
        .run(
            &update_envelope("news", RetryPolicy::new(60, 3)),
            ProgressMode::Background,
            &NullProgressReporter,
        )
        .await;

    assert_eq!(disposition, JobDisposition::Completed);
    assert_eq!(harness.engine.document_ids("cms_news"), vec!["1"]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_retries_are_exhausted_and_escalated() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One")]);
    harness.engine.fail_always("index_exists");

    harness
        .queue
        .enqueue(update_envelope("news", RetryPolicy::new(60, 3)))
        .await
        .unwrap();

    let stats = harness.worker().run_until_idle().await.unwrap();

    assert_eq!(
        stats,
        SearchJobWorkerStats {
            completed: 0,
            retried: 2,
            discarded: 1,
        }
    );
    assert_eq!(
        harness
            .engine
            .operation_names()
            .iter()
            .filter(|op| **op == "index_exists")
            .count(),
        3
    );

    let reports = harness.error_reporter.reports();
    assert_eq!(reports.len(), 1);
    assert!(
        reports[0]
            .message
            .starts_with("Search job 'update' for index 'news' gave up after 3 attempt(s)"),
        "{}",
        reports[0].message
    );
    assert_eq!(reports[0].context["attempts"], "3");
    assert_eq!(reports[0].context["record_ids"], "1");
    assert_eq!(reports[0].context["job_kind"], "update");

    assert_eq!(harness.queue.pending_count().await.unwrap(), 0);
    assert_eq!(harness.queue.acknowledged()[0].attempt, 3);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_transient_failure_recovers_on_retry() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One")]);
    harness.engine.fail_next("index_exists", 1);

    harness
        .queue
        .enqueue(update_envelope("news", RetryPolicy::new(60, 3)))
        .await
        .unwrap();

    let stats = harness.worker().run_until_idle().await.unwrap();

    assert_eq!(stats.retried, 1);
    assert_eq!(stats.completed, 1);
    assert!(harness.error_reporter.reports().is_empty());
    assert_eq!(harness.engine.document_ids("cms_news"), vec!["1"]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_configuration_errors_are_not_retried() {
    let harness = SearchHarness::new();

    let disposition = harness
        .runner()
        .run(
            &update_envelope("everything", RetryPolicy::new(60, 3)),
            ProgressMode::Background,
            &NullProgressReporter,
        )
        .await;

    assert_eq!(disposition, JobDisposition::Discarded);

    let reports = harness.error_reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].severity, ErrorSeverity::Error);
    assert_eq!(reports[0].context["index_name"], "everything");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(start_paused = true))]
async fn test_time_to_run_exceeded_is_retried() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One")]);
    harness.engine.set_latency(Some(Duration::from_secs(10)));

    let disposition = harness
        .runner()
        .run(
            &update_envelope("news", RetryPolicy::new(1, 3)),
            ProgressMode::Background,
            &NullProgressReporter,
        )
        .await;

    assert_eq!(disposition, JobDisposition::Retry);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(start_paused = true))]
async fn test_time_to_run_exceeded_clears_maintenance_flag() {
    let harness = SearchHarness::new();
    harness.engine.set_latency(Some(Duration::from_secs(10)));

    let envelope = JobEnvelope::new(
        SearchJobPayload::IndexAdmin(IndexAdminJobArgs {
            index_name: "news".to_string(),
            action: "create".to_string(),
        }),
        RetryPolicy::new(1, 1),
        Utc::now(),
    );

    let disposition = harness
        .runner()
        .run(&envelope, ProgressMode::Background, &NullProgressReporter)
        .await;

    assert_eq!(disposition, JobDisposition::Discarded);
    assert!(!harness.maintenance_lock().is_under_maintenance("news"));

    let reports = harness.error_reporter.reports();
    assert_eq!(reports.len(), 1);
    assert!(
        reports[0]
            .message
            .contains("Job attempt exceeded its time-to-run of 1s"),
        "{}",
        reports[0].message
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(start_paused = true))]
async fn test_admin_job_retried_after_time_to_run_exceeded_gets_the_lock() {
    let harness = SearchHarness::new();
    harness.engine.set_latency(Some(Duration::from_secs(400)));

    let envelope = JobEnvelope::new(
        SearchJobPayload::IndexAdmin(IndexAdminJobArgs {
            index_name: "news".to_string(),
            action: "create".to_string(),
        }),
        RetryPolicy::new(300, 3),
        Utc::now(),
    );

    let disposition = harness
        .runner()
        .run(&envelope, ProgressMode::Background, &NullProgressReporter)
        .await;
    assert_eq!(disposition, JobDisposition::Retry);

    // The lease of the abandoned attempt is still far from expiring
    harness.engine.set_latency(None);
    let disposition = harness
        .runner()
        .run(
            &envelope.next_attempt(),
            ProgressMode::Background,
            &NullProgressReporter,
        )
        .await;

    assert_eq!(disposition, JobDisposition::Completed);
    assert!(harness.engine.index("cms_news").is_some());
    assert!(!harness.maintenance_lock().is_under_maintenance("news"));
    assert!(harness.error_reporter.reports().is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_mapping_transition_is_reported_as_critical() {
    let harness = SearchHarness::new();
    harness.add_records([news(1, "One")]);
    harness.reindex_all("news").await.unwrap();
    harness.engine.fail_next("open_index", 1);

    let disposition = harness
        .runner()
        .run(
            &update_envelope("news", RetryPolicy::new(60, 3)),
            ProgressMode::Background,
            &NullProgressReporter,
        )
        .await;

    // Retrying reopens the index
    assert_eq!(disposition, JobDisposition::Retry);
    assert_eq!(
        harness
            .error_reporter
            .reports_of(ErrorSeverity::Critical)
            .len(),
        1
    );
    assert!(!harness.engine.index("cms_news").unwrap().open);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
