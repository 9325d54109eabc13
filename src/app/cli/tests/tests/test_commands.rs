// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cms_search::{ContentRecord, ContentValue};
use cms_search_cli::CLIError;
use pretty_assertions::assert_eq;

use super::searchctl_harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn news(id: u64, title: &str) -> ContentRecord {
    ContentRecord::new(id, "news")
        .with_title(title)
        .with_field("body", ContentValue::RichText {
            html: format!("<p>{title} body</p>"),
        })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_index_lifecycle() {
    let harness = SearchCtlHarness::new();

    harness.execute(["index", "create", "news"]).await.unwrap();
    assert_eq!(harness.engine.index_names(), vec!["cms_news"]);

    harness
        .execute(["index", "update-mapping", "CMS_News"])
        .await
        .unwrap();
    assert!(harness.engine.index("cms_news").unwrap().open);

    harness.execute(["index", "delete", "news"]).await.unwrap();
    assert!(harness.engine.index_names().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_index_rejects_unknown_action_and_virtual_index() {
    let harness = SearchCtlHarness::new();

    let err = harness
        .execute(["index", "truncate", "news"])
        .await
        .unwrap_err();
    assert!(matches!(err, CLIError::UsageError(_)), "{err:?}");

    let err = harness
        .execute(["index", "create", "everything"])
        .await
        .unwrap_err();
    assert!(matches!(err, CLIError::UsageError(_)), "{err:?}");

    assert!(harness.engine.operations().is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_reindex_from_content_export() {
    let harness = SearchCtlHarness::new();
    let content = harness.write_content(&[
        news(1, "Spring sale"),
        news(2, "Autumn sale").with_enabled(false),
        ContentRecord::new(3, "pages").with_title("About us"),
    ]);
    let content = content.to_str().unwrap();

    harness
        .execute(["reindex", "news", "--content", content])
        .await
        .unwrap();
    harness
        .execute(["reindex", "suggest", "--content", content, "--refresh"])
        .await
        .unwrap();

    assert_eq!(harness.engine.document_ids("cms_news"), vec!["1"]);
    assert_eq!(harness.engine.document_ids("cms_suggest"), vec!["1", "3"]);
    assert_eq!(
        harness.engine.document("cms_news", "1").unwrap()["body"],
        serde_json::json!("Spring sale body")
    );
}

#[test_log::test(tokio::test)]
async fn test_reindex_selected_ids_in_background() {
    let harness = SearchCtlHarness::new();
    let content = harness.write_content(&[news(1, "One"), news(2, "Two"), news(3, "Three")]);

    harness
        .execute([
            "reindex",
            "news",
            "--content",
            content.to_str().unwrap(),
            "--id",
            "1",
            "--id",
            "3",
            "--background",
        ])
        .await
        .unwrap();

    assert_eq!(harness.engine.document_ids("cms_news"), vec!["1", "3"]);
}

#[test_log::test(tokio::test)]
async fn test_reindex_reports_failed_records() {
    let harness = SearchCtlHarness::new();
    let content = harness.write_content(&[news(1, "One"), news(2, "Two")]);
    harness.engine.fail_next("index_document", 1);

    let err = harness
        .execute(["reindex", "news", "--content", content.to_str().unwrap()])
        .await
        .unwrap_err();

    assert!(matches!(err, CLIError::Failure(_)), "{err:?}");
    assert_eq!(
        err.to_string(),
        "1 of 2 record(s) could not be indexed into 'news'"
    );
    assert_eq!(harness.engine.document_ids("cms_news"), vec!["2"]);
}

#[test_log::test(tokio::test)]
async fn test_reindex_with_missing_content_export() {
    let harness = SearchCtlHarness::new();

    let err = harness
        .execute(["reindex", "news", "--content", "/definitely/not/here.json"])
        .await
        .unwrap_err();

    assert!(matches!(err, CLIError::UsageError(_)), "{err:?}");
    assert!(harness.engine.operations().is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delete_record() {
    let harness = SearchCtlHarness::new();
    let content = harness.write_content(&[news(1, "One"), news(2, "Two")]);
    let content = content.to_str().unwrap();

    harness
        .execute(["reindex", "news", "--content", content])
        .await
        .unwrap();
    harness
        .execute(["reindex", "suggest", "--content", content])
        .await
        .unwrap();

    harness.execute(["delete", "news", "1"]).await.unwrap();

    assert_eq!(harness.engine.document_ids("cms_news"), vec!["2"]);
    assert_eq!(harness.engine.document_ids("cms_suggest"), vec!["2"]);

    // Already gone
    harness.execute(["delete", "news", "1"]).await.unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_status_and_list() {
    let harness = SearchCtlHarness::new();
    let content = harness.write_content(&[news(1, "One")]);

    harness
        .execute(["reindex", "news", "--content", content.to_str().unwrap()])
        .await
        .unwrap();

    harness.execute(["status", "news"]).await.unwrap();
    harness.execute(["status", "everything"]).await.unwrap();
    harness.execute(["list", "--wide"]).await.unwrap();

    let err = harness.execute(["status", "nope"]).await.unwrap_err();
    assert!(matches!(err, CLIError::UsageError(_)), "{err:?}");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
