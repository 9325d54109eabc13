// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use cms_search::*;
use cms_search_services::transformers::RelatedCountTransformer;
use cms_search_services::*;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use super::search_harness::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn news_definition() -> Arc<IndexDefinition> {
    SearchHarness::new().store().get_by_name("news", true).unwrap()
}

fn full_record() -> ContentRecord {
    ContentRecord::new(7, "news")
        .with_title("  Launch day ")
        .with_field("body", ContentValue::RichText {
            html: "<p>Hello&nbsp;<b>world</b></p>\n<p>again</p>".to_string(),
        })
        .with_field(
            "tags",
            ContentValue::ElementCollection(vec![RecordId(3), RecordId(1)]),
        )
        .with_field("unmapped", ContentValue::String("ignored".to_string()))
}

#[test_log::test]
fn test_document_follows_mapping() {
    let document = DocumentTransformerImpl {}
        .transform(&news_definition(), &full_record())
        .unwrap();

    assert_eq!(
        serde_json::Value::Object(document),
        json!({
            "body": "Hello world again",
            "section": "news",
            "tags": [3, 1],
            "title": "Launch day",
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_document_shape_is_deterministic() {
    let definition = news_definition();
    let record = full_record();

    let transformer = DocumentTransformerImpl {};
    let first = transformer.transform(&definition, &record).unwrap();
    let second = transformer.transform(&definition, &record).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_missing_fields_become_null() {
    let document = DocumentTransformerImpl {}
        .transform(&news_definition(), &ContentRecord::new(8, "news"))
        .unwrap();

    assert_eq!(
        serde_json::Value::Object(document),
        json!({
            "body": null,
            "section": "news",
            "tags": [],
            "title": null,
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_element_collection_needs_explicit_transformer() {
    let mut definition = (*news_definition()).clone();
    definition.field_transformers.clear();

    let err = DocumentTransformerImpl {}
        .transform(&definition, &full_record())
        .unwrap_err();

    assert_eq!(
        err,
        DocumentTransformError::ElementCollectionNeedsTransformer {
            field: "tags".to_string()
        }
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_transformers_run_only_for_mapped_fields() {
    let mut definition = (*news_definition()).clone();
    definition
        .field_transformers
        .insert("tag_count".to_string(), Arc::new(RelatedCountTransformer {}));

    let document = DocumentTransformerImpl {}
        .transform(&definition, &full_record())
        .unwrap();

    assert!(!document.contains_key("tag_count"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_transformers_run_in_declaration_order() {
    let mut definition = (*news_definition()).clone();
    let related_ids = definition.field_transformers["tags"].clone();
    definition.field_transformers = IndexMap::from([
        (
            "title".to_string(),
            Arc::new(ShoutTransformer {}) as Arc<dyn FieldTransformer>,
        ),
        ("body".to_string(), Arc::new(SeenFieldsTransformer {})),
        ("tags".to_string(), related_ids),
    ]);

    let document = DocumentTransformerImpl {}
        .transform(&definition, &full_record())
        .unwrap();

    // Generic fields are coerced only after every transformer ran
    assert_eq!(
        document["body"],
        json!({
            "seen": ["title"],
            "title": "LAUNCH DAY",
        })
    );
    assert_eq!(document["section"], json!("news"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_blog_post_with_publish_date() {
    let harness = SearchHarness::with_config(SearchIndexesConfig {
        index_prefix: "cms_".to_string(),
        global: GlobalIndexConfig::default(),
        definitions: vec![IndexDefinitionConfig {
            index_type: Some("section".to_string()),
            name: Some("blog".to_string()),
            search_handler: Some("default".to_string()),
            sections: vec!["blog".to_string()],
            field_mapping: mapping(json!({
                "title": {"type": "text"},
                "published_at": {"type": "date"},
            })),
            ..Default::default()
        }],
    });
    let definition = harness.store().get_by_name("blog", true).unwrap();

    let published_at = chrono::DateTime::parse_from_rfc3339("2024-01-05T10:00:00Z").unwrap();
    let record = ContentRecord::new(42, "blog")
        .with_title("Hello")
        .with_field("published_at", ContentValue::DateTime(published_at));

    let document = DocumentTransformerImpl {}
        .transform(&definition, &record)
        .unwrap();

    assert_eq!(
        Value::Object(document),
        json!({
            "published_at": "2024-01-05T10:00:00+00:00",
            "title": "Hello",
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct ShoutTransformer {}

impl FieldTransformer for ShoutTransformer {
    fn name(&self) -> &'static str {
        "shout"
    }

    fn transform(
        &self,
        _field: &str,
        raw: Option<&ContentValue>,
        _record: &ContentRecord,
        _partial: &SearchDocument,
    ) -> Result<Value, DocumentTransformError> {
        Ok(match raw {
            Some(ContentValue::String(s)) => json!(s.trim().to_uppercase()),
            _ => Value::Null,
        })
    }
}

/// Reports what the partial document held when it ran
struct SeenFieldsTransformer {}

impl FieldTransformer for SeenFieldsTransformer {
    fn name(&self) -> &'static str {
        "seen_fields"
    }

    fn transform(
        &self,
        _field: &str,
        _raw: Option<&ContentValue>,
        _record: &ContentRecord,
        partial: &SearchDocument,
    ) -> Result<Value, DocumentTransformError> {
        Ok(json!({
            "seen": partial.keys().collect::<Vec<_>>(),
            "title": partial.get("title"),
        }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
