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

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_parses_full_config() {
    let config: SearchIndexesConfig = serde_yaml::from_str(indoc_config()).unwrap();

    assert_eq!(config.index_prefix, "cms_");
    assert_eq!(
        config.global.field_mapping.section["title"],
        serde_json::json!({"type": "text"})
    );
    assert_eq!(config.global.field_boosts["title"], 3.0);
    assert_eq!(config.definitions.len(), 2);

    let news = &config.definitions[0];
    assert_eq!(news.index_type.as_deref(), Some("section"));
    assert_eq!(news.sections, vec!["news".to_string()]);
    assert_eq!(news.eager_loads.modifier.as_deref(), Some("with_authors"));
    assert_eq!(news.field_transformers["tags"], "related_ids");
    assert!(news.auto_index);

    let broken = &config.definitions[1];
    assert_eq!(broken.index_type, None);
    assert!(!broken.auto_index);
}

#[test]
fn test_field_transformers_keep_declaration_order() {
    let config: IndexDefinitionConfig = serde_yaml::from_str(
        r#"
name: news
field_transformers:
  title: title_suggest
  body: shout
  author: related_ids
"#,
    )
    .unwrap();

    assert_eq!(
        config.field_transformers.keys().collect::<Vec<_>>(),
        vec!["title", "body", "author"]
    );
}

#[test]
fn test_rejects_unknown_properties() {
    let res = serde_yaml::from_str::<SearchIndexesConfig>(
        "definitions:\n  - name: news\n    colour: red\n",
    );

    assert!(res.is_err());
}

#[test]
fn test_job_policies_defaults() {
    let config: SearchJobsConfig = serde_yaml::from_str("delete:\n  ttr_seconds: 5\n  max_attempts: 1\n").unwrap();

    assert_eq!(config.delete, RetryPolicy::new(5, 1));
    assert_eq!(config.update, RetryPolicy::new(3600, 3));
    assert_eq!(config.policy_for(SearchJobKind::IndexAdmin), RetryPolicy::new(300, 3));
}

#[test]
fn test_maintenance_defaults() {
    let config: MaintenanceConfig = serde_yaml::from_str("lease_ttl_secs: 60\n").unwrap();

    assert_eq!(config.lock_timeout().as_secs(), 30);
    assert_eq!(config.lease_ttl().as_secs(), 60);
    assert_eq!(config.poll_interval().as_millis(), 100);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn indoc_config() -> &'static str {
    r#"
index_prefix: cms_
global:
  field_mapping:
    section:
      title: {type: text}
      postDate: {type: date}
    sayt:
      title: {type: search_as_you_type}
  field_boosts:
    title: 3.0
definitions:
  - type: section
    name: News
    label: News articles
    search_handler: default
    sections: [news]
    field_mapping:
      tags: {type: long}
    match_fields: [title, body]
    eager_loads:
      fields: [tags]
      modifier: with_authors
    auto_index: true
    field_transformers:
      tags: related_ids
  - name: orphan
    search_handler: default
"#
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
