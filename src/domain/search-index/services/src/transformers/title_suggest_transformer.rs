// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cms_search::*;
use serde_json::{Value, json};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Completion suggester input: the full title followed by every suffix that
/// starts at a word boundary, so that "Spring sale" also completes on "sale"
#[dill::component(pub)]
#[dill::interface(dyn FieldTransformer)]
pub struct TitleSuggestTransformer {}

impl TitleSuggestTransformer {
    pub const NAME: &'static str = "title_suggest";
}

impl FieldTransformer for TitleSuggestTransformer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn transform(
        &self,
        _field: &str,
        _raw: Option<&ContentValue>,
        record: &ContentRecord,
        _partial: &SearchDocument,
    ) -> Result<Value, DocumentTransformError> {
        let words: Vec<&str> = record.title.split_whitespace().collect();
        if words.is_empty() {
            return Ok(Value::Null);
        }

        let input: Vec<String> = (0..words.len()).map(|i| words[i..].join(" ")).collect();

        Ok(json!({ "input": input }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
