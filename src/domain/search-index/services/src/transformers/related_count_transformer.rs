// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cms_search::*;
use serde_json::Value;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn FieldTransformer)]
pub struct RelatedCountTransformer {}

impl RelatedCountTransformer {
    pub const NAME: &'static str = "related_count";
}

impl FieldTransformer for RelatedCountTransformer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn transform(
        &self,
        field: &str,
        raw: Option<&ContentValue>,
        _record: &ContentRecord,
        _partial: &SearchDocument,
    ) -> Result<Value, DocumentTransformError> {
        match raw {
            None | Some(ContentValue::Null) => Ok(Value::from(0)),
            Some(ContentValue::ElementCollection(ids)) => Ok(Value::from(ids.len())),
            Some(other) => Err(DocumentTransformError::TransformerFailed {
                transformer: Self::NAME.to_string(),
                field: field.to_string(),
                reason: format!("expected a collection of elements, got {other:?}"),
            }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
