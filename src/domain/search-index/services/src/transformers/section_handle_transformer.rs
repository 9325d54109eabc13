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
pub struct SectionHandleTransformer {}

impl SectionHandleTransformer {
    pub const NAME: &'static str = "section_handle";
}

impl FieldTransformer for SectionHandleTransformer {
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
        Ok(Value::String(record.section_handle.clone()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
