// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use crate::{ContentRecord, ContentValue, DocumentTransformError, SearchDocument};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Named strategy computing one document field. Bound to fields by name when
/// index definitions are loaded.
pub trait FieldTransformer: Send + Sync {
    fn name(&self) -> &'static str;

    /// `partial` holds the fields computed by transformers that ran earlier
    fn transform(
        &self,
        field: &str,
        raw: Option<&ContentValue>,
        record: &ContentRecord,
        partial: &SearchDocument,
    ) -> Result<serde_json::Value, DocumentTransformError>;
}

impl fmt::Debug for dyn FieldTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldTransformer({})", self.name())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
