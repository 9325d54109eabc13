// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{ContentRecord, DocumentTransformError, IndexDefinition, SearchDocument};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Converts a content record into a document shaped by the index's field
/// mapping. Must not perform I/O.
pub trait DocumentTransformer: Send + Sync {
    fn transform(
        &self,
        definition: &IndexDefinition,
        record: &ContentRecord,
    ) -> Result<SearchDocument, DocumentTransformError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
