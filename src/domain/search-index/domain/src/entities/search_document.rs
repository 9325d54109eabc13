// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Flat document sent to the search engine. Keys are kept sorted so the same
/// record always serializes to the same document.
pub type SearchDocument = serde_json::Map<String, serde_json::Value>;

/// Field name to engine mapping declaration, e.g. `{"type": "text"}`
pub type FieldMapping = BTreeMap<String, serde_json::Value>;

/// Document is worth writing when at least one field carries a value
pub fn is_document_empty(document: &SearchDocument) -> bool {
    document.values().all(serde_json::Value::is_null)
}

/// Converts a field mapping into the body of a `_mapping` request
pub fn mapping_to_properties(mapping: &FieldMapping) -> serde_json::Value {
    let properties: serde_json::Map<String, serde_json::Value> = mapping
        .iter()
        .map(|(field, declaration)| (field.clone(), declaration.clone()))
        .collect();

    serde_json::json!({ "properties": properties })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
