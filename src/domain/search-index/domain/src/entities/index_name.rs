// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Returns the logical form of an index name: lowercased, with the global
/// prefix stripped if the caller passed a physical name.
pub fn normalize_index_name(name: &str, index_prefix: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let prefix = index_prefix.to_lowercase();

    if prefix.is_empty() {
        return lowered;
    }

    match lowered.strip_prefix(&prefix) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => lowered,
    }
}

/// Name of the index as it exists in the search engine
pub fn physical_index_name(logical_name: &str, index_prefix: &str) -> String {
    format!("{}{}", index_prefix.to_lowercase(), logical_name.to_lowercase())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
