// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use cms_search::ContentRecord;

use crate::CLIError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Reads a JSON array of content records exported from the CMS
pub fn load_content_export(path: &Path) -> Result<Vec<ContentRecord>, CLIError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CLIError::usage_error_with_source(
            format!("Unable to read content export {}", path.display()),
            e,
        )
    })?;

    let records = parse_content_export(&text).map_err(|e| {
        CLIError::usage_error_with_source(
            format!("Invalid content export {}", path.display()),
            e,
        )
    })?;

    tracing::info!(path = %path.display(), num_records = records.len(), "Loaded content export");

    Ok(records)
}

pub fn parse_content_export(text: &str) -> Result<Vec<ContentRecord>, serde_json::Error> {
    serde_json::from_str(text)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
