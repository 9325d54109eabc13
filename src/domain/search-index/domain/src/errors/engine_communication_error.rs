// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Failure of a single call to the search engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Search engine operation '{operation}' on index '{index_name}' failed: {detail}")]
pub struct EngineCommunicationError {
    pub operation: &'static str,
    pub index_name: String,
    pub detail: String,
}

impl EngineCommunicationError {
    pub fn new(
        operation: &'static str,
        index_name: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            index_name: index_name.into(),
            detail: detail.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
