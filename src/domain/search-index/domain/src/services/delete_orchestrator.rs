// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{DeleteJobArgs, SearchJobError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Removes one record from its primary index and every auto-indexed SAYT
/// index
#[async_trait::async_trait]
pub trait DeleteOrchestrator: Send + Sync {
    async fn delete_record(&self, args: &DeleteJobArgs) -> Result<DeleteOutcome, SearchJobError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Physical indexes the document was removed from
    pub removed_from: Vec<String>,
    /// Physical indexes that did not hold the document
    pub absent_from: Vec<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
