// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{ProgressMode, ProgressReporter, SearchJobError, UpdateJobArgs};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Reconciles a physical index with the content store
#[async_trait::async_trait]
pub trait ReindexOrchestrator: Send + Sync {
    /// Per-record failures are reported and skipped. Only index-level
    /// failures fail the call.
    async fn reindex(
        &self,
        args: &UpdateJobArgs,
        mode: ProgressMode,
        progress: &dyn ProgressReporter,
    ) -> Result<ReindexOutcome, SearchJobError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReindexOutcome {
    pub total: usize,
    pub processed: usize,
    /// Written with an index or update call
    pub upserted: usize,
    /// Excluded by the search handler and removed from the index
    pub removed: usize,
    /// Excluded and already absent, or transformed into an empty document
    pub unchanged: usize,
    /// Id vanished from the content store between listing and fetching
    pub missing: usize,
    pub failed: usize,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
