// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::{JobEnvelope, SearchJobId};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// At-least-once queue of search jobs
#[async_trait::async_trait]
pub trait SearchJobQueue: Send + Sync {
    async fn enqueue(&self, envelope: JobEnvelope) -> Result<SearchJobId, InternalError>;

    /// Hands out the next pending envelope. It stays in flight until it is
    /// acknowledged or scheduled for retry.
    async fn dequeue(&self) -> Result<Option<JobEnvelope>, InternalError>;

    /// Drops an in-flight envelope for good
    async fn acknowledge(&self, job_id: SearchJobId) -> Result<(), InternalError>;

    /// Puts an in-flight envelope back with its attempt counter bumped
    async fn schedule_retry(&self, job_id: SearchJobId) -> Result<(), InternalError>;

    async fn pending_count(&self) -> Result<usize, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
