// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::{ContentLifecycleMessage, SearchJobId};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Turns content store events into queued search jobs
#[async_trait::async_trait]
pub trait ContentLifecycleConsumer: Send + Sync {
    async fn consume_message(
        &self,
        message: &ContentLifecycleMessage,
    ) -> Result<Vec<SearchJobId>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
