// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::SearchJobError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Runs one structural action on an index under its maintenance lock
#[async_trait::async_trait]
pub trait IndexAdminOrchestrator: Send + Sync {
    /// `action` is validated against the allow-list after the lock is taken
    async fn execute(
        &self,
        index_name: &str,
        action: &str,
    ) -> Result<IndexAdminOutcome, SearchJobError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum IndexAdminOutcome {
    Created,
    AlreadyExists,
    MappingUpdated,
    SettingsUpdated,
    Deleted,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
