// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::{ContentRecord, EagerLoadPlan, RecordId};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Read access to the content store
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Ids of records in scope, enabled or not, in ascending order
    async fn find_record_ids(&self, scope: &ContentScope) -> Result<Vec<RecordId>, InternalError>;

    async fn find_record(
        &self,
        record_id: RecordId,
        eager_loads: &EagerLoadPlan,
    ) -> Result<Option<ContentRecord>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentScope {
    All,
    Sections(Vec<String>),
}

impl ContentScope {
    pub fn contains_section(&self, section_handle: &str) -> bool {
        match self {
            Self::All => true,
            Self::Sections(handles) => handles.iter().any(|h| h == section_handle),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
