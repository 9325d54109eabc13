// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{RetryPolicy, SearchJobKind};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Retry policies of the queued search jobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SearchJobsConfig {
    pub update: RetryPolicy,
    pub index_admin: RetryPolicy,
    pub delete: RetryPolicy,
}

impl SearchJobsConfig {
    pub fn policy_for(&self, kind: SearchJobKind) -> RetryPolicy {
        match kind {
            SearchJobKind::Update => self.update,
            SearchJobKind::IndexAdmin => self.index_admin,
            SearchJobKind::Delete => self.delete,
        }
    }
}

impl Default for SearchJobsConfig {
    fn default() -> Self {
        Self {
            update: RetryPolicy::new(3600, 3),
            index_admin: RetryPolicy::new(300, 3),
            delete: RetryPolicy::new(60, 3),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
