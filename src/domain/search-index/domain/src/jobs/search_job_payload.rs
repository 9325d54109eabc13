// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{RecordId, RefreshPolicy};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SearchJobKind {
    Update,
    IndexAdmin,
    Delete,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchJobPayload {
    /// Reconcile records of an index with the content store
    Update(UpdateJobArgs),

    /// Run one structural action on an index
    IndexAdmin(IndexAdminJobArgs),

    /// Remove one record from its index and auto-indexed SAYT indexes
    Delete(DeleteJobArgs),
}

impl SearchJobPayload {
    pub fn kind(&self) -> SearchJobKind {
        match self {
            Self::Update(_) => SearchJobKind::Update,
            Self::IndexAdmin(_) => SearchJobKind::IndexAdmin,
            Self::Delete(_) => SearchJobKind::Delete,
        }
    }

    pub fn index_name(&self) -> &str {
        match self {
            Self::Update(args) => &args.index_name,
            Self::IndexAdmin(args) => &args.index_name,
            Self::Delete(args) => &args.index_name,
        }
    }

    pub fn record_ids(&self) -> Vec<RecordId> {
        match self {
            Self::Update(args) => args.record_ids.clone().unwrap_or_default(),
            Self::IndexAdmin(_) => Vec::new(),
            Self::Delete(args) => vec![args.record_id],
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateJobArgs {
    pub index_name: String,

    /// Restricts reconciliation to these records. `None` means every record
    /// in the index's scope.
    #[serde(default)]
    pub record_ids: Option<Vec<RecordId>>,

    #[serde(default)]
    pub delete_index_first: bool,

    #[serde(default)]
    pub refresh_policy: RefreshPolicy,

    #[serde(default)]
    pub include_disabled_related: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAdminJobArgs {
    pub index_name: String,

    /// Checked against the action allow-list when the job runs
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteJobArgs {
    pub index_name: String,
    pub record_id: RecordId,

    #[serde(default)]
    pub refresh_policy: RefreshPolicy,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
