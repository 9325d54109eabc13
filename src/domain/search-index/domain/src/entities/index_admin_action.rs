// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownAdminActionError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Structural operations permitted on a physical index
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum IndexAdminAction {
    Create,
    UpdateMapping,
    UpdateSettings,
    Delete,
}

impl IndexAdminAction {
    pub const ALL: [IndexAdminAction; 4] = [
        Self::Create,
        Self::UpdateMapping,
        Self::UpdateSettings,
        Self::Delete,
    ];
}

impl FromStr for IndexAdminAction {
    type Err = UnknownAdminActionError;

    /// Accepts both the kebab-case and camelCase spellings used by operators
    /// and queued payloads
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "create" | "createIndex" => Ok(Self::Create),
            "update-mapping" | "updateMapping" => Ok(Self::UpdateMapping),
            "update-settings" | "updateSettings" => Ok(Self::UpdateSettings),
            "delete" | "deleteIndex" => Ok(Self::Delete),
            other => Err(UnknownAdminActionError {
                action: other.to_string(),
            }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
