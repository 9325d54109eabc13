// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// When written documents become visible to searches
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RefreshPolicy {
    /// Leave it to the engine's periodic refresh
    #[default]
    None,
    /// Block the write until the next refresh makes it visible
    WaitFor,
    /// Force a refresh right after the write
    Immediate,
}

impl RefreshPolicy {
    /// Value of the `refresh` query parameter understood by the engine
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::None => "false",
            Self::WaitFor => "wait_for",
            Self::Immediate => "true",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
