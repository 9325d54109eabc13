// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryPolicy {
    /// Time-to-run budget of a single attempt
    pub ttr_seconds: u64,

    /// Upper bound on the number of attempts, the first one included
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub const fn new(ttr_seconds: u64, max_attempts: u32) -> Self {
        Self {
            ttr_seconds,
            max_attempts,
        }
    }

    pub fn ttr(&self) -> Duration {
        Duration::from_secs(self.ttr_seconds)
    }

    /// Whether an attempt with the given 1-based number may still run
    pub fn can_retry(&self, attempt: u32) -> bool {
        attempt <= self.max_attempts
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
