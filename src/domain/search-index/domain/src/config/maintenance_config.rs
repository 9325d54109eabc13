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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MaintenanceConfig {
    /// How long an admin job waits for the index lock
    pub lock_timeout_secs: u64,

    /// Expiry of the distributed lease. Bounds how long a crashed holder can
    /// keep other admin jobs out.
    pub lease_ttl_secs: u64,

    /// Delay between lease acquisition attempts
    pub poll_interval_ms: u64,
}

impl MaintenanceConfig {
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_secs)
    }

    pub fn lease_ttl(&self) -> Duration {
        Duration::from_secs(self.lease_ttl_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            lock_timeout_secs: 30,
            lease_ttl_secs: 600,
            poll_interval_ms: 100,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
