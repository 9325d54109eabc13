// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::MaintenanceState;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fast-read shared cache entry telling whether an index is under
/// maintenance. Synchronous so that it can be cleared from drop handlers.
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
pub trait LivenessCache: Send + Sync {
    fn get(&self, key: &str) -> Option<MaintenanceState>;

    fn set(&self, key: &str, state: MaintenanceState);

    fn clear(&self, key: &str);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
