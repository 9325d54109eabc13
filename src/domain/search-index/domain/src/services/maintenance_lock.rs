// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Per-index mutual exclusion for structural index mutations.
///
/// Backed by a distributed lease plus a liveness flag in a shared cache. The
/// flag is only ever set after a successful acquisition and is cleared on
/// release even if releasing the lease fails. Every acquisition is identified
/// by its own holder token, and release only affects the lock when the token
/// still owns it.
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait MaintenanceLock: Send + Sync {
    /// Waits up to `timeout` for the lock. Returns the holder token on
    /// success.
    async fn acquire(
        &self,
        index_name: &str,
        timeout: Duration,
    ) -> Result<Option<String>, InternalError>;

    /// Returns `false` when `holder` no longer owns the lease
    async fn release(&self, index_name: &str, holder: &str) -> Result<bool, InternalError>;

    /// Advisory read of the liveness flag
    fn is_under_maintenance(&self, index_name: &str) -> bool;

    /// Clears the liveness flag if it still belongs to `holder`. The lease
    /// is not touched.
    fn clear_liveness(&self, index_name: &str, holder: &str);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Holds the maintenance lock of one index. Dropping the guard without
/// calling [`MaintenanceLockGuard::release`] (panic, cancelled future,
/// time-to-run exceeded) clears the liveness flag and, when a tokio runtime
/// is available, releases the lease in the background.
pub struct MaintenanceLockGuard {
    lock: Arc<dyn MaintenanceLock>,
    index_name: String,
    holder: String,
    armed: bool,
}

impl MaintenanceLockGuard {
    pub async fn acquire(
        lock: Arc<dyn MaintenanceLock>,
        index_name: &str,
        timeout: Duration,
    ) -> Result<Option<Self>, InternalError> {
        let Some(holder) = lock.acquire(index_name, timeout).await? else {
            return Ok(None);
        };

        Ok(Some(Self {
            lock,
            index_name: index_name.to_string(),
            holder,
            armed: true,
        }))
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub async fn release(mut self) -> Result<bool, InternalError> {
        self.armed = false;
        self.lock.release(&self.index_name, &self.holder).await
    }
}

impl Drop for MaintenanceLockGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        tracing::warn!(
            index_name = %self.index_name,
            holder = %self.holder,
            "Maintenance lock holder exited abnormally, clearing liveness flag",
        );
        self.lock.clear_liveness(&self.index_name, &self.holder);

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                index_name = %self.index_name,
                "No runtime to release the maintenance lease on, leaving it to expire",
            );
            return;
        };

        let lock = self.lock.clone();
        let index_name = std::mem::take(&mut self.index_name);
        let holder = std::mem::take(&mut self.holder);
        handle.spawn(async move {
            match lock.release(&index_name, &holder).await {
                Ok(released) => tracing::info!(
                    %index_name,
                    %holder,
                    released,
                    "Released abandoned maintenance lease",
                ),
                Err(err) => tracing::error!(
                    %index_name,
                    %holder,
                    error = ?err,
                    "Failed to release abandoned maintenance lease",
                ),
            }
        });
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
