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

use cms_search::*;
use internal_error::InternalError;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const LOCK_KEY_PREFIX: &str = "search:maintenance:";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct MaintenanceLockImpl {
    lease_store: Arc<dyn LeaseStore>,
    liveness_cache: Arc<dyn LivenessCache>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<MaintenanceConfig>,
}

#[dill::component(pub)]
#[dill::interface(dyn MaintenanceLock)]
#[dill::scope(dill::Singleton)]
impl MaintenanceLockImpl {
    pub fn new(
        lease_store: Arc<dyn LeaseStore>,
        liveness_cache: Arc<dyn LivenessCache>,
        time_source: Arc<dyn SystemTimeSource>,
        config: Arc<MaintenanceConfig>,
    ) -> Self {
        Self {
            lease_store,
            liveness_cache,
            time_source,
            config,
        }
    }

    fn lock_key(index_name: &str) -> String {
        format!("{LOCK_KEY_PREFIX}{index_name}")
    }

    async fn try_acquire_once(&self, key: &str, holder: &str) -> Result<bool, InternalError> {
        if !self
            .lease_store
            .try_acquire(key, holder, self.config.lease_ttl())
            .await?
        {
            return Ok(false);
        }

        self.liveness_cache.set(
            key,
            MaintenanceState {
                locked: true,
                holder: holder.to_string(),
                holder_registered_at: self.time_source.now(),
            },
        );

        Ok(true)
    }

    /// Leaves the flag alone when another holder has taken the lock over
    fn clear_flag_of(&self, key: &str, holder: &str) {
        match self.liveness_cache.get(key) {
            Some(state) if state.holder != holder => tracing::debug!(
                %key,
                %holder,
                current_holder = %state.holder,
                "Liveness flag belongs to another holder",
            ),
            Some(_) => self.liveness_cache.clear(key),
            None => {}
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl MaintenanceLock for MaintenanceLockImpl {
    #[tracing::instrument(
        level = "debug",
        name = "MaintenanceLockImpl::acquire",
        skip_all,
        fields(%index_name, timeout_ms = timeout.as_millis())
    )]
    async fn acquire(
        &self,
        index_name: &str,
        timeout: Duration,
    ) -> Result<Option<String>, InternalError> {
        let key = Self::lock_key(index_name);
        let holder = uuid::Uuid::new_v4().to_string();
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.try_acquire_once(&key, &holder).await? {
                tracing::info!(%index_name, %holder, "Acquired index maintenance lock");
                return Ok(Some(holder));
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                tracing::info!(%index_name, "Index maintenance lock is busy, giving up");
                return Ok(None);
            }

            tokio::time::sleep(self.config.poll_interval().min(deadline - now)).await;
        }
    }

    #[tracing::instrument(
        level = "debug",
        name = "MaintenanceLockImpl::release",
        skip_all,
        fields(%index_name)
    )]
    async fn release(&self, index_name: &str, holder: &str) -> Result<bool, InternalError> {
        let key = Self::lock_key(index_name);

        // Flag goes first so a failing lease store cannot leave it behind
        self.clear_flag_of(&key, holder);

        let released = self.lease_store.release(&key, holder).await?;
        if released {
            tracing::info!(%index_name, %holder, "Released index maintenance lock");
        } else {
            tracing::warn!(%index_name, %holder, "Index maintenance lease was lost before release");
        }

        Ok(released)
    }

    fn is_under_maintenance(&self, index_name: &str) -> bool {
        self.liveness_cache
            .get(&Self::lock_key(index_name))
            .is_some_and(|state| state.locked)
    }

    fn clear_liveness(&self, index_name: &str, holder: &str) {
        self.clear_flag_of(&Self::lock_key(index_name), holder);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
