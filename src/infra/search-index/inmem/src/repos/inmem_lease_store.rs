// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cms_search::*;
use dill::{Singleton, component, interface, scope};
use internal_error::{InternalError, ResultIntoInternal};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Leases with expiry judged against the injected clock
pub struct InMemoryLeaseStore {
    time_source: Arc<dyn SystemTimeSource>,
    leases: Arc<Mutex<HashMap<String, Lease>>>,
}

#[component(pub)]
#[scope(Singleton)]
#[interface(dyn LeaseStore)]
impl InMemoryLeaseStore {
    pub fn new(time_source: Arc<dyn SystemTimeSource>) -> Self {
        Self {
            time_source,
            leases: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl LeaseStore for InMemoryLeaseStore {
    async fn try_acquire(
        &self,
        key: &str,
        holder: &str,
        ttl: Duration,
    ) -> Result<bool, InternalError> {
        let ttl = chrono::Duration::from_std(ttl).int_err()?;
        let now = self.time_source.now();

        let mut leases = self.leases.lock().unwrap();

        let held_by_other = leases
            .get(key)
            .is_some_and(|existing| existing.holder != holder && existing.expires_at > now);
        if held_by_other {
            return Ok(false);
        }

        leases.insert(
            key.to_string(),
            Lease {
                key: key.to_string(),
                holder: holder.to_string(),
                acquired_at: now,
                expires_at: now + ttl,
            },
        );

        Ok(true)
    }

    async fn release(&self, key: &str, holder: &str) -> Result<bool, InternalError> {
        let mut leases = self.leases.lock().unwrap();

        match leases.get(key) {
            Some(lease) if lease.holder == holder => {
                leases.remove(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get_lease(&self, key: &str) -> Result<Option<Lease>, InternalError> {
        let now = self.time_source.now();
        let leases = self.leases.lock().unwrap();

        Ok(leases.get(key).filter(|l| l.expires_at > now).cloned())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
