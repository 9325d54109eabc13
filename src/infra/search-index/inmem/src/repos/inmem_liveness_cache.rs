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

use cms_search::*;
use dill::{Singleton, component, interface, scope};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryLivenessCache {
    entries: Arc<Mutex<HashMap<String, MaintenanceState>>>,
}

#[component(pub)]
#[scope(Singleton)]
#[interface(dyn LivenessCache)]
impl InMemoryLivenessCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl LivenessCache for InMemoryLivenessCache {
    fn get(&self, key: &str) -> Option<MaintenanceState> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, state: MaintenanceState) {
        self.entries.lock().unwrap().insert(key.to_string(), state);
    }

    fn clear(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
