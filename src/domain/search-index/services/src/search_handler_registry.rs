// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::Arc;

use cms_search::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// All registered search handlers
#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
pub struct SearchHandlerRegistry {
    handlers: Vec<Arc<dyn SearchHandler>>,
}

impl SearchHandlerRegistry {
    /// Resolution cache for a single job invocation
    pub fn cache(&self) -> SearchHandlerCache<'_> {
        SearchHandlerCache {
            registry: self,
            resolved: HashMap::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SearchHandlerCache<'a> {
    registry: &'a SearchHandlerRegistry,
    resolved: HashMap<String, Arc<dyn SearchHandler>>,
}

impl SearchHandlerCache<'_> {
    pub fn resolve(&mut self, name: &str) -> Result<Arc<dyn SearchHandler>, ConfigurationError> {
        if let Some(handler) = self.resolved.get(name) {
            return Ok(Arc::clone(handler));
        }

        let handler = self
            .registry
            .handlers
            .iter()
            .find(|h| h.name() == name)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownSearchHandler {
                handler: name.to_string(),
            })?;

        self.resolved.insert(name.to_string(), Arc::clone(&handler));
        Ok(handler)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
