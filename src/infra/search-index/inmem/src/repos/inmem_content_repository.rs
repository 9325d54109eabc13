// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use cms_search::*;
use dill::{Singleton, component, interface, scope};
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Content store kept in memory. Records every eager-load plan it was asked
/// to honor, and hides disabled related records from eager-loaded relations
/// unless the plan asks for them.
pub struct InMemoryContentRepository {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    records: BTreeMap<RecordId, ContentRecord>,
    requested_plans: Vec<(RecordId, EagerLoadPlan)>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[scope(Singleton)]
#[interface(dyn ContentRepository)]
impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn with_records(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        let repo = Self::new();
        for record in records {
            repo.put_record(record);
        }
        repo
    }

    /// Inserts or replaces a record
    pub fn put_record(&self, record: ContentRecord) {
        let mut state = self.state.lock().unwrap();
        state.records.insert(record.id, record);
    }

    pub fn remove_record(&self, record_id: RecordId) -> Option<ContentRecord> {
        let mut state = self.state.lock().unwrap();
        state.records.remove(&record_id)
    }

    pub fn requested_plans(&self) -> Vec<(RecordId, EagerLoadPlan)> {
        self.state.lock().unwrap().requested_plans.clone()
    }

    fn apply_plan(state: &State, mut record: ContentRecord, plan: &EagerLoadPlan) -> ContentRecord {
        if plan.include_disabled_related {
            return record;
        }

        let disabled: HashSet<RecordId> = state
            .records
            .values()
            .filter(|r| !r.enabled)
            .map(|r| r.id)
            .collect();

        for field in &plan.fields {
            if let Some(ContentValue::ElementCollection(ids)) = record.fields.get_mut(field) {
                ids.retain(|id| !disabled.contains(id));
            }
        }

        record
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn find_record_ids(&self, scope: &ContentScope) -> Result<Vec<RecordId>, InternalError> {
        let state = self.state.lock().unwrap();

        Ok(state
            .records
            .values()
            .filter(|r| scope.contains_section(&r.section_handle))
            .map(|r| r.id)
            .collect())
    }

    async fn find_record(
        &self,
        record_id: RecordId,
        eager_loads: &EagerLoadPlan,
    ) -> Result<Option<ContentRecord>, InternalError> {
        let mut state = self.state.lock().unwrap();
        state.requested_plans.push((record_id, eager_loads.clone()));

        let Some(record) = state.records.get(&record_id).cloned() else {
            return Ok(None);
        };

        Ok(Some(Self::apply_plan(&state, record, eager_loads)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
