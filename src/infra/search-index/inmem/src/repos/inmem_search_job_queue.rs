// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use cms_search::*;
use dill::{Singleton, component, interface, scope};
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// FIFO queue with at-least-once delivery: a dequeued envelope stays in
/// flight until it is acknowledged or put back for another attempt
pub struct InMemorySearchJobQueue {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    pending: VecDeque<JobEnvelope>,
    in_flight: HashMap<SearchJobId, JobEnvelope>,
    acknowledged: Vec<JobEnvelope>,
}

#[component(pub)]
#[scope(Singleton)]
#[interface(dyn SearchJobQueue)]
impl InMemorySearchJobQueue {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn pending(&self) -> Vec<JobEnvelope> {
        self.state.lock().unwrap().pending.iter().cloned().collect()
    }

    pub fn acknowledged(&self) -> Vec<JobEnvelope> {
        self.state.lock().unwrap().acknowledged.clone()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchJobQueue for InMemorySearchJobQueue {
    async fn enqueue(&self, envelope: JobEnvelope) -> Result<SearchJobId, InternalError> {
        let job_id = envelope.job_id;
        self.state.lock().unwrap().pending.push_back(envelope);
        Ok(job_id)
    }

    async fn dequeue(&self) -> Result<Option<JobEnvelope>, InternalError> {
        let mut state = self.state.lock().unwrap();

        let Some(envelope) = state.pending.pop_front() else {
            return Ok(None);
        };

        state.in_flight.insert(envelope.job_id, envelope.clone());
        Ok(Some(envelope))
    }

    async fn acknowledge(&self, job_id: SearchJobId) -> Result<(), InternalError> {
        let mut state = self.state.lock().unwrap();

        let Some(envelope) = state.in_flight.remove(&job_id) else {
            return InternalError::bail(format!("Job {job_id} is not in flight"));
        };

        state.acknowledged.push(envelope);
        Ok(())
    }

    async fn schedule_retry(&self, job_id: SearchJobId) -> Result<(), InternalError> {
        let mut state = self.state.lock().unwrap();

        let Some(envelope) = state.in_flight.remove(&job_id) else {
            return InternalError::bail(format!("Job {job_id} is not in flight"));
        };

        state.pending.push_back(envelope.next_attempt());
        Ok(())
    }

    async fn pending_count(&self) -> Result<usize, InternalError> {
        Ok(self.state.lock().unwrap().pending.len())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
