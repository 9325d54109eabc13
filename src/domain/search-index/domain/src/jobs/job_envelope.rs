// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{RetryPolicy, SearchJobPayload};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchJobId(pub Uuid);

impl SearchJobId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SearchJobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Unit of work held by the job queue. The queue bumps `attempt` every time
/// the job is re-dispatched and drops the envelope once the job succeeds or
/// its policy refuses another attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEnvelope {
    pub job_id: SearchJobId,
    pub payload: SearchJobPayload,
    pub attempt: u32,
    pub ttr_seconds: u64,
    pub max_attempts: u32,
    pub enqueued_at: DateTime<Utc>,
}

impl JobEnvelope {
    pub fn new(payload: SearchJobPayload, policy: RetryPolicy, enqueued_at: DateTime<Utc>) -> Self {
        Self {
            job_id: SearchJobId::new_random(),
            payload,
            attempt: 1,
            ttr_seconds: policy.ttr_seconds,
            max_attempts: policy.max_attempts,
            enqueued_at,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.ttr_seconds, self.max_attempts)
    }

    pub fn next_attempt(mut self) -> Self {
        self.attempt += 1;
        self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// What the queue should do with an envelope after an attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobDisposition {
    Completed,
    Retry,
    Discarded,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
