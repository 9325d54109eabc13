// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod job_envelope;
mod retry_policy;
mod search_job_payload;

pub use job_envelope::*;
pub use retry_policy::*;
pub use search_job_payload::*;
