// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod content_repository;
mod lease_store;
mod liveness_cache;
mod search_job_queue;

pub use content_repository::*;
pub use lease_store::*;
pub use liveness_cache::*;
pub use search_job_queue::*;
