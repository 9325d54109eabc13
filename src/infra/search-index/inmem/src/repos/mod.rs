// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod inmem_content_repository;
mod inmem_lease_store;
mod inmem_liveness_cache;
mod inmem_search_job_queue;

pub use inmem_content_repository::*;
pub use inmem_lease_store::*;
pub use inmem_liveness_cache::*;
pub use inmem_search_job_queue::*;
