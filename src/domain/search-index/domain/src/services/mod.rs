// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod content_lifecycle_consumer;
mod delete_orchestrator;
mod document_transformer;
mod eager_load_modifier;
mod error_reporter;
mod field_transformer;
mod index_admin_orchestrator;
mod index_definition_store;
mod maintenance_lock;
mod progress_reporter;
mod reindex_orchestrator;
mod search_engine_gateway;
mod search_handler;

pub use content_lifecycle_consumer::*;
pub use delete_orchestrator::*;
pub use document_transformer::*;
pub use eager_load_modifier::*;
pub use error_reporter::*;
pub use field_transformer::*;
pub use index_admin_orchestrator::*;
pub use index_definition_store::*;
pub use maintenance_lock::*;
pub use progress_reporter::*;
pub use reindex_orchestrator::*;
pub use search_engine_gateway::*;
pub use search_handler::*;
