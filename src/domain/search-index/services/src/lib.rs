// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod closed_index_change;
mod content_lifecycle_consumer_impl;
mod delete_orchestrator_impl;
mod dependencies;
mod document_transformer_impl;
pub mod handlers;
mod index_admin_orchestrator_impl;
mod index_definition_store_impl;
mod jobs;
mod maintenance_lock_impl;
pub mod modifiers;
mod reindex_orchestrator_impl;
pub mod reporters;
mod search_handler_registry;
pub mod transformers;

pub use closed_index_change::*;
pub use content_lifecycle_consumer_impl::*;
pub use delete_orchestrator_impl::*;
pub use dependencies::*;
pub use document_transformer_impl::*;
pub use index_admin_orchestrator_impl::*;
pub use index_definition_store_impl::*;
pub use jobs::*;
pub use maintenance_lock_impl::*;
pub use reindex_orchestrator_impl::*;
pub use search_handler_registry::*;
