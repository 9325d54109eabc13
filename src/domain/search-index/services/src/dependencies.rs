// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::CatalogBuilder;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Registers the services and the built-in strategies. Callers still provide
/// the configs, the infrastructure adapters and an [`cms_search::ErrorReporter`]
/// unless [`TracingErrorReporter`] is wanted.
pub fn register_dependencies(b: &mut CatalogBuilder) {
    b.add::<IndexDefinitionStoreImpl>();
    b.add::<SearchHandlerRegistry>();
    b.add::<DocumentTransformerImpl>();
    b.add::<MaintenanceLockImpl>();

    b.add::<ReindexOrchestratorImpl>();
    b.add::<IndexAdminOrchestratorImpl>();
    b.add::<DeleteOrchestratorImpl>();
    b.add::<SearchAutoIndexer>();

    b.add::<SearchJobRunner>();
    b.add::<SearchJobWorker>();

    b.add::<handlers::DefaultSearchHandler>();
    b.add::<handlers::SaytSearchHandler>();

    b.add::<transformers::RelatedIdsTransformer>();
    b.add::<transformers::RelatedCountTransformer>();
    b.add::<transformers::SectionHandleTransformer>();
    b.add::<transformers::TitleSuggestTransformer>();

    b.add::<modifiers::IncludeDisabledRelatedModifier>();
    b.add::<modifiers::WithAuthorModifier>();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
