// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use cms_search::*;

use crate::{ClosedIndexChange, SearchHandlerRegistry, apply_closed_index_change};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ReindexOrchestratorImpl {
    index_definition_store: Arc<dyn IndexDefinitionStore>,
    search_handler_registry: Arc<SearchHandlerRegistry>,
    search_engine_gateway: Arc<dyn SearchEngineGateway>,
    document_transformer: Arc<dyn DocumentTransformer>,
    content_repo: Arc<dyn ContentRepository>,
    error_reporter: Arc<dyn ErrorReporter>,
}

#[dill::component(pub)]
#[dill::interface(dyn ReindexOrchestrator)]
impl ReindexOrchestratorImpl {
    pub fn new(
        index_definition_store: Arc<dyn IndexDefinitionStore>,
        search_handler_registry: Arc<SearchHandlerRegistry>,
        search_engine_gateway: Arc<dyn SearchEngineGateway>,
        document_transformer: Arc<dyn DocumentTransformer>,
        content_repo: Arc<dyn ContentRepository>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            index_definition_store,
            search_handler_registry,
            search_engine_gateway,
            document_transformer,
            content_repo,
            error_reporter,
        }
    }

    async fn ensure_index(&self, definition: &IndexDefinition) -> Result<(), SearchJobError> {
        let index_name = &definition.physical_name;

        if !self.search_engine_gateway.index_exists(index_name).await? {
            tracing::info!(%index_name, "Creating missing index");
            self.search_engine_gateway
                .create_index(
                    index_name,
                    &definition.field_mapping,
                    &definition.index_settings,
                )
                .await?;
            return Ok(());
        }

        apply_closed_index_change(
            self.search_engine_gateway.as_ref(),
            self.error_reporter.as_ref(),
            index_name,
            ClosedIndexChange::Mapping(&definition.field_mapping),
        )
        .await
    }

    async fn working_set(
        &self,
        definition: &IndexDefinition,
        args: &UpdateJobArgs,
    ) -> Result<Vec<RecordId>, SearchJobError> {
        if let Some(record_ids) = &args.record_ids {
            return Ok(record_ids.clone());
        }

        let scope = if definition.covers_all_sections() {
            ContentScope::All
        } else {
            ContentScope::Sections(definition.section_handles.clone())
        };

        Ok(self.content_repo.find_record_ids(&scope).await?)
    }

    async fn reconcile_record(
        &self,
        definition: &IndexDefinition,
        handler: &dyn SearchHandler,
        eager_loads: &EagerLoadPlan,
        refresh: RefreshPolicy,
        record_id: RecordId,
    ) -> Result<RecordOutcome, RecordError> {
        let index_name = &definition.physical_name;
        let document_id = record_id.as_document_id();

        let Some(record) = self
            .content_repo
            .find_record(record_id, eager_loads)
            .await
            .map_err(|e| RecordError(e.reason()))?
        else {
            tracing::warn!(%record_id, "Record vanished before it could be indexed");
            return Ok(RecordOutcome::Missing);
        };

        if !handler.is_allowed_in_index(definition, &record) {
            if self
                .search_engine_gateway
                .document_exists(index_name, &document_id)
                .await?
            {
                self.search_engine_gateway
                    .delete_document(index_name, &document_id, refresh)
                    .await?;
                return Ok(RecordOutcome::Removed);
            }
            return Ok(RecordOutcome::Unchanged);
        }

        let document = self
            .document_transformer
            .transform(definition, &record)
            .map_err(|e| RecordError(e.to_string()))?;

        if is_document_empty(&document) {
            tracing::debug!(%record_id, "Skipping empty document");
            return Ok(RecordOutcome::Unchanged);
        }

        if self
            .search_engine_gateway
            .document_exists(index_name, &document_id)
            .await?
        {
            self.search_engine_gateway
                .update_document(index_name, &document_id, &document, refresh)
                .await?;
        } else {
            self.search_engine_gateway
                .index_document(index_name, &document_id, &document, refresh)
                .await?;
        }

        Ok(RecordOutcome::Upserted)
    }
}

#[async_trait::async_trait]
impl ReindexOrchestrator for ReindexOrchestratorImpl {
    #[tracing::instrument(
        level = "info",
        name = "ReindexOrchestrator::reindex",
        skip_all,
        fields(index_name = %args.index_name, ?mode)
    )]
    async fn reindex(
        &self,
        args: &UpdateJobArgs,
        mode: ProgressMode,
        progress: &dyn ProgressReporter,
    ) -> Result<ReindexOutcome, SearchJobError> {
        let definition = self
            .index_definition_store
            .resolve_mutable(&args.index_name)?;

        let handler = self
            .search_handler_registry
            .cache()
            .resolve(&definition.search_handler)?;

        if args.delete_index_first {
            tracing::info!(index_name = %definition.physical_name, "Deleting index before rebuild");
            self.search_engine_gateway
                .delete_index(&definition.physical_name)
                .await?;
        }

        self.ensure_index(&definition).await?;

        let eager_loads = definition.eager_load_plan(args.include_disabled_related);
        let record_ids = self.working_set(&definition, args).await?;

        let mut outcome = ReindexOutcome {
            total: record_ids.len(),
            ..Default::default()
        };

        tracing::info!(total = outcome.total, ?eager_loads, "Reindexing records");

        if outcome.total == 0 {
            progress.report_progress(0, 0);
        }

        for record_id in record_ids {
            match self
                .reconcile_record(
                    &definition,
                    handler.as_ref(),
                    &eager_loads,
                    args.refresh_policy,
                    record_id,
                )
                .await
            {
                Ok(RecordOutcome::Upserted) => outcome.upserted += 1,
                Ok(RecordOutcome::Removed) => outcome.removed += 1,
                Ok(RecordOutcome::Unchanged) => outcome.unchanged += 1,
                Ok(RecordOutcome::Missing) => outcome.missing += 1,
                Err(RecordError(reason)) => {
                    tracing::warn!(%record_id, %reason, "Failed to index record, skipping");
                    self.error_reporter.report(
                        ErrorReport::error(reason)
                            .with_context("index_name", &definition.name)
                            .with_context("record_id", record_id),
                    );
                    outcome.failed += 1;
                }
            }

            outcome.processed += 1;
            if mode.should_report(outcome.processed, outcome.total) {
                progress.report_progress(outcome.processed, outcome.total);
            }
        }

        tracing::info!(?outcome, "Reindex finished");

        Ok(outcome)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

enum RecordOutcome {
    Upserted,
    Removed,
    Unchanged,
    Missing,
}

/// Failure confined to one record
struct RecordError(String);

impl From<EngineCommunicationError> for RecordError {
    fn from(value: EngineCommunicationError) -> Self {
        Self(value.to_string())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
