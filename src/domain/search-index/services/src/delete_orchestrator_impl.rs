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

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct DeleteOrchestratorImpl {
    index_definition_store: Arc<dyn IndexDefinitionStore>,
    search_engine_gateway: Arc<dyn SearchEngineGateway>,
    error_reporter: Arc<dyn ErrorReporter>,
}

#[dill::component(pub)]
#[dill::interface(dyn DeleteOrchestrator)]
impl DeleteOrchestratorImpl {
    pub fn new(
        index_definition_store: Arc<dyn IndexDefinitionStore>,
        search_engine_gateway: Arc<dyn SearchEngineGateway>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            index_definition_store,
            search_engine_gateway,
            error_reporter,
        }
    }

    fn deletion_targets(&self, definition: &IndexDefinition) -> Vec<String> {
        let mut targets = Vec::new();

        if definition.auto_index {
            targets.push(definition.physical_name.clone());
        }

        for sayt in self.index_definition_store.definitions_of_type(IndexType::Sayt) {
            if sayt.auto_index && !targets.contains(&sayt.physical_name) {
                targets.push(sayt.physical_name.clone());
            }
        }

        targets
    }
}

#[async_trait::async_trait]
impl DeleteOrchestrator for DeleteOrchestratorImpl {
    #[tracing::instrument(
        level = "info",
        name = "DeleteOrchestrator::delete_record",
        skip_all,
        fields(index_name = %args.index_name, record_id = %args.record_id)
    )]
    async fn delete_record(&self, args: &DeleteJobArgs) -> Result<DeleteOutcome, SearchJobError> {
        let definition = self
            .index_definition_store
            .resolve_mutable(&args.index_name)?;

        let document_id = args.record_id.as_document_id();

        let mut outcome = DeleteOutcome::default();
        let mut failures = Vec::new();

        for index_name in self.deletion_targets(&definition) {
            match self
                .search_engine_gateway
                .delete_document(&index_name, &document_id, args.refresh_policy)
                .await
            {
                Ok(true) => outcome.removed_from.push(index_name),
                Ok(false) => outcome.absent_from.push(index_name),
                Err(e) => {
                    tracing::error!(
                        error = ?e,
                        error_msg = %e,
                        %index_name,
                        "Failed to delete document",
                    );
                    self.error_reporter.report(
                        ErrorReport::error(e.to_string())
                            .with_context("index_name", &index_name)
                            .with_context("record_id", args.record_id),
                    );
                    failures.push(e);
                }
            }
        }

        if !failures.is_empty() {
            return Err(DeletionIncompleteError {
                record_id: args.record_id,
                failures,
            }
            .into());
        }

        Ok(outcome)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
