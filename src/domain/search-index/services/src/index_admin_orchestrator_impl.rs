// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;
use std::sync::Arc;

use cms_search::*;

use crate::{ClosedIndexChange, SearchHandlerRegistry, apply_closed_index_change};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct IndexAdminOrchestratorImpl {
    index_definition_store: Arc<dyn IndexDefinitionStore>,
    search_handler_registry: Arc<SearchHandlerRegistry>,
    search_engine_gateway: Arc<dyn SearchEngineGateway>,
    maintenance_lock: Arc<dyn MaintenanceLock>,
    error_reporter: Arc<dyn ErrorReporter>,
    config: Arc<MaintenanceConfig>,
}

#[dill::component(pub)]
#[dill::interface(dyn IndexAdminOrchestrator)]
impl IndexAdminOrchestratorImpl {
    pub fn new(
        index_definition_store: Arc<dyn IndexDefinitionStore>,
        search_handler_registry: Arc<SearchHandlerRegistry>,
        search_engine_gateway: Arc<dyn SearchEngineGateway>,
        maintenance_lock: Arc<dyn MaintenanceLock>,
        error_reporter: Arc<dyn ErrorReporter>,
        config: Arc<MaintenanceConfig>,
    ) -> Self {
        Self {
            index_definition_store,
            search_handler_registry,
            search_engine_gateway,
            maintenance_lock,
            error_reporter,
            config,
        }
    }

    async fn execute_locked(
        &self,
        index_name: &str,
        action: &str,
    ) -> Result<IndexAdminOutcome, SearchJobError> {
        let action = IndexAdminAction::from_str(action).map_err(ConfigurationError::from)?;
        let definition = self.index_definition_store.resolve_mutable(index_name)?;

        self.search_handler_registry
            .cache()
            .resolve(&definition.search_handler)?;

        let physical_name = &definition.physical_name;
        tracing::info!(%action, %physical_name, "Running index action");

        match action {
            IndexAdminAction::Create => {
                if self.search_engine_gateway.index_exists(physical_name).await? {
                    return Ok(IndexAdminOutcome::AlreadyExists);
                }
                self.create(&definition).await?;
                Ok(IndexAdminOutcome::Created)
            }
            IndexAdminAction::UpdateMapping => {
                if !self.search_engine_gateway.index_exists(physical_name).await? {
                    self.create(&definition).await?;
                    return Ok(IndexAdminOutcome::Created);
                }
                apply_closed_index_change(
                    self.search_engine_gateway.as_ref(),
                    self.error_reporter.as_ref(),
                    physical_name,
                    ClosedIndexChange::Mapping(&definition.field_mapping),
                )
                .await?;
                Ok(IndexAdminOutcome::MappingUpdated)
            }
            IndexAdminAction::UpdateSettings => {
                if !self.search_engine_gateway.index_exists(physical_name).await? {
                    self.create(&definition).await?;
                    return Ok(IndexAdminOutcome::Created);
                }
                apply_closed_index_change(
                    self.search_engine_gateway.as_ref(),
                    self.error_reporter.as_ref(),
                    physical_name,
                    ClosedIndexChange::Settings(&definition.index_settings),
                )
                .await?;
                Ok(IndexAdminOutcome::SettingsUpdated)
            }
            IndexAdminAction::Delete => {
                self.search_engine_gateway
                    .delete_index(physical_name)
                    .await?;
                Ok(IndexAdminOutcome::Deleted)
            }
        }
    }

    async fn create(&self, definition: &IndexDefinition) -> Result<(), SearchJobError> {
        self.search_engine_gateway
            .create_index(
                &definition.physical_name,
                &definition.field_mapping,
                &definition.index_settings,
            )
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IndexAdminOrchestrator for IndexAdminOrchestratorImpl {
    #[tracing::instrument(
        level = "info",
        name = "IndexAdminOrchestrator::execute",
        skip_all,
        fields(%index_name, %action)
    )]
    async fn execute(
        &self,
        index_name: &str,
        action: &str,
    ) -> Result<IndexAdminOutcome, SearchJobError> {
        let lock_name = self.index_definition_store.normalize_name(index_name);

        let Some(guard) = MaintenanceLockGuard::acquire(
            self.maintenance_lock.clone(),
            &lock_name,
            self.config.lock_timeout(),
        )
        .await?
        else {
            tracing::warn!(%lock_name, "Index is under maintenance");
            return Err(LockUnavailableError {
                index_name: lock_name,
                timeout_secs: self.config.lock_timeout_secs,
            }
            .into());
        };

        let res = self.execute_locked(index_name, action).await;

        match guard.release().await {
            Ok(true) => {}
            Ok(false) => tracing::warn!(%lock_name, "Maintenance lease was already gone on release"),
            Err(e) => tracing::error!(
                error = ?e,
                error_msg = %e,
                %lock_name,
                "Failed to release maintenance lease",
            ),
        }

        if let Err(e) = &res {
            tracing::error!(error = ?e, error_msg = %e, "Index action failed");
        }

        res
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
