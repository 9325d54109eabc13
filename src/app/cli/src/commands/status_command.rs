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

use super::{CLIError, Command};
use crate::output::{add_table_row, new_table};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct StatusCommand {
    index_definition_store: Arc<dyn IndexDefinitionStore>,
    search_engine_gateway: Arc<dyn SearchEngineGateway>,
    maintenance_lock: Arc<dyn MaintenanceLock>,
    index_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStatus {
    pub physical_name: String,
    pub exists: bool,
    pub num_documents: Option<u64>,
}

impl StatusCommand {
    pub fn new(
        index_definition_store: Arc<dyn IndexDefinitionStore>,
        search_engine_gateway: Arc<dyn SearchEngineGateway>,
        maintenance_lock: Arc<dyn MaintenanceLock>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            index_definition_store,
            search_engine_gateway,
            maintenance_lock,
            index_name: index_name.into(),
        }
    }

    /// Existence and document count of every physical index behind a
    /// definition
    pub async fn collect(
        &self,
        definition: &IndexDefinition,
    ) -> Result<Vec<IndexStatus>, EngineCommunicationError> {
        let physical_names = match definition.index_type {
            IndexType::All => self.index_definition_store.all_section_index_names(),
            IndexType::Section | IndexType::Sayt => vec![definition.physical_name.clone()],
        };

        let count_query = serde_json::json!({
            "size": 0,
            "track_total_hits": true,
            "query": { "match_all": {} },
        });

        let mut statuses = Vec::with_capacity(physical_names.len());
        for physical_name in physical_names {
            let exists = self
                .search_engine_gateway
                .index_exists(&physical_name)
                .await?;

            let num_documents = if exists {
                let hits = self
                    .search_engine_gateway
                    .search(&physical_name, &count_query)
                    .await?;
                Some(hits.total)
            } else {
                None
            };

            statuses.push(IndexStatus {
                physical_name,
                exists,
                num_documents,
            });
        }

        Ok(statuses)
    }
}

#[async_trait::async_trait(?Send)]
impl Command for StatusCommand {
    async fn run(&mut self) -> Result<(), CLIError> {
        let definition = self
            .index_definition_store
            .get_by_name(&self.index_name, true)
            .ok_or_else(|| {
                CLIError::usage_error_from(ConfigurationError::IndexNotFound {
                    index_name: self.index_name.clone(),
                })
            })?;

        let statuses = self.collect(&definition).await.map_err(CLIError::failure)?;

        let under_maintenance = self
            .maintenance_lock
            .is_under_maintenance(&definition.name);

        let mut table = new_table(&["Physical name", "Exists", "Documents", "Maintenance"]);
        for status in &statuses {
            add_table_row(
                &mut table,
                &[
                    status.physical_name.clone(),
                    if status.exists { "yes" } else { "no" }.to_string(),
                    status
                        .num_documents
                        .map_or_else(|| "-".to_string(), |n| n.to_string()),
                    if under_maintenance { "locked" } else { "-" }.to_string(),
                ],
            );
        }

        println!(
            "{} ({}, {})",
            console::style(&definition.label).bold(),
            definition.name,
            definition.index_type
        );
        table.printstd();

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
