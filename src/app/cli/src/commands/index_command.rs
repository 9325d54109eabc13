// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use cms_search::IndexAdminOrchestrator;

use super::{CLIError, Command};
use crate::output::OutputConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct IndexCommand {
    index_admin_orchestrator: Arc<dyn IndexAdminOrchestrator>,
    output_config: Arc<OutputConfig>,
    action: String,
    index_name: String,
}

impl IndexCommand {
    pub fn new(
        index_admin_orchestrator: Arc<dyn IndexAdminOrchestrator>,
        output_config: Arc<OutputConfig>,
        action: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            index_admin_orchestrator,
            output_config,
            action: action.into(),
            index_name: index_name.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Command for IndexCommand {
    async fn run(&mut self) -> Result<(), CLIError> {
        let outcome = self
            .index_admin_orchestrator
            .execute(&self.index_name, &self.action)
            .await?;

        if !self.output_config.quiet {
            eprintln!(
                "{}",
                console::style(format!("Index {}: {outcome}", self.index_name))
                    .green()
                    .bold()
            );
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
