// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use cms_search::{DeleteJobArgs, DeleteOrchestrator, RecordId, RefreshPolicy};

use super::{CLIError, Command};
use crate::output::OutputConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct DeleteCommand {
    delete_orchestrator: Arc<dyn DeleteOrchestrator>,
    output_config: Arc<OutputConfig>,
    index_name: String,
    record_id: RecordId,
    refresh: bool,
}

impl DeleteCommand {
    pub fn new(
        delete_orchestrator: Arc<dyn DeleteOrchestrator>,
        output_config: Arc<OutputConfig>,
        index_name: impl Into<String>,
        record_id: RecordId,
        refresh: bool,
    ) -> Self {
        Self {
            delete_orchestrator,
            output_config,
            index_name: index_name.into(),
            record_id,
            refresh,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Command for DeleteCommand {
    async fn run(&mut self) -> Result<(), CLIError> {
        let outcome = self
            .delete_orchestrator
            .delete_record(&DeleteJobArgs {
                index_name: self.index_name.clone(),
                record_id: self.record_id,
                refresh_policy: if self.refresh {
                    RefreshPolicy::Immediate
                } else {
                    RefreshPolicy::None
                },
            })
            .await?;

        if !self.output_config.quiet {
            if outcome.removed_from.is_empty() {
                eprintln!(
                    "{}",
                    console::style(format!("Record {} was not indexed", self.record_id)).yellow()
                );
            } else {
                eprintln!(
                    "{}",
                    console::style(format!(
                        "Removed record {} from: {}",
                        self.record_id,
                        outcome.removed_from.join(", ")
                    ))
                    .green()
                    .bold()
                );
            }
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
