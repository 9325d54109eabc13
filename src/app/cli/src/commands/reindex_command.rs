// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;
use std::sync::Arc;

use cms_search::*;
use cms_search_inmem::InMemoryContentRepository;
use cms_search_services::SearchJobWorker;
use time_source::SystemTimeSource;

use super::{CLIError, Command};
use crate::load_content_export;
use crate::output::{OutputConfig, ReindexProgress};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(thiserror::Error, Debug)]
#[error("{failed} of {total} record(s) could not be indexed into '{index_name}'")]
pub struct RecordsFailedError {
    pub index_name: String,
    pub failed: usize,
    pub total: usize,
}

#[derive(thiserror::Error, Debug)]
#[error("Reindex job for '{index_name}' was discarded, see the error log for details")]
pub struct ReindexJobDiscardedError {
    pub index_name: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ReindexCommand {
    content_repo: Arc<InMemoryContentRepository>,
    reindex_orchestrator: Arc<dyn ReindexOrchestrator>,
    search_job_queue: Arc<dyn SearchJobQueue>,
    search_job_worker: Arc<SearchJobWorker>,
    jobs_config: Arc<SearchJobsConfig>,
    time_source: Arc<dyn SystemTimeSource>,
    output_config: Arc<OutputConfig>,
    content_path: PathBuf,
    args: UpdateJobArgs,
    background: bool,
}

impl ReindexCommand {
    pub fn new(
        content_repo: Arc<InMemoryContentRepository>,
        reindex_orchestrator: Arc<dyn ReindexOrchestrator>,
        search_job_queue: Arc<dyn SearchJobQueue>,
        search_job_worker: Arc<SearchJobWorker>,
        jobs_config: Arc<SearchJobsConfig>,
        time_source: Arc<dyn SystemTimeSource>,
        output_config: Arc<OutputConfig>,
        content_path: PathBuf,
        args: UpdateJobArgs,
        background: bool,
    ) -> Self {
        Self {
            content_repo,
            reindex_orchestrator,
            search_job_queue,
            search_job_worker,
            jobs_config,
            time_source,
            output_config,
            content_path,
            args,
            background,
        }
    }

    async fn run_foreground(&self) -> Result<(), CLIError> {
        let progress = ReindexProgress::new(&self.args.index_name, self.output_config.show_progress());

        let outcome = match self
            .reindex_orchestrator
            .reindex(&self.args, ProgressMode::Foreground, &progress)
            .await
        {
            Ok(outcome) => {
                progress.finish();
                outcome
            }
            Err(e) => {
                progress.abandon();
                return Err(e.into());
            }
        };

        if !self.output_config.quiet {
            eprintln!(
                "{}",
                console::style(format!(
                    "Processed {}/{} record(s): {} indexed, {} removed, {} unchanged, {} missing, {} \
                     failed",
                    outcome.processed,
                    outcome.total,
                    outcome.upserted,
                    outcome.removed,
                    outcome.unchanged,
                    outcome.missing,
                    outcome.failed,
                ))
                .bold()
            );
        }

        if outcome.failed > 0 {
            return Err(CLIError::failure(RecordsFailedError {
                index_name: self.args.index_name.clone(),
                failed: outcome.failed,
                total: outcome.total,
            }));
        }

        Ok(())
    }

    async fn run_background(&self) -> Result<(), CLIError> {
        let envelope = JobEnvelope::new(
            SearchJobPayload::Update(self.args.clone()),
            self.jobs_config.update,
            self.time_source.now(),
        );
        let job_id = self.search_job_queue.enqueue(envelope).await?;
        tracing::info!(%job_id, "Enqueued reindex job");

        let stats = self.search_job_worker.run_until_idle().await?;

        if !self.output_config.quiet {
            eprintln!(
                "{}",
                console::style(format!(
                    "Jobs: {} completed, {} retried, {} discarded",
                    stats.completed, stats.retried, stats.discarded
                ))
                .bold()
            );
        }

        if stats.discarded > 0 {
            return Err(CLIError::failure(ReindexJobDiscardedError {
                index_name: self.args.index_name.clone(),
            }));
        }

        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl Command for ReindexCommand {
    async fn run(&mut self) -> Result<(), CLIError> {
        for record in load_content_export(&self.content_path)? {
            self.content_repo.put_record(record);
        }

        if self.background {
            self.run_background().await
        } else {
            self.run_foreground().await
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
