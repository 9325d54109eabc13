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
use internal_error::InternalError;

use crate::SearchJobRunner;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Drains the job queue, one envelope at a time
pub struct SearchJobWorker {
    search_job_queue: Arc<dyn SearchJobQueue>,
    search_job_runner: Arc<SearchJobRunner>,
    progress_reporter: Arc<dyn ProgressReporter>,
}

#[dill::component(pub)]
impl SearchJobWorker {
    pub fn new(
        search_job_queue: Arc<dyn SearchJobQueue>,
        search_job_runner: Arc<SearchJobRunner>,
        progress_reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            search_job_queue,
            search_job_runner,
            progress_reporter,
        }
    }

    /// Runs jobs until the queue has nothing pending, retries included
    #[tracing::instrument(level = "info", name = "SearchJobWorker::run_until_idle", skip_all)]
    pub async fn run_until_idle(&self) -> Result<SearchJobWorkerStats, InternalError> {
        let mut stats = SearchJobWorkerStats::default();

        while let Some(envelope) = self.search_job_queue.dequeue().await? {
            let disposition = self
                .search_job_runner
                .run(
                    &envelope,
                    ProgressMode::Background,
                    self.progress_reporter.as_ref(),
                )
                .await;

            tracing::debug!(job_id = %envelope.job_id, ?disposition, "Job attempt finished");

            match disposition {
                JobDisposition::Completed => {
                    self.search_job_queue.acknowledge(envelope.job_id).await?;
                    stats.completed += 1;
                }
                JobDisposition::Retry => {
                    self.search_job_queue
                        .schedule_retry(envelope.job_id)
                        .await?;
                    stats.retried += 1;
                }
                JobDisposition::Discarded => {
                    self.search_job_queue.acknowledge(envelope.job_id).await?;
                    stats.discarded += 1;
                }
            }
        }

        tracing::info!(?stats, "Search job queue drained");

        Ok(stats)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchJobWorkerStats {
    pub completed: usize,
    pub retried: usize,
    pub discarded: usize,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
