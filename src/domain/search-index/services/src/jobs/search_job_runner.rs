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

/// Runs one attempt of a queued search job and decides what the queue should
/// do with it next. Failures are never returned: they are reported, as there
/// is no caller to hand them to.
pub struct SearchJobRunner {
    reindex_orchestrator: Arc<dyn ReindexOrchestrator>,
    index_admin_orchestrator: Arc<dyn IndexAdminOrchestrator>,
    delete_orchestrator: Arc<dyn DeleteOrchestrator>,
    error_reporter: Arc<dyn ErrorReporter>,
}

#[dill::component(pub)]
impl SearchJobRunner {
    pub fn new(
        reindex_orchestrator: Arc<dyn ReindexOrchestrator>,
        index_admin_orchestrator: Arc<dyn IndexAdminOrchestrator>,
        delete_orchestrator: Arc<dyn DeleteOrchestrator>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            reindex_orchestrator,
            index_admin_orchestrator,
            delete_orchestrator,
            error_reporter,
        }
    }

    #[tracing::instrument(
        level = "info",
        name = "SearchJobRunner::run",
        skip_all,
        fields(
            job_id = %envelope.job_id,
            kind = %envelope.payload.kind(),
            index_name = %envelope.payload.index_name(),
            attempt = envelope.attempt,
        )
    )]
    pub async fn run(
        &self,
        envelope: &JobEnvelope,
        mode: ProgressMode,
        progress: &dyn ProgressReporter,
    ) -> JobDisposition {
        let policy = envelope.retry_policy();

        // Dropping the attempt future on timeout runs the same cleanup as a
        // crashed worker, including the maintenance lock guard
        let res = match tokio::time::timeout(
            policy.ttr(),
            self.run_attempt(&envelope.payload, mode, progress),
        )
        .await
        {
            Ok(res) => res,
            Err(_) => Err(TimeToRunExceededError {
                ttr_seconds: policy.ttr_seconds,
            }
            .into()),
        };

        let e = match res {
            Ok(()) => return JobDisposition::Completed,
            Err(e) => e,
        };

        if !e.is_retryable() {
            tracing::error!(error = ?e, error_msg = %e, "Search job failed permanently");
            self.error_reporter.report(
                ErrorReport::new(e.severity(), e.to_string())
                    .with_context("job_kind", envelope.payload.kind())
                    .with_context("index_name", envelope.payload.index_name()),
            );
            return JobDisposition::Discarded;
        }

        if policy.can_retry(envelope.attempt + 1) {
            tracing::warn!(error = ?e, error_msg = %e, "Search job attempt failed, will retry");
            return JobDisposition::Retry;
        }

        let exhausted = RetryExhaustedError {
            job_kind: envelope.payload.kind(),
            index_name: envelope.payload.index_name().to_string(),
            record_ids: envelope.payload.record_ids(),
            attempts: envelope.attempt,
            last_error: e.to_string(),
        };

        tracing::error!(error = ?exhausted, error_msg = %exhausted, "Search job gave up");
        self.error_reporter.report(
            ErrorReport::error(exhausted.to_string())
                .with_context("job_kind", exhausted.job_kind)
                .with_context("index_name", &exhausted.index_name)
                .with_context(
                    "record_ids",
                    exhausted
                        .record_ids
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(","),
                )
                .with_context("attempts", exhausted.attempts),
        );

        JobDisposition::Discarded
    }

    async fn run_attempt(
        &self,
        payload: &SearchJobPayload,
        mode: ProgressMode,
        progress: &dyn ProgressReporter,
    ) -> Result<(), SearchJobError> {
        match payload {
            SearchJobPayload::Update(args) => {
                let outcome = self
                    .reindex_orchestrator
                    .reindex(args, mode, progress)
                    .await?;
                tracing::info!(?outcome, "Update job completed");
            }
            SearchJobPayload::IndexAdmin(args) => {
                let outcome = self
                    .index_admin_orchestrator
                    .execute(&args.index_name, &args.action)
                    .await?;
                tracing::info!(%outcome, "Index admin job completed");
            }
            SearchJobPayload::Delete(args) => {
                let outcome = self.delete_orchestrator.delete_record(args).await?;
                tracing::info!(?outcome, "Delete job completed");
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
