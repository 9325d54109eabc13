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
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Keeps auto-indexed indexes in sync with content edits by enqueueing
/// search jobs
pub struct SearchAutoIndexer {
    index_definition_store: Arc<dyn IndexDefinitionStore>,
    search_job_queue: Arc<dyn SearchJobQueue>,
    jobs_config: Arc<SearchJobsConfig>,
    time_source: Arc<dyn SystemTimeSource>,
}

#[dill::component(pub)]
#[dill::interface(dyn ContentLifecycleConsumer)]
impl SearchAutoIndexer {
    pub fn new(
        index_definition_store: Arc<dyn IndexDefinitionStore>,
        search_job_queue: Arc<dyn SearchJobQueue>,
        jobs_config: Arc<SearchJobsConfig>,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Self {
        Self {
            index_definition_store,
            search_job_queue,
            jobs_config,
            time_source,
        }
    }

    fn auto_section_index(&self, section_handle: &str) -> Option<Arc<IndexDefinition>> {
        self.index_definition_store
            .get_by_section_handle(section_handle)
            .filter(|d| d.auto_index)
    }

    fn auto_sayt_indexes(&self, section_handle: &str) -> Vec<Arc<IndexDefinition>> {
        self.index_definition_store
            .definitions_of_type(IndexType::Sayt)
            .into_iter()
            .filter(|d| d.auto_index && d.covers_section(section_handle))
            .collect()
    }

    async fn enqueue(&self, payload: SearchJobPayload) -> Result<SearchJobId, InternalError> {
        let policy = self.jobs_config.policy_for(payload.kind());
        let envelope = JobEnvelope::new(payload, policy, self.time_source.now());

        tracing::debug!(
            job_id = %envelope.job_id,
            kind = %envelope.payload.kind(),
            index_name = %envelope.payload.index_name(),
            "Enqueueing search job",
        );

        self.search_job_queue.enqueue(envelope).await
    }

    async fn on_saved(
        &self,
        message: &ContentLifecycleMessageSaved,
    ) -> Result<Vec<SearchJobId>, InternalError> {
        let mut targets: Vec<Arc<IndexDefinition>> = Vec::new();
        targets.extend(self.auto_section_index(&message.section_handle));
        targets.extend(self.auto_sayt_indexes(&message.section_handle));

        let mut job_ids = Vec::with_capacity(targets.len());
        for definition in targets {
            let job_id = self
                .enqueue(SearchJobPayload::Update(UpdateJobArgs {
                    index_name: definition.name.clone(),
                    record_ids: Some(vec![message.record_id]),
                    ..Default::default()
                }))
                .await?;
            job_ids.push(job_id);
        }

        Ok(job_ids)
    }

    async fn on_deleting(
        &self,
        message: &ContentLifecycleMessageDeleting,
    ) -> Result<Vec<SearchJobId>, InternalError> {
        // The delete job itself fans out to the auto-indexed SAYT indexes,
        // so one job per record is enough
        let index_name = match self.auto_section_index(&message.section_handle) {
            Some(definition) => definition.name.clone(),
            None => match self.auto_sayt_indexes(&message.section_handle).first() {
                Some(definition) => definition.name.clone(),
                None => return Ok(Vec::new()),
            },
        };

        let job_id = self
            .enqueue(SearchJobPayload::Delete(DeleteJobArgs {
                index_name,
                record_id: message.record_id,
                refresh_policy: RefreshPolicy::default(),
            }))
            .await?;

        Ok(vec![job_id])
    }
}

#[async_trait::async_trait]
impl ContentLifecycleConsumer for SearchAutoIndexer {
    #[tracing::instrument(
        level = "debug",
        name = "SearchAutoIndexer::consume_message",
        skip_all,
        fields(?message)
    )]
    async fn consume_message(
        &self,
        message: &ContentLifecycleMessage,
    ) -> Result<Vec<SearchJobId>, InternalError> {
        match message {
            ContentLifecycleMessage::Saved(message) => self.on_saved(message).await,
            ContentLifecycleMessage::Deleting(message) => self.on_deleting(message).await,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
