// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cms_search::*;
use dill::{Singleton, component, interface, scope};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Search engine kept in memory. Mirrors the engine rules the pipeline relies
/// on: documents cannot be read or written while their index is closed, and
/// creating an existing index fails. Tests can inject failures per operation
/// and slow every call down.
pub struct InMemorySearchEngine {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryIndex {
    pub mapping: FieldMapping,
    pub settings: serde_json::Value,
    pub open: bool,
    pub documents: BTreeMap<String, SearchDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOperation {
    pub operation: &'static str,
    pub index_name: String,
}

#[derive(Default)]
struct State {
    indexes: BTreeMap<String, InMemoryIndex>,
    operations: Vec<EngineOperation>,
    faults: HashMap<&'static str, usize>,
    latency: Option<Duration>,
}

impl State {
    fn index(
        &self,
        operation: &'static str,
        index_name: &str,
    ) -> Result<&InMemoryIndex, EngineCommunicationError> {
        self.indexes.get(index_name).ok_or_else(|| {
            EngineCommunicationError::new(operation, index_name, "index_not_found_exception")
        })
    }

    fn index_mut(
        &mut self,
        operation: &'static str,
        index_name: &str,
    ) -> Result<&mut InMemoryIndex, EngineCommunicationError> {
        self.indexes.get_mut(index_name).ok_or_else(|| {
            EngineCommunicationError::new(operation, index_name, "index_not_found_exception")
        })
    }

    fn open_index_mut(
        &mut self,
        operation: &'static str,
        index_name: &str,
    ) -> Result<&mut InMemoryIndex, EngineCommunicationError> {
        let index = self.index_mut(operation, index_name)?;
        if !index.open {
            return Err(EngineCommunicationError::new(
                operation,
                index_name,
                "index_closed_exception",
            ));
        }

        Ok(index)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[scope(Singleton)]
#[interface(dyn SearchEngineGateway)]
impl InMemorySearchEngine {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Makes the next `times` calls of `operation` fail
    pub fn fail_next(&self, operation: &'static str, times: usize) {
        self.state.lock().unwrap().faults.insert(operation, times);
    }

    pub fn fail_always(&self, operation: &'static str) {
        self.fail_next(operation, usize::MAX);
    }

    pub fn clear_faults(&self) {
        self.state.lock().unwrap().faults.clear();
    }

    pub fn set_latency(&self, latency: Option<Duration>) {
        self.state.lock().unwrap().latency = latency;
    }

    pub fn operations(&self) -> Vec<EngineOperation> {
        self.state.lock().unwrap().operations.clone()
    }

    pub fn operation_names(&self) -> Vec<&'static str> {
        self.operations().into_iter().map(|o| o.operation).collect()
    }

    pub fn clear_operations(&self) {
        self.state.lock().unwrap().operations.clear();
    }

    pub fn index(&self, index_name: &str) -> Option<InMemoryIndex> {
        self.state.lock().unwrap().indexes.get(index_name).cloned()
    }

    pub fn index_names(&self) -> Vec<String> {
        self.state.lock().unwrap().indexes.keys().cloned().collect()
    }

    pub fn document(&self, index_name: &str, document_id: &str) -> Option<SearchDocument> {
        self.state
            .lock()
            .unwrap()
            .indexes
            .get(index_name)
            .and_then(|i| i.documents.get(document_id).cloned())
    }

    pub fn document_ids(&self, index_name: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .indexes
            .get(index_name)
            .map(|i| i.documents.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Records the call, applies latency and consumes an injected fault
    async fn begin(
        &self,
        operation: &'static str,
        index_name: &str,
    ) -> Result<(), EngineCommunicationError> {
        let latency = {
            let mut state = self.state.lock().unwrap();
            state.operations.push(EngineOperation {
                operation,
                index_name: index_name.to_string(),
            });
            state.latency
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.state.lock().unwrap();
        match state.faults.get_mut(operation) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(EngineCommunicationError::new(
                    operation,
                    index_name,
                    "injected failure",
                ))
            }
            _ => Ok(()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchEngineGateway for InMemorySearchEngine {
    async fn index_exists(&self, index_name: &str) -> Result<bool, EngineCommunicationError> {
        self.begin("index_exists", index_name).await?;

        Ok(self.state.lock().unwrap().indexes.contains_key(index_name))
    }

    async fn create_index(
        &self,
        index_name: &str,
        mapping: &FieldMapping,
        settings: &serde_json::Value,
    ) -> Result<(), EngineCommunicationError> {
        self.begin("create_index", index_name).await?;

        let mut state = self.state.lock().unwrap();
        if state.indexes.contains_key(index_name) {
            return Err(EngineCommunicationError::new(
                "create_index",
                index_name,
                "resource_already_exists_exception",
            ));
        }

        state.indexes.insert(
            index_name.to_string(),
            InMemoryIndex {
                mapping: mapping.clone(),
                settings: settings.clone(),
                open: true,
                documents: BTreeMap::new(),
            },
        );

        Ok(())
    }

    async fn close_index(&self, index_name: &str) -> Result<(), EngineCommunicationError> {
        self.begin("close_index", index_name).await?;

        let mut state = self.state.lock().unwrap();
        let index = state.index_mut("close_index", index_name)?;
        index.open = false;
        Ok(())
    }

    async fn open_index(&self, index_name: &str) -> Result<(), EngineCommunicationError> {
        self.begin("open_index", index_name).await?;

        let mut state = self.state.lock().unwrap();
        let index = state.index_mut("open_index", index_name)?;
        index.open = true;
        Ok(())
    }

    async fn put_mapping(
        &self,
        index_name: &str,
        mapping: &FieldMapping,
    ) -> Result<(), EngineCommunicationError> {
        self.begin("put_mapping", index_name).await?;

        let mut state = self.state.lock().unwrap();
        let index = state.index_mut("put_mapping", index_name)?;
        // Mappings are additive in the engine
        index
            .mapping
            .extend(mapping.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    async fn put_settings(
        &self,
        index_name: &str,
        settings: &serde_json::Value,
    ) -> Result<(), EngineCommunicationError> {
        self.begin("put_settings", index_name).await?;

        let mut state = self.state.lock().unwrap();
        let index = state.index_mut("put_settings", index_name)?;
        index.settings = settings.clone();
        Ok(())
    }

    async fn delete_index(&self, index_name: &str) -> Result<bool, EngineCommunicationError> {
        self.begin("delete_index", index_name).await?;

        self.state.lock().unwrap().indexes.remove(index_name);
        Ok(true)
    }

    async fn document_exists(
        &self,
        index_name: &str,
        document_id: &str,
    ) -> Result<bool, EngineCommunicationError> {
        self.begin("document_exists", index_name).await?;

        let state = self.state.lock().unwrap();
        let Some(index) = state.indexes.get(index_name) else {
            return Ok(false);
        };
        if !index.open {
            return Err(EngineCommunicationError::new(
                "document_exists",
                index_name,
                "index_closed_exception",
            ));
        }

        Ok(index.documents.contains_key(document_id))
    }

    async fn index_document(
        &self,
        index_name: &str,
        document_id: &str,
        document: &SearchDocument,
        _refresh: RefreshPolicy,
    ) -> Result<(), EngineCommunicationError> {
        self.begin("index_document", index_name).await?;

        let mut state = self.state.lock().unwrap();
        let index = state.open_index_mut("index_document", index_name)?;
        index
            .documents
            .insert(document_id.to_string(), document.clone());
        Ok(())
    }

    async fn update_document(
        &self,
        index_name: &str,
        document_id: &str,
        document: &SearchDocument,
        _refresh: RefreshPolicy,
    ) -> Result<(), EngineCommunicationError> {
        self.begin("update_document", index_name).await?;

        let mut state = self.state.lock().unwrap();
        let index = state.open_index_mut("update_document", index_name)?;
        let Some(existing) = index.documents.get_mut(document_id) else {
            return Err(EngineCommunicationError::new(
                "update_document",
                index_name,
                format!("document_missing_exception: [{document_id}]"),
            ));
        };

        for (field, value) in document {
            existing.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete_document(
        &self,
        index_name: &str,
        document_id: &str,
        _refresh: RefreshPolicy,
    ) -> Result<bool, EngineCommunicationError> {
        self.begin("delete_document", index_name).await?;

        let mut state = self.state.lock().unwrap();
        if !state.indexes.contains_key(index_name) {
            return Ok(false);
        }
        let index = state.open_index_mut("delete_document", index_name)?;
        Ok(index.documents.remove(document_id).is_some())
    }

    async fn search(
        &self,
        index_name: &str,
        query: &serde_json::Value,
    ) -> Result<SearchHits, EngineCommunicationError> {
        self.begin("search", index_name).await?;

        let size = query
            .get("size")
            .and_then(serde_json::Value::as_u64)
            .and_then(|s| usize::try_from(s).ok())
            .unwrap_or(10);

        let state = self.state.lock().unwrap();

        let mut matching = Vec::new();
        for name in index_name.split(',').filter(|n| !n.is_empty()) {
            let index = state.index("search", name)?;
            if !index.open {
                return Err(EngineCommunicationError::new(
                    "search",
                    name,
                    "index_closed_exception",
                ));
            }
            matching.extend(index.documents.iter().map(|(id, doc)| SearchHit {
                id: id.clone(),
                score: Some(1.0),
                source: serde_json::Value::Object(doc.clone()),
            }));
        }

        let total = matching.len() as u64;
        matching.truncate(size);

        Ok(SearchHits {
            total,
            max_score: (total > 0).then_some(1.0),
            hits: matching,
            aggregations: None,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
