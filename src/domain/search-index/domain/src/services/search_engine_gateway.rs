// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{EngineCommunicationError, FieldMapping, RefreshPolicy, SearchDocument, SearchHits};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Document and index administration API of the search engine
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait SearchEngineGateway: Send + Sync {
    async fn index_exists(&self, index_name: &str) -> Result<bool, EngineCommunicationError>;

    async fn create_index(
        &self,
        index_name: &str,
        mapping: &FieldMapping,
        settings: &serde_json::Value,
    ) -> Result<(), EngineCommunicationError>;

    async fn close_index(&self, index_name: &str) -> Result<(), EngineCommunicationError>;

    async fn open_index(&self, index_name: &str) -> Result<(), EngineCommunicationError>;

    async fn put_mapping(
        &self,
        index_name: &str,
        mapping: &FieldMapping,
    ) -> Result<(), EngineCommunicationError>;

    async fn put_settings(
        &self,
        index_name: &str,
        settings: &serde_json::Value,
    ) -> Result<(), EngineCommunicationError>;

    /// Succeeds with `true` also when the index does not exist
    async fn delete_index(&self, index_name: &str) -> Result<bool, EngineCommunicationError>;

    async fn document_exists(
        &self,
        index_name: &str,
        document_id: &str,
    ) -> Result<bool, EngineCommunicationError>;

    async fn index_document(
        &self,
        index_name: &str,
        document_id: &str,
        document: &SearchDocument,
        refresh: RefreshPolicy,
    ) -> Result<(), EngineCommunicationError>;

    async fn update_document(
        &self,
        index_name: &str,
        document_id: &str,
        document: &SearchDocument,
        refresh: RefreshPolicy,
    ) -> Result<(), EngineCommunicationError>;

    /// Returns `false` when there was no such document
    async fn delete_document(
        &self,
        index_name: &str,
        document_id: &str,
        refresh: RefreshPolicy,
    ) -> Result<bool, EngineCommunicationError>;

    async fn search(
        &self,
        index_name: &str,
        query: &serde_json::Value,
    ) -> Result<SearchHits, EngineCommunicationError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
