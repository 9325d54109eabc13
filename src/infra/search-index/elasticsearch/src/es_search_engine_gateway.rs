// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use cms_search::*;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use url::Url;

use crate::ElasticsearchConfig;
use crate::es_client::{SearchResponse, describe_error_response};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Search engine gateway talking to the Elasticsearch REST API
pub struct ElasticsearchGateway {
    config: Arc<ElasticsearchConfig>,
    client: tokio::sync::OnceCell<reqwest::Client>,
}

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
#[dill::interface(dyn SearchEngineGateway)]
impl ElasticsearchGateway {
    pub fn new(config: Arc<ElasticsearchConfig>) -> Self {
        Self {
            config,
            client: tokio::sync::OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&reqwest::Client, reqwest::Error> {
        self.client
            .get_or_try_init(async || {
                reqwest::Client::builder()
                    .timeout(Duration::from_secs(self.config.timeout_secs))
                    .build()
            })
            .await
    }

    /// Appends percent-encoded path segments to the configured base url
    fn endpoint(&self, segments: &[&str]) -> Result<Url, String> {
        let mut url = self.config.url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| format!("Invalid base url: {}", self.config.url))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn request(
        &self,
        operation: &'static str,
        index_name: &str,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, EngineCommunicationError> {
        let client = self
            .client()
            .await
            .map_err(|e| EngineCommunicationError::new(operation, index_name, e.to_string()))?;

        let url = self
            .endpoint(segments)
            .map_err(|e| EngineCommunicationError::new(operation, index_name, e))?;

        let mut request = client.request(method, url);
        if let Some(password) = &self.config.password {
            request = request.basic_auth(self.config.username(), Some(password));
        }

        Ok(request)
    }

    async fn send(
        operation: &'static str,
        index_name: &str,
        request: RequestBuilder,
    ) -> Result<Response, EngineCommunicationError> {
        request
            .send()
            .await
            .map_err(|e| EngineCommunicationError::new(operation, index_name, e.to_string()))
    }

    async fn failure(
        operation: &'static str,
        index_name: &str,
        response: Response,
    ) -> EngineCommunicationError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        EngineCommunicationError::new(operation, index_name, describe_error_response(status, &body))
    }

    async fn expect_success(
        operation: &'static str,
        index_name: &str,
        request: RequestBuilder,
    ) -> Result<Response, EngineCommunicationError> {
        let response = Self::send(operation, index_name, request).await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::failure(operation, index_name, response).await)
        }
    }

    /// HEAD request mapping 200 and 404 into a boolean
    async fn exists(
        &self,
        operation: &'static str,
        index_name: &str,
        segments: &[&str],
    ) -> Result<bool, EngineCommunicationError> {
        let request = self
            .request(operation, index_name, Method::HEAD, segments)
            .await?;
        let response = Self::send(operation, index_name, request).await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::failure(operation, index_name, response).await),
        }
    }
}

fn create_index_body(mapping: &FieldMapping, settings: &serde_json::Value) -> serde_json::Value {
    let mut body = serde_json::json!({ "mappings": mapping_to_properties(mapping) });
    if !settings.is_null() {
        body["settings"] = settings.clone();
    }
    body
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchEngineGateway for ElasticsearchGateway {
    #[tracing::instrument(level = "debug", name = "ElasticsearchGateway::index_exists", skip_all, fields(%index_name))]
    async fn index_exists(&self, index_name: &str) -> Result<bool, EngineCommunicationError> {
        self.exists("index_exists", index_name, &[index_name]).await
    }

    #[tracing::instrument(level = "info", name = "ElasticsearchGateway::create_index", skip_all, fields(%index_name))]
    async fn create_index(
        &self,
        index_name: &str,
        mapping: &FieldMapping,
        settings: &serde_json::Value,
    ) -> Result<(), EngineCommunicationError> {
        const OP: &str = "create_index";

        let request = self
            .request(OP, index_name, Method::PUT, &[index_name])
            .await?
            .json(&create_index_body(mapping, settings));

        Self::expect_success(OP, index_name, request).await?;
        Ok(())
    }

    #[tracing::instrument(level = "info", name = "ElasticsearchGateway::close_index", skip_all, fields(%index_name))]
    async fn close_index(&self, index_name: &str) -> Result<(), EngineCommunicationError> {
        const OP: &str = "close_index";

        let request = self
            .request(OP, index_name, Method::POST, &[index_name, "_close"])
            .await?;

        Self::expect_success(OP, index_name, request).await?;
        Ok(())
    }

    #[tracing::instrument(level = "info", name = "ElasticsearchGateway::open_index", skip_all, fields(%index_name))]
    async fn open_index(&self, index_name: &str) -> Result<(), EngineCommunicationError> {
        const OP: &str = "open_index";

        let request = self
            .request(OP, index_name, Method::POST, &[index_name, "_open"])
            .await?;

        Self::expect_success(OP, index_name, request).await?;
        Ok(())
    }

    #[tracing::instrument(level = "info", name = "ElasticsearchGateway::put_mapping", skip_all, fields(%index_name))]
    async fn put_mapping(
        &self,
        index_name: &str,
        mapping: &FieldMapping,
    ) -> Result<(), EngineCommunicationError> {
        const OP: &str = "put_mapping";

        let request = self
            .request(OP, index_name, Method::PUT, &[index_name, "_mapping"])
            .await?
            .json(&mapping_to_properties(mapping));

        Self::expect_success(OP, index_name, request).await?;
        Ok(())
    }

    #[tracing::instrument(level = "info", name = "ElasticsearchGateway::put_settings", skip_all, fields(%index_name))]
    async fn put_settings(
        &self,
        index_name: &str,
        settings: &serde_json::Value,
    ) -> Result<(), EngineCommunicationError> {
        const OP: &str = "put_settings";

        let request = self
            .request(OP, index_name, Method::PUT, &[index_name, "_settings"])
            .await?
            .json(settings);

        Self::expect_success(OP, index_name, request).await?;
        Ok(())
    }

    #[tracing::instrument(level = "info", name = "ElasticsearchGateway::delete_index", skip_all, fields(%index_name))]
    async fn delete_index(&self, index_name: &str) -> Result<bool, EngineCommunicationError> {
        const OP: &str = "delete_index";

        let request = self
            .request(OP, index_name, Method::DELETE, &[index_name])
            .await?;
        let response = Self::send(OP, index_name, request).await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => {
                tracing::debug!("Index did not exist");
                Ok(true)
            }
            _ => Err(Self::failure(OP, index_name, response).await),
        }
    }

    #[tracing::instrument(level = "debug", name = "ElasticsearchGateway::document_exists", skip_all, fields(%index_name, %document_id))]
    async fn document_exists(
        &self,
        index_name: &str,
        document_id: &str,
    ) -> Result<bool, EngineCommunicationError> {
        self.exists("document_exists", index_name, &[index_name, "_doc", document_id])
            .await
    }

    #[tracing::instrument(level = "debug", name = "ElasticsearchGateway::index_document", skip_all, fields(%index_name, %document_id))]
    async fn index_document(
        &self,
        index_name: &str,
        document_id: &str,
        document: &SearchDocument,
        refresh: RefreshPolicy,
    ) -> Result<(), EngineCommunicationError> {
        const OP: &str = "index_document";

        let request = self
            .request(OP, index_name, Method::PUT, &[index_name, "_doc", document_id])
            .await?
            .query(&[("refresh", refresh.as_query_value())])
            .json(document);

        Self::expect_success(OP, index_name, request).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", name = "ElasticsearchGateway::update_document", skip_all, fields(%index_name, %document_id))]
    async fn update_document(
        &self,
        index_name: &str,
        document_id: &str,
        document: &SearchDocument,
        refresh: RefreshPolicy,
    ) -> Result<(), EngineCommunicationError> {
        const OP: &str = "update_document";

        let request = self
            .request(OP, index_name, Method::POST, &[index_name, "_update", document_id])
            .await?
            .query(&[("refresh", refresh.as_query_value())])
            .json(&serde_json::json!({ "doc": document }));

        Self::expect_success(OP, index_name, request).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", name = "ElasticsearchGateway::delete_document", skip_all, fields(%index_name, %document_id))]
    async fn delete_document(
        &self,
        index_name: &str,
        document_id: &str,
        refresh: RefreshPolicy,
    ) -> Result<bool, EngineCommunicationError> {
        const OP: &str = "delete_document";

        let request = self
            .request(OP, index_name, Method::DELETE, &[index_name, "_doc", document_id])
            .await?
            .query(&[("refresh", refresh.as_query_value())]);
        let response = Self::send(OP, index_name, request).await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => {
                // A missing index answers 404 too, but with an error body
                let body = response.text().await.unwrap_or_default();
                if is_document_not_found(&body) {
                    Ok(false)
                } else {
                    Err(EngineCommunicationError::new(
                        OP,
                        index_name,
                        describe_error_response(StatusCode::NOT_FOUND.as_u16(), &body),
                    ))
                }
            }
            _ => Err(Self::failure(OP, index_name, response).await),
        }
    }

    #[tracing::instrument(level = "debug", name = "ElasticsearchGateway::search", skip_all, fields(%index_name))]
    async fn search(
        &self,
        index_name: &str,
        query: &serde_json::Value,
    ) -> Result<SearchHits, EngineCommunicationError> {
        const OP: &str = "search";

        let request = self
            .request(OP, index_name, Method::POST, &[index_name, "_search"])
            .await?
            .json(query);

        let response = Self::expect_success(OP, index_name, request).await?;
        let response: SearchResponse = response
            .json()
            .await
            .map_err(|e| EngineCommunicationError::new(OP, index_name, e.to_string()))?;

        tracing::debug!(took = response.took, timed_out = response.timed_out, "Search completed");

        Ok(response.into())
    }
}

fn is_document_not_found(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("result").cloned())
        .is_some_and(|result| result == "not_found")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
