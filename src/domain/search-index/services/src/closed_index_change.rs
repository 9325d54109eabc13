// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cms_search::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Structural change that the engine only accepts on a closed index
#[derive(Debug, Clone, Copy)]
pub enum ClosedIndexChange<'a> {
    Mapping(&'a FieldMapping),
    Settings(&'a serde_json::Value),
}

impl ClosedIndexChange<'_> {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "put_mapping",
            Self::Settings(_) => "put_settings",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Runs close, change, reopen. Reopening is attempted whatever the change
/// outcome was. An index that cannot be reopened is reported as critical.
#[tracing::instrument(
    level = "info",
    name = "apply_closed_index_change",
    skip_all,
    fields(%index_name, operation = change.operation())
)]
pub async fn apply_closed_index_change(
    gateway: &dyn SearchEngineGateway,
    error_reporter: &dyn ErrorReporter,
    index_name: &str,
    change: ClosedIndexChange<'_>,
) -> Result<(), SearchJobError> {
    gateway.close_index(index_name).await?;

    let change_result = match change {
        ClosedIndexChange::Mapping(mapping) => gateway.put_mapping(index_name, mapping).await,
        ClosedIndexChange::Settings(settings) => gateway.put_settings(index_name, settings).await,
    };

    let reopen_result = gateway.open_index(index_name).await;

    match (change_result, reopen_result) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(change_error), Ok(())) => {
            tracing::error!(
                error = ?change_error,
                error_msg = %change_error,
                "Structural index change failed, index reopened unchanged",
            );
            Err(change_error.into())
        }
        (change_result, Err(reopen_error)) => {
            let error = MappingTransitionError {
                index_name: index_name.to_string(),
                operation: change.operation(),
                reopen_error,
                change_error: change_result.err(),
            };

            tracing::error!(
                alert = true,
                error = ?error,
                error_msg = %error,
                "Index left closed after structural change",
            );
            error_reporter.report(
                ErrorReport::critical(error.to_string())
                    .with_context("index_name", index_name)
                    .with_context("operation", change.operation()),
            );

            Err(error.into())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
