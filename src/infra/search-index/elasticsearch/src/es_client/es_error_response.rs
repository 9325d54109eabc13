// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Error body returned by the REST API on non-success statuses
#[derive(Debug, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseCause,
    pub status: Option<u16>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum ErrorResponseCause {
    Structured {
        #[serde(rename = "type")]
        error_type: String,
        reason: Option<String>,
    },
    Plain(String),
}

/// Short description of a failed response, preferring the engine's own error
/// type and reason over the raw body
pub fn describe_error_response(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error: ErrorResponseCause::Structured { error_type, reason },
            ..
        }) => match reason {
            Some(reason) => format!("{error_type}: {reason} (status {status})"),
            None => format!("{error_type} (status {status})"),
        },
        Ok(ErrorResponse {
            error: ErrorResponseCause::Plain(message),
            ..
        }) => format!("{message} (status {status})"),
        Err(_) if body.trim().is_empty() => format!("status {status}"),
        Err(_) => format!("{} (status {status})", body.trim()),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
