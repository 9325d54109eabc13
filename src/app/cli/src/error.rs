// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::error::Error as _;
use std::fmt::Write as _;

use cms_search::SearchJobError;
use internal_error::{BoxedError, InternalError};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum CLIError {
    /// Invalid arguments or configuration, nothing was attempted
    #[error(transparent)]
    UsageError(UsageError),

    /// The command ran but did not succeed
    #[error(transparent)]
    Failure(BoxedError),

    /// The command failed and left something that needs an operator
    #[error(transparent)]
    CriticalFailure(BoxedError),
}

impl CLIError {
    pub fn usage_error(message: impl Into<String>) -> Self {
        Self::UsageError(UsageError {
            message: Some(message.into()),
            source: None,
        })
    }

    pub fn usage_error_from(e: impl Into<BoxedError>) -> Self {
        Self::UsageError(UsageError {
            message: None,
            source: Some(e.into()),
        })
    }

    pub fn usage_error_with_source(
        message: impl Into<String>,
        source: impl Into<BoxedError>,
    ) -> Self {
        Self::UsageError(UsageError {
            message: Some(message.into()),
            source: Some(source.into()),
        })
    }

    pub fn failure(e: impl Into<BoxedError>) -> Self {
        Self::Failure(e.into())
    }

    pub fn critical(e: impl Into<BoxedError>) -> Self {
        Self::CriticalFailure(e.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UsageError(_) => 2,
            Self::Failure(_) => 1,
            Self::CriticalFailure(_) => 3,
        }
    }

    /// Renders the error with its chain of causes, one per line
    pub fn pretty(&self, include_causes: bool) -> String {
        let mut buf = String::new();

        let headline = match self {
            Self::UsageError(_) => "Usage error",
            Self::Failure(_) => "Error",
            Self::CriticalFailure(_) => "Critical error",
        };
        let _ = write!(buf, "{}: {self}", console::style(headline).red().bold());

        if include_causes {
            let mut source = self.source();
            while let Some(cause) = source {
                let _ = write!(buf, "\n  caused by: {cause}");
                source = cause.source();
            }
        }

        buf
    }
}

impl From<InternalError> for CLIError {
    fn from(e: InternalError) -> Self {
        Self::CriticalFailure(e.into())
    }
}

impl From<dill::InjectionError> for CLIError {
    fn from(e: dill::InjectionError) -> Self {
        Self::CriticalFailure(e.into())
    }
}

impl From<SearchJobError> for CLIError {
    fn from(e: SearchJobError) -> Self {
        match e {
            SearchJobError::Configuration(_) => Self::usage_error_from(e),
            SearchJobError::MappingTransition(_) => Self::critical(e),
            _ => Self::failure(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct UsageError {
    pub message: Option<String>,
    pub source: Option<BoxedError>,
}

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.message, &self.source) {
            (Some(message), _) => write!(f, "{message}"),
            (None, Some(source)) => write!(f, "{source}"),
            (None, None) => write!(f, "Invalid usage"),
        }
    }
}

impl std::error::Error for UsageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match (&self.message, &self.source) {
            (Some(_), Some(source)) => Some(source.as_ref()),
            _ => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
