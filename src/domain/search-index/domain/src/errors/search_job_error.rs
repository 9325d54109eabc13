// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{ConfigurationError, EngineCommunicationError, RecordId, SearchJobKind};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SearchJobError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    LockUnavailable(#[from] LockUnavailableError),

    #[error(transparent)]
    EngineCommunication(#[from] EngineCommunicationError),

    #[error(transparent)]
    DeletionIncomplete(#[from] DeletionIncompleteError),

    #[error(transparent)]
    MappingTransition(#[from] MappingTransitionError),

    #[error(transparent)]
    DocumentTransform(#[from] DocumentTransformError),

    #[error(transparent)]
    TimeToRunExceeded(#[from] TimeToRunExceededError),

    #[error(transparent)]
    RetryExhausted(#[from] RetryExhaustedError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl SearchJobError {
    /// Whether another attempt of the same job may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Configuration(_) | Self::DocumentTransform(_) | Self::RetryExhausted(_) => false,
            Self::LockUnavailable(_)
            | Self::EngineCommunication(_)
            | Self::DeletionIncomplete(_)
            | Self::MappingTransition(_)
            | Self::TimeToRunExceeded(_)
            | Self::Internal(_) => true,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MappingTransition(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorSeverity {
    Warning,
    Error,
    /// Needs a human: the index may be left unusable
    Critical,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Index '{index_name}' is under maintenance, lock not acquired within {timeout_secs}s")]
pub struct LockUnavailableError {
    pub index_name: String,
    pub timeout_secs: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Raised when an index could not be reopened after a structural change
/// that required closing it. The index stays closed until someone reopens
/// it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Index '{index_name}' was left closed after '{operation}': reopen failed with: {reopen_error}"
)]
pub struct MappingTransitionError {
    pub index_name: String,
    pub operation: &'static str,
    pub reopen_error: EngineCommunicationError,
    pub change_error: Option<EngineCommunicationError>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentTransformError {
    #[error(
        "Field '{field}' holds a collection of elements, bind an explicit field transformer to \
         index it"
    )]
    ElementCollectionNeedsTransformer { field: String },

    #[error("Field transformer '{transformer}' failed on field '{field}': {reason}")]
    TransformerFailed {
        transformer: String,
        field: String,
        reason: String,
    },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Record {record_id} was not removed from {} index(es)", .failures.len())]
pub struct DeletionIncompleteError {
    pub record_id: RecordId,
    pub failures: Vec<EngineCommunicationError>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Job attempt exceeded its time-to-run of {ttr_seconds}s")]
pub struct TimeToRunExceededError {
    pub ttr_seconds: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Search job '{job_kind}' for index '{index_name}' gave up after {attempts} attempt(s): \
     {last_error}"
)]
pub struct RetryExhaustedError {
    pub job_kind: SearchJobKind,
    pub index_name: String,
    pub record_ids: Vec<RecordId>,
    pub attempts: u32,
    pub last_error: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
