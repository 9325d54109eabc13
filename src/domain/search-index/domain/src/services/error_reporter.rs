// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use crate::ErrorSeverity;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Sink for failures that cannot be returned to a caller
pub trait ErrorReporter: Send + Sync {
    fn report(&self, report: ErrorReport);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub severity: ErrorSeverity,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl ErrorReport {
    pub fn new(severity: ErrorSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ErrorSeverity::Error, message)
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(ErrorSeverity::Critical, message)
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
