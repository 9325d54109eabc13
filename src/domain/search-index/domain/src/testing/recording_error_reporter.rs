// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, Mutex};

use crate::{ErrorReport, ErrorReporter, ErrorSeverity};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
pub struct RecordingErrorReporter {
    reports: Arc<Mutex<Vec<ErrorReport>>>,
}

impl RecordingErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.lock().unwrap().clone()
    }

    pub fn reports_of(&self, severity: ErrorSeverity) -> Vec<ErrorReport> {
        self.reports()
            .into_iter()
            .filter(|r| r.severity == severity)
            .collect()
    }
}

impl ErrorReporter for RecordingErrorReporter {
    fn report(&self, report: ErrorReport) {
        self.reports.lock().unwrap().push(report);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
