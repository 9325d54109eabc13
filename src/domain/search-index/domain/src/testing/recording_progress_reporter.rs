// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Mutex;

use crate::ProgressReporter;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
pub struct RecordingProgressReporter {
    calls: Mutex<Vec<(usize, usize)>>,
}

impl RecordingProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(usize, usize)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(usize, usize)> {
        self.calls.lock().unwrap().last().copied()
    }
}

impl ProgressReporter for RecordingProgressReporter {
    fn report_progress(&self, processed: usize, total: usize) {
        self.calls.lock().unwrap().push((processed, total));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
