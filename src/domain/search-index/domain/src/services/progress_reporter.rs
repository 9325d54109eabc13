// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub trait ProgressReporter: Send + Sync {
    fn report_progress(&self, processed: usize, total: usize);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProgressMode {
    /// Operator is watching: report after every record
    Foreground,
    /// Queued job: report every [`ProgressMode::BACKGROUND_STEP`] records
    Background,
}

impl ProgressMode {
    pub const BACKGROUND_STEP: usize = 10;

    pub fn should_report(self, processed: usize, total: usize) -> bool {
        match self {
            Self::Foreground => true,
            Self::Background => processed % Self::BACKGROUND_STEP == 0 || processed == total,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Copy, Clone)]
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn report_progress(&self, _processed: usize, _total: usize) {}
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
