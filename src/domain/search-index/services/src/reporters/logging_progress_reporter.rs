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

#[dill::component(pub)]
#[dill::interface(dyn ProgressReporter)]
#[dill::scope(dill::Singleton)]
pub struct LoggingProgressReporter {}

impl ProgressReporter for LoggingProgressReporter {
    fn report_progress(&self, processed: usize, total: usize) {
        let percent = if total == 0 {
            100
        } else {
            processed * 100 / total
        };
        tracing::info!(processed, total, percent, "Reindex progress");
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
