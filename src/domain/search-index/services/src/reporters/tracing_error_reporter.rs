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

/// Writes reports to the log. Critical reports carry `alert = true` for the
/// log shipper to page on.
#[dill::component(pub)]
#[dill::interface(dyn ErrorReporter)]
#[dill::scope(dill::Singleton)]
pub struct TracingErrorReporter {}

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, report: ErrorReport) {
        let ErrorReport {
            severity,
            message,
            context,
        } = report;

        match severity {
            ErrorSeverity::Critical => {
                tracing::error!(alert = true, %severity, ?context, "{message}");
            }
            ErrorSeverity::Error => tracing::error!(%severity, ?context, "{message}"),
            ErrorSeverity::Warning => tracing::warn!(%severity, ?context, "{message}"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
