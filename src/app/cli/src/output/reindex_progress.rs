// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use cms_search::ProgressReporter;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Progress bar of an interactive reindex
pub struct ReindexProgress {
    index_name: String,
    progress_bar: indicatif::ProgressBar,
}

impl ReindexProgress {
    pub fn new(index_name: &str, visible: bool) -> Self {
        let progress_bar = if visible {
            indicatif::ProgressBar::new(0)
        } else {
            indicatif::ProgressBar::hidden()
        };

        let style = indicatif::ProgressStyle::with_template(
            "{spinner:.cyan} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
        .progress_chars("=> ");
        progress_bar.set_style(style);
        progress_bar.set_message(format!(
            "Reindexing {}",
            console::style(index_name).bold()
        ));
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            index_name: index_name.to_string(),
            progress_bar,
        }
    }

    pub fn finish(&self) {
        self.progress_bar.finish_with_message(format!(
            "Reindexed {}",
            console::style(&self.index_name).bold()
        ));
    }

    pub fn abandon(&self) {
        self.progress_bar.abandon_with_message(format!(
            "Reindexing {} {}",
            console::style(&self.index_name).bold(),
            console::style("failed").red()
        ));
    }
}

impl ProgressReporter for ReindexProgress {
    fn report_progress(&self, processed: usize, total: usize) {
        self.progress_bar.set_length(total as u64);
        self.progress_bar.set_position(processed as u64);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
