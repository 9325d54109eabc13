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

/// Like the default handler, but suggestions need a title to complete on
#[dill::component(pub)]
#[dill::interface(dyn SearchHandler)]
pub struct SaytSearchHandler {}

impl SaytSearchHandler {
    pub const NAME: &'static str = "sayt";
}

impl SearchHandler for SaytSearchHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_allowed_in_index(&self, definition: &IndexDefinition, record: &ContentRecord) -> bool {
        record.enabled
            && definition.covers_section(&record.section_handle)
            && !record.title.trim().is_empty()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
