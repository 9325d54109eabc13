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

/// Enabled records of the sections the index covers
#[dill::component(pub)]
#[dill::interface(dyn SearchHandler)]
pub struct DefaultSearchHandler {}

impl DefaultSearchHandler {
    pub const NAME: &'static str = "default";
}

impl SearchHandler for DefaultSearchHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_allowed_in_index(&self, definition: &IndexDefinition, record: &ContentRecord) -> bool {
        record.enabled && definition.covers_section(&record.section_handle)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
