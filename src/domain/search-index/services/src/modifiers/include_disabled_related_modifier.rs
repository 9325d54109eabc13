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

/// Always loads disabled related records, regardless of the job flag
#[dill::component(pub)]
#[dill::interface(dyn EagerLoadModifier)]
pub struct IncludeDisabledRelatedModifier {}

impl IncludeDisabledRelatedModifier {
    pub const NAME: &'static str = "include_disabled_related";
}

impl EagerLoadModifier for IncludeDisabledRelatedModifier {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn modify(&self, plan: &mut EagerLoadPlan) {
        plan.include_disabled_related = true;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
