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
#[dill::interface(dyn EagerLoadModifier)]
pub struct WithAuthorModifier {}

impl WithAuthorModifier {
    pub const NAME: &'static str = "with_author";
}

impl EagerLoadModifier for WithAuthorModifier {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn modify(&self, plan: &mut EagerLoadPlan) {
        plan.add_field("author");
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
