// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use crate::EagerLoadPlan;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Named strategy adjusting the relations loaded with each record
pub trait EagerLoadModifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn modify(&self, plan: &mut EagerLoadPlan);
}

impl fmt::Debug for dyn EagerLoadModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EagerLoadModifier({})", self.name())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
