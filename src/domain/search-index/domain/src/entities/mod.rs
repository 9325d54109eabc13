// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod content_record;
mod eager_load_plan;
mod index_admin_action;
mod index_definition;
mod index_name;
mod index_type;
mod maintenance_state;
mod refresh_policy;
mod search_document;
mod search_hits;

pub use content_record::*;
pub use eager_load_plan::*;
pub use index_admin_action::*;
pub use index_definition::*;
pub use index_name::*;
pub use index_type::*;
pub use maintenance_state::*;
pub use refresh_policy::*;
pub use search_document::*;
pub use search_hits::*;
