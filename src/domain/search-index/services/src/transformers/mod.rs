// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod related_count_transformer;
mod related_ids_transformer;
mod section_handle_transformer;
mod title_suggest_transformer;

pub use related_count_transformer::*;
pub use related_ids_transformer::*;
pub use section_handle_transformer::*;
pub use title_suggest_transformer::*;
