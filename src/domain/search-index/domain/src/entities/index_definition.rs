// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{EagerLoadModifier, EagerLoadPlan, FieldMapping, FieldTransformer, IndexType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fully resolved definition of a search index. Produced by the definition
/// store after merging global defaults into the configured values.
#[derive(Debug, Clone)]
pub struct IndexDefinition {
    pub index_type: IndexType,

    /// Logical name: lowercased, without the global prefix
    pub name: String,

    /// Name of the index inside the search engine
    pub physical_name: String,

    pub label: String,

    /// Name of the strategy deciding which records belong to the index
    pub search_handler: String,

    /// Content sections covered by this index. Empty or `*` means all
    /// sections (only meaningful for SAYT indexes).
    pub section_handles: Vec<String>,

    pub field_mapping: FieldMapping,

    pub index_settings: serde_json::Value,

    pub match_fields: Vec<String>,

    pub field_boosts: BTreeMap<String, f64>,

    pub eager_loads: EagerLoadSpec,

    pub auto_index: bool,

    /// Explicit per-field computations bound by field name, in the order
    /// they were declared
    pub field_transformers: IndexMap<String, Arc<dyn FieldTransformer>>,
}

impl IndexDefinition {
    pub fn covers_all_sections(&self) -> bool {
        self.section_handles.is_empty() || self.section_handles.iter().any(|h| h == "*")
    }

    pub fn covers_section(&self, section_handle: &str) -> bool {
        self.covers_all_sections() || self.section_handles.iter().any(|h| h == section_handle)
    }

    /// Builds the relation set to load per record, applying declared
    /// modifiers in order
    pub fn eager_load_plan(&self, include_disabled_related: bool) -> EagerLoadPlan {
        let mut plan = EagerLoadPlan {
            fields: Vec::new(),
            include_disabled_related,
        };
        for field in &self.eager_loads.fields {
            plan.add_field(field.clone());
        }
        for modifier in &self.eager_loads.modifiers {
            modifier.modify(&mut plan);
        }
        plan
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default)]
pub struct EagerLoadSpec {
    pub fields: Vec<String>,
    pub modifiers: Vec<Arc<dyn EagerLoadModifier>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
