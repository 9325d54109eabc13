// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{FieldMapping, IndexType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchIndexesConfig {
    /// Prepended to every logical index name to form the physical name
    #[serde(default)]
    pub index_prefix: String,

    #[serde(default)]
    pub global: GlobalIndexConfig,

    #[serde(default)]
    pub definitions: Vec<IndexDefinitionConfig>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalIndexConfig {
    #[serde(default)]
    pub field_mapping: GlobalFieldMappingConfig,

    #[serde(default)]
    pub field_boosts: BTreeMap<String, f64>,

    #[serde(default)]
    pub index_settings: Option<serde_json::Value>,
}

/// Default field mappings merged beneath every index of the given type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalFieldMappingConfig {
    #[serde(default)]
    pub section: FieldMapping,
    #[serde(default)]
    pub sayt: FieldMapping,
    #[serde(default)]
    pub all: FieldMapping,
}

impl GlobalFieldMappingConfig {
    pub fn for_type(&self, index_type: IndexType) -> &FieldMapping {
        match index_type {
            IndexType::Section => &self.section,
            IndexType::Sayt => &self.sayt,
            IndexType::All => &self.all,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Raw index definition as written by operators. Required properties are
/// optional here so that one broken definition does not prevent the rest
/// of the file from loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexDefinitionConfig {
    #[serde(rename = "type")]
    pub index_type: Option<String>,

    pub name: Option<String>,

    pub label: Option<String>,

    pub search_handler: Option<String>,

    #[serde(default)]
    pub sections: Vec<String>,

    #[serde(default)]
    pub field_mapping: FieldMapping,

    #[serde(default)]
    pub index_settings: Option<serde_json::Value>,

    #[serde(default)]
    pub match_fields: Vec<String>,

    #[serde(default)]
    pub field_boosts: BTreeMap<String, f64>,

    #[serde(default)]
    pub eager_loads: EagerLoadsConfig,

    #[serde(default)]
    pub auto_index: bool,

    /// Field name to transformer name. Transformers run in declaration
    /// order.
    #[serde(default)]
    pub field_transformers: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EagerLoadsConfig {
    #[serde(default)]
    pub fields: Vec<String>,

    /// Name of a registered eager-load modifier
    pub modifier: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
