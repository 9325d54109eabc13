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

use crate::{ConfigurationError, FieldMapping, IndexDefinition, IndexType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Registry of validated index definitions
pub trait IndexDefinitionStore: Send + Sync {
    /// Logical form of a possibly prefixed or mixed-case index name
    fn normalize_name(&self, name: &str) -> String;

    /// Looks up a definition by name. With `normalize` the name is lowercased
    /// and stripped of the global prefix first, otherwise it must already be
    /// the logical name.
    fn get_by_name(&self, name: &str, normalize: bool) -> Option<Arc<IndexDefinition>>;

    /// Section index covering the given content section
    fn get_by_section_handle(&self, section_handle: &str) -> Option<Arc<IndexDefinition>>;

    /// Physical names of all section indexes, in definition order
    fn all_section_index_names(&self) -> Vec<String>;

    fn definitions(&self) -> Vec<Arc<IndexDefinition>>;

    fn global_field_mapping(&self, index_type: IndexType) -> FieldMapping;

    fn global_field_boosts(&self) -> BTreeMap<String, f64>;

    fn global_index_settings(&self) -> serde_json::Value;

    fn definitions_of_type(&self, index_type: IndexType) -> Vec<Arc<IndexDefinition>> {
        self.definitions()
            .into_iter()
            .filter(|d| d.index_type == index_type)
            .collect()
    }

    /// Target for search queries. The virtual index expands into the
    /// comma-joined list of section indexes.
    fn search_target(&self, definition: &IndexDefinition) -> String {
        match definition.index_type {
            IndexType::All => self.all_section_index_names().join(","),
            IndexType::Section | IndexType::Sayt => definition.physical_name.clone(),
        }
    }

    /// Resolves a definition that structural operations and document writes
    /// may target
    fn resolve_mutable(&self, name: &str) -> Result<Arc<IndexDefinition>, ConfigurationError> {
        let definition =
            self.get_by_name(name, true)
                .ok_or_else(|| ConfigurationError::IndexNotFound {
                    index_name: name.to_string(),
                })?;

        if definition.index_type.is_virtual() {
            return Err(ConfigurationError::VirtualIndex {
                index_name: definition.name.clone(),
            });
        }

        Ok(definition)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
