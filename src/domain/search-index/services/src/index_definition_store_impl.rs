// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::Arc;

use cms_search::*;
use indexmap::IndexMap;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Validates configured index definitions once, at construction. Broken
/// definitions are reported and skipped so the remaining ones stay usable.
pub struct IndexDefinitionStoreImpl {
    index_prefix: String,
    global: GlobalIndexConfig,
    definitions: Vec<Arc<IndexDefinition>>,
    by_name: HashMap<String, usize>,
}

struct StrategyRegistry<'a> {
    field_transformers: &'a [Arc<dyn FieldTransformer>],
    eager_load_modifiers: &'a [Arc<dyn EagerLoadModifier>],
}

impl StrategyRegistry<'_> {
    fn field_transformer(&self, name: &str) -> Option<Arc<dyn FieldTransformer>> {
        self.field_transformers
            .iter()
            .find(|t| t.name() == name)
            .cloned()
    }

    fn eager_load_modifier(&self, name: &str) -> Option<Arc<dyn EagerLoadModifier>> {
        self.eager_load_modifiers
            .iter()
            .find(|m| m.name() == name)
            .cloned()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn IndexDefinitionStore)]
#[dill::scope(dill::Singleton)]
impl IndexDefinitionStoreImpl {
    pub fn new(
        config: Arc<SearchIndexesConfig>,
        field_transformers: Vec<Arc<dyn FieldTransformer>>,
        eager_load_modifiers: Vec<Arc<dyn EagerLoadModifier>>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let registry = StrategyRegistry {
            field_transformers: &field_transformers,
            eager_load_modifiers: &eager_load_modifiers,
        };

        let mut store = Self {
            index_prefix: config.index_prefix.clone(),
            global: config.global.clone(),
            definitions: Vec::new(),
            by_name: HashMap::new(),
        };

        // The virtual index aggregates section indexes, so it is resolved
        // after all of them are known
        let mut deferred = Vec::new();

        for (position, definition_config) in config.definitions.iter().enumerate() {
            match store.build_definition(position, definition_config, &registry) {
                Ok(definition) if definition.index_type == IndexType::All => {
                    deferred.push(definition);
                }
                Ok(definition) => store.register(definition, error_reporter.as_ref()),
                Err(e) => Self::report_invalid(position, &e, error_reporter.as_ref()),
            }
        }

        for definition in deferred {
            let aggregated = store.aggregate_sections(definition);
            store.register(aggregated, error_reporter.as_ref());
        }

        tracing::info!(
            num_definitions = store.definitions.len(),
            index_prefix = %store.index_prefix,
            "Loaded search index definitions",
        );

        store
    }

    fn report_invalid(position: usize, error: &ConfigurationError, error_reporter: &dyn ErrorReporter) {
        tracing::error!(
            position,
            error = ?error,
            error_msg = %error,
            "Skipping invalid search index definition",
        );
        error_reporter.report(
            ErrorReport::error(format!("Invalid search index definition: {error}"))
                .with_context("position", position),
        );
    }

    fn register(&mut self, definition: IndexDefinition, error_reporter: &dyn ErrorReporter) {
        if self.by_name.contains_key(&definition.name) {
            let error = ConfigurationError::DuplicateIndexName {
                index_name: definition.name.clone(),
            };
            tracing::error!(error_msg = %error, "Skipping duplicate search index definition");
            error_reporter.report(
                ErrorReport::error(format!("Invalid search index definition: {error}"))
                    .with_context("index_name", &definition.name),
            );
            return;
        }

        self.by_name
            .insert(definition.name.clone(), self.definitions.len());
        self.definitions.push(Arc::new(definition));
    }

    fn build_definition(
        &self,
        position: usize,
        cfg: &IndexDefinitionConfig,
        registry: &StrategyRegistry<'_>,
    ) -> Result<IndexDefinition, ConfigurationError> {
        let missing = |property| ConfigurationError::MissingProperty { position, property };

        let raw_type = non_blank(cfg.index_type.as_deref()).ok_or_else(|| missing("type"))?;
        let search_handler =
            non_blank(cfg.search_handler.as_deref()).ok_or_else(|| missing("search_handler"))?;
        let raw_name = non_blank(cfg.name.as_deref()).ok_or_else(|| missing("name"))?;

        let name = normalize_index_name(raw_name, &self.index_prefix);

        let index_type =
            IndexType::from_str(raw_type).map_err(|_| ConfigurationError::UnknownIndexType {
                index_name: name.clone(),
                value: raw_type.to_string(),
            })?;

        let mut field_transformers = IndexMap::new();
        for (field, transformer_name) in &cfg.field_transformers {
            let transformer = registry.field_transformer(transformer_name).ok_or_else(|| {
                ConfigurationError::UnknownFieldTransformer {
                    index_name: name.clone(),
                    field: field.clone(),
                    transformer: transformer_name.clone(),
                }
            })?;
            field_transformers.insert(field.clone(), transformer);
        }

        let mut modifiers = Vec::new();
        if let Some(modifier_name) = non_blank(cfg.eager_loads.modifier.as_deref()) {
            let modifier = registry.eager_load_modifier(modifier_name).ok_or_else(|| {
                ConfigurationError::UnknownEagerLoadModifier {
                    index_name: name.clone(),
                    modifier: modifier_name.to_string(),
                }
            })?;
            modifiers.push(modifier);
        }

        let field_mapping =
            merge_field_mapping(self.global.field_mapping.for_type(index_type), &cfg.field_mapping);

        for field in field_transformers.keys() {
            if !field_mapping.contains_key(field) {
                tracing::warn!(
                    index_name = %name,
                    field,
                    "Field transformer is bound to a field missing from the mapping and will not run",
                );
            }
        }

        let mut field_boosts = self.global.field_boosts.clone();
        field_boosts.extend(cfg.field_boosts.iter().map(|(k, v)| (k.clone(), *v)));

        Ok(IndexDefinition {
            index_type,
            physical_name: physical_index_name(&name, &self.index_prefix),
            label: non_blank(cfg.label.as_deref())
                .unwrap_or(raw_name)
                .to_string(),
            name,
            search_handler: search_handler.to_string(),
            section_handles: cfg.sections.clone(),
            field_mapping,
            index_settings: merge_settings(
                self.global.index_settings.as_ref(),
                cfg.index_settings.as_ref(),
            ),
            match_fields: cfg.match_fields.clone(),
            field_boosts,
            eager_loads: EagerLoadSpec {
                fields: cfg.eager_loads.fields.clone(),
                modifiers,
            },
            auto_index: cfg.auto_index,
            field_transformers,
        })
    }

    /// Folds every section index into the virtual one. Its own modifier is
    /// applied after all section modifiers.
    fn aggregate_sections(&self, mut all: IndexDefinition) -> IndexDefinition {
        let own_modifiers = std::mem::take(&mut all.eager_loads.modifiers);

        for section in self
            .definitions
            .iter()
            .filter(|d| d.index_type == IndexType::Section)
        {
            for field in &section.match_fields {
                if !all.match_fields.contains(field) {
                    all.match_fields.push(field.clone());
                }
            }
            for field in &section.eager_loads.fields {
                if !all.eager_loads.fields.contains(field) {
                    all.eager_loads.fields.push(field.clone());
                }
            }
            for handle in &section.section_handles {
                if !all.section_handles.contains(handle) {
                    all.section_handles.push(handle.clone());
                }
            }
            all.eager_loads
                .modifiers
                .extend(section.eager_loads.modifiers.iter().cloned());
        }

        all.eager_loads.modifiers.extend(own_modifiers);
        all
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl IndexDefinitionStore for IndexDefinitionStoreImpl {
    fn normalize_name(&self, name: &str) -> String {
        normalize_index_name(name, &self.index_prefix)
    }

    fn get_by_name(&self, name: &str, normalize: bool) -> Option<Arc<IndexDefinition>> {
        let key = if normalize {
            self.normalize_name(name)
        } else {
            name.to_string()
        };

        self.by_name
            .get(&key)
            .map(|idx| Arc::clone(&self.definitions[*idx]))
    }

    fn get_by_section_handle(&self, section_handle: &str) -> Option<Arc<IndexDefinition>> {
        self.definitions
            .iter()
            .find(|d| {
                d.index_type == IndexType::Section
                    && d.section_handles.iter().any(|h| h == section_handle)
            })
            .cloned()
    }

    fn all_section_index_names(&self) -> Vec<String> {
        self.definitions
            .iter()
            .filter(|d| d.index_type == IndexType::Section)
            .map(|d| d.physical_name.clone())
            .collect()
    }

    fn definitions(&self) -> Vec<Arc<IndexDefinition>> {
        self.definitions.clone()
    }

    fn global_field_mapping(&self, index_type: IndexType) -> FieldMapping {
        self.global.field_mapping.for_type(index_type).clone()
    }

    fn global_field_boosts(&self) -> BTreeMap<String, f64> {
        self.global.field_boosts.clone()
    }

    fn global_index_settings(&self) -> serde_json::Value {
        self.global
            .index_settings
            .clone()
            .unwrap_or_else(|| serde_json::json!({}))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Overlays per-index declarations on the global ones. Entries that end up
/// empty or falsy are dropped, which lets an index opt out of a global field.
pub fn merge_field_mapping(global: &FieldMapping, local: &FieldMapping) -> FieldMapping {
    let mut merged = global.clone();
    merged.extend(local.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged.retain(|_, declaration| !is_falsy(declaration));
    merged
}

fn merge_settings(
    global: Option<&serde_json::Value>,
    local: Option<&serde_json::Value>,
) -> serde_json::Value {
    let mut merged = serde_json::Map::new();
    for settings in [global, local].into_iter().flatten() {
        if let serde_json::Value::Object(entries) = settings {
            merged.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    serde_json::Value::Object(merged)
}

fn is_falsy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        serde_json::Value::String(s) => s.is_empty() || s == "0",
        serde_json::Value::Array(a) => a.is_empty(),
        serde_json::Value::Object(o) => o.is_empty(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
