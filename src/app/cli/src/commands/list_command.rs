// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use cms_search::{IndexDefinition, IndexDefinitionStore};

use super::{CLIError, Command};
use crate::output::{add_table_row, new_table};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ListCommand {
    index_definition_store: Arc<dyn IndexDefinitionStore>,
    wide: bool,
}

impl ListCommand {
    pub fn new(index_definition_store: Arc<dyn IndexDefinitionStore>, wide: bool) -> Self {
        Self {
            index_definition_store,
            wide,
        }
    }

    pub fn header(&self) -> Vec<&'static str> {
        let mut header = vec!["Name", "Type", "Physical name", "Handler", "Sections", "Auto"];
        if self.wide {
            header.extend(["Fields", "Eager loads"]);
        }
        header
    }

    pub fn row(&self, definition: &IndexDefinition) -> Vec<String> {
        let sections = if definition.covers_all_sections() {
            "*".to_string()
        } else {
            definition.section_handles.join(", ")
        };

        let mut row = vec![
            definition.name.clone(),
            definition.index_type.to_string(),
            self.index_definition_store.search_target(definition),
            definition.search_handler.clone(),
            sections,
            if definition.auto_index { "yes" } else { "no" }.to_string(),
        ];

        if self.wide {
            row.push(
                definition
                    .field_mapping
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            row.push(
                definition
                    .eager_loads
                    .fields
                    .iter()
                    .cloned()
                    .chain(
                        definition
                            .eager_loads
                            .modifiers
                            .iter()
                            .map(|m| format!("+{}", m.name())),
                    )
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }

        row
    }
}

#[async_trait::async_trait(?Send)]
impl Command for ListCommand {
    async fn run(&mut self) -> Result<(), CLIError> {
        let definitions = self.index_definition_store.definitions();
        if definitions.is_empty() {
            eprintln!("{}", console::style("No indexes configured").yellow());
            return Ok(());
        }

        let mut table = new_table(&self.header());
        for definition in &definitions {
            add_table_row(&mut table, &self.row(definition));
        }
        table.printstd();

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
