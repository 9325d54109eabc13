// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use cms_search::{MaintenanceConfig, SearchIndexesConfig, SearchJobsConfig};
use cms_search_elasticsearch::ElasticsearchConfig;
use serde::Deserialize;

use crate::CLIError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CLIConfig {
    /// Search engine connection. Commands run against a throwaway in-memory
    /// engine when it is absent.
    pub elasticsearch: Option<ElasticsearchConfig>,

    /// Index definitions and global defaults
    pub indexes: SearchIndexesConfig,

    /// Maintenance lock timings
    pub maintenance: MaintenanceConfig,

    /// Retry policies of queued jobs
    pub jobs: SearchJobsConfig,
}

impl CLIConfig {
    pub fn load(path: &Path) -> Result<Self, CLIError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CLIError::usage_error_with_source(
                format!("Unable to read config file {}", path.display()),
                e,
            )
        })?;

        Self::from_yaml(&text).map_err(|e| {
            CLIError::usage_error_with_source(
                format!("Invalid config file {}", path.display()),
                e,
            )
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
