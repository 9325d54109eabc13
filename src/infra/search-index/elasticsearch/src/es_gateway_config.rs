// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;
use url::Url;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_ELASTICSEARCH_USERNAME: &str = "elastic";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElasticsearchConfig {
    pub url: Url,

    #[serde(default)]
    pub username: Option<String>,

    /// Basic authentication is used only when a password is set
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "ElasticsearchConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ElasticsearchConfig {
    fn default_timeout_secs() -> u64 {
        30
    }

    pub fn new(url: Url) -> Self {
        Self {
            url,
            username: None,
            password: None,
            timeout_secs: Self::default_timeout_secs(),
        }
    }

    pub fn username(&self) -> &str {
        self.username
            .as_deref()
            .unwrap_or(DEFAULT_ELASTICSEARCH_USERNAME)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
