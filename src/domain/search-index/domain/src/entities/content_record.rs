// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn as_document_id(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Raw value of a content field as produced by the content store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContentValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<FixedOffset>),
    RichText {
        html: String,
    },
    Category {
        slug: String,
        level: u32,
    },
    /// Relation to other content records. Needs an explicit field transformer
    /// to be indexed.
    ElementCollection(Vec<RecordId>),
    /// Handle of a section or entry type
    Handle(String),
    List(Vec<ContentValue>),
    Map(BTreeMap<String, ContentValue>),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: RecordId,
    pub section_handle: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub fields: BTreeMap<String, ContentValue>,
}

fn default_enabled() -> bool {
    true
}

impl ContentRecord {
    pub fn new(id: impl Into<RecordId>, section_handle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            section_handle: section_handle.into(),
            title: String::new(),
            enabled: true,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: ContentValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Looks up a field by name. Custom fields shadow the built-in
    /// attributes (`id`, `title`, `section`, `enabled`).
    pub fn attribute(&self, name: &str) -> Option<ContentValue> {
        if let Some(value) = self.fields.get(name) {
            return Some(value.clone());
        }

        match name {
            "id" => i64::try_from(self.id.0).ok().map(ContentValue::Int),
            "title" => Some(ContentValue::String(self.title.clone())),
            "section" => Some(ContentValue::Handle(self.section_handle.clone())),
            "enabled" => Some(ContentValue::Bool(self.enabled)),
            _ => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
