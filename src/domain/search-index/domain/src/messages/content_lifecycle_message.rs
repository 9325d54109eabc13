// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::RecordId;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Represents content store events that affect search indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentLifecycleMessage {
    /// A record was created or updated
    Saved(ContentLifecycleMessageSaved),

    /// A record is about to be deleted
    Deleting(ContentLifecycleMessageDeleting),
}

impl ContentLifecycleMessage {
    pub fn saved(record_id: impl Into<RecordId>, section_handle: impl Into<String>) -> Self {
        Self::Saved(ContentLifecycleMessageSaved {
            record_id: record_id.into(),
            section_handle: section_handle.into(),
        })
    }

    pub fn deleting(record_id: impl Into<RecordId>, section_handle: impl Into<String>) -> Self {
        Self::Deleting(ContentLifecycleMessageDeleting {
            record_id: record_id.into(),
            section_handle: section_handle.into(),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLifecycleMessageSaved {
    pub record_id: RecordId,
    pub section_handle: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLifecycleMessageDeleting {
    pub record_id: RecordId,
    pub section_handle: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
