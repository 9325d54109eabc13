// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Problems with index definitions or job arguments. Retrying cannot fix
/// these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Index definition #{position} is missing required property '{property}'")]
    MissingProperty {
        position: usize,
        property: &'static str,
    },

    #[error("Index '{index_name}' has unknown type '{value}'")]
    UnknownIndexType { index_name: String, value: String },

    #[error("Index '{index_name}' binds field '{field}' to unknown transformer '{transformer}'")]
    UnknownFieldTransformer {
        index_name: String,
        field: String,
        transformer: String,
    },

    #[error("Index '{index_name}' refers to unknown eager-load modifier '{modifier}'")]
    UnknownEagerLoadModifier {
        index_name: String,
        modifier: String,
    },

    #[error("Index '{index_name}' is defined more than once")]
    DuplicateIndexName { index_name: String },

    #[error("Index '{index_name}' is not defined")]
    IndexNotFound { index_name: String },

    #[error("Index '{index_name}' is virtual and cannot be targeted directly")]
    VirtualIndex { index_name: String },

    #[error("Search handler '{handler}' is not registered")]
    UnknownSearchHandler { handler: String },

    #[error(transparent)]
    UnknownAdminAction(#[from] UnknownAdminActionError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Index action '{action}' is not allowed")]
pub struct UnknownAdminActionError {
    pub action: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
