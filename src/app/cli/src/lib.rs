// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod app;
pub mod cli;
mod cli_commands;
pub mod commands;
pub mod config;
mod content_export;
mod error;
pub mod output;

pub use app::*;
pub use cli_commands::*;
pub use content_export::*;
pub use error::*;
