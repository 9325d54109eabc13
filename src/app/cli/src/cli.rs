// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use cms_search::RecordId;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Administers CMS search indexes and reconciles them with the content store
#[derive(Debug, clap::Parser)]
#[command(name = crate::BINARY_NAME, version = crate::VERSION)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(
        long,
        global = true,
        env = "SEARCHCTL_CONFIG",
        default_value = "searchctl.yaml"
    )]
    pub config: PathBuf,

    /// Sets the level of verbosity (repeat for more)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    Index(Index),
    Reindex(Reindex),
    Delete(Delete),
    Status(Status),
    List(List),
}

/// Runs a structural action on an index under its maintenance lock
#[derive(Debug, clap::Args)]
pub struct Index {
    /// One of: create, update-mapping, update-settings, delete
    #[arg(value_name = "ACTION")]
    pub action: String,

    /// Logical or physical index name
    #[arg(value_name = "INDEX")]
    pub index: String,
}

/// Reconciles an index with records from a content export
#[derive(Debug, clap::Args)]
pub struct Reindex {
    /// Logical or physical index name
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// JSON file with an array of content records
    #[arg(long, value_name = "FILE")]
    pub content: PathBuf,

    /// Only reconcile these records
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<u64>,

    /// Drop the physical index before rebuilding it
    #[arg(long)]
    pub delete_first: bool,

    /// Make every write visible to searches immediately
    #[arg(long)]
    pub refresh: bool,

    /// Keep disabled records in eager-loaded relations
    #[arg(long)]
    pub include_disabled_related: bool,

    /// Run through the job queue with retries instead of directly
    #[arg(long)]
    pub background: bool,
}

impl Reindex {
    pub fn record_ids(&self) -> Option<Vec<RecordId>> {
        if self.ids.is_empty() {
            None
        } else {
            Some(self.ids.iter().copied().map(RecordId).collect())
        }
    }
}

/// Removes a record from its index and every auto-indexed suggest index
#[derive(Debug, clap::Args)]
pub struct Delete {
    /// Logical or physical index name
    #[arg(value_name = "INDEX")]
    pub index: String,

    #[arg(value_name = "ID")]
    pub id: u64,

    /// Make the removal visible to searches immediately
    #[arg(long)]
    pub refresh: bool,
}

/// Shows whether an index exists, its document count and maintenance state
#[derive(Debug, clap::Args)]
pub struct Status {
    /// Logical or physical index name
    #[arg(value_name = "INDEX")]
    pub index: String,
}

/// Lists configured index definitions
#[derive(Debug, clap::Args)]
pub struct List {
    /// Show mapped fields and eager loads too
    #[arg(short = 'w', long)]
    pub wide: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
