// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cms_search::{RecordId, RefreshPolicy, UpdateJobArgs};
use dill::Catalog;

use crate::cli;
use crate::commands::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn get_command(catalog: &Catalog, command: cli::Command) -> Result<Box<dyn Command>, CLIError> {
    let command: Box<dyn Command> = match command {
        cli::Command::Index(c) => Box::new(IndexCommand::new(
            catalog.get_one()?,
            catalog.get_one()?,
            c.action,
            c.index,
        )),

        cli::Command::Reindex(c) => {
            let args = UpdateJobArgs {
                index_name: c.index.clone(),
                record_ids: c.record_ids(),
                delete_index_first: c.delete_first,
                refresh_policy: if c.refresh {
                    RefreshPolicy::Immediate
                } else {
                    RefreshPolicy::None
                },
                include_disabled_related: c.include_disabled_related,
            };

            Box::new(ReindexCommand::new(
                catalog.get_one()?,
                catalog.get_one()?,
                catalog.get_one()?,
                catalog.get_one()?,
                catalog.get_one()?,
                catalog.get_one()?,
                catalog.get_one()?,
                c.content,
                args,
                c.background,
            ))
        }

        cli::Command::Delete(c) => Box::new(DeleteCommand::new(
            catalog.get_one()?,
            catalog.get_one()?,
            c.index,
            RecordId(c.id),
            c.refresh,
        )),

        cli::Command::Status(c) => Box::new(StatusCommand::new(
            catalog.get_one()?,
            catalog.get_one()?,
            catalog.get_one()?,
            c.index,
        )),

        cli::Command::List(c) => Box::new(ListCommand::new(catalog.get_one()?, c.wide)),
    };

    Ok(command)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
