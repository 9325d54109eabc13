// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use prettytable::{Cell, Row, Table};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn get_table_format() -> prettytable::format::TableFormat {
    use prettytable::format::*;

    FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(&[LinePosition::Top], LineSeparator::new('─', '┬', '┌', '┐'))
        .separators(
            &[LinePosition::Title],
            LineSeparator::new('─', '┼', '├', '┤'),
        )
        .separators(
            &[LinePosition::Bottom],
            LineSeparator::new('─', '┴', '└', '┘'),
        )
        .padding(1, 1)
        .build()
}

/// Table with a bold centered header row
pub fn new_table<S: AsRef<str>>(header: &[S]) -> Table {
    let mut table = Table::new();
    table.set_format(get_table_format());
    table.set_titles(Row::new(
        header
            .iter()
            .map(|title| Cell::new(title.as_ref()).style_spec("bc"))
            .collect(),
    ));
    table
}

pub fn add_table_row<S: AsRef<str>>(table: &mut Table, values: &[S]) {
    table.add_row(Row::new(
        values.iter().map(|v| Cell::new(v.as_ref())).collect(),
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
