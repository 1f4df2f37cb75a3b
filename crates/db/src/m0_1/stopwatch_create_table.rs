use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::StopwatchRecord;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(StopwatchRecord::Table)
        .col(
            ColumnDef::new(StopwatchRecord::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(StopwatchRecord::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(StopwatchRecord::Date)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(StopwatchRecord::Task)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(StopwatchRecord::Category)
                .string()
                .null()
                .string_len(30),
        )
        .col(
            ColumnDef::new(StopwatchRecord::StartedAt)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(StopwatchRecord::EndedAt).big_integer().not_null())
        .col(
            ColumnDef::new(StopwatchRecord::DurationSecs)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(StopwatchRecord::Table).to_owned()
}

sqlite_operation!(Operation);
