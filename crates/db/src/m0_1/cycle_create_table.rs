use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::MenstrualCycle;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(MenstrualCycle::Table)
        .col(
            ColumnDef::new(MenstrualCycle::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(MenstrualCycle::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(MenstrualCycle::StartDate)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(MenstrualCycle::EndDate)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(MenstrualCycle::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(MenstrualCycle::Table).to_owned()
}

sqlite_operation!(Operation);
