use sea_query::{ColumnDef, Index, Table, TableCreateStatement, TableDropStatement};

use crate::table::DailyStep;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(DailyStep::Table)
        .col(
            ColumnDef::new(DailyStep::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(DailyStep::Date).string().not_null().string_len(10))
        .col(ColumnDef::new(DailyStep::Steps).big_integer().not_null())
        .col(ColumnDef::new(DailyStep::UpdatedAt).big_integer().not_null())
        .primary_key(Index::create().col(DailyStep::UserId).col(DailyStep::Date))
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(DailyStep::Table).to_owned()
}

sqlite_operation!(Operation);
