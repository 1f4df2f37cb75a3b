use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Todo;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Todo::Table)
        .col(
            ColumnDef::new(Todo::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Todo::UserId).string().not_null().string_len(26))
        .col(
            ColumnDef::new(Todo::SeriesId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(Todo::Date).string().not_null().string_len(10))
        .col(ColumnDef::new(Todo::Title).string().not_null().string_len(100))
        .col(ColumnDef::new(Todo::Category).string().null().string_len(30))
        .col(ColumnDef::new(Todo::Color).string().null().string_len(7))
        .col(
            ColumnDef::new(Todo::Completed)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(Todo::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Todo::Table).to_owned()
}

sqlite_operation!(Operation);
