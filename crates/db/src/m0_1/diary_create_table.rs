use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Diary;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Diary::Table)
        .col(
            ColumnDef::new(Diary::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Diary::UserId).string().not_null().string_len(26))
        .col(ColumnDef::new(Diary::Date).string().not_null().string_len(10))
        .col(ColumnDef::new(Diary::Title).string().not_null().string_len(100))
        .col(
            ColumnDef::new(Diary::Content)
                .string()
                .not_null()
                .string_len(10000)
                .default(""),
        )
        .col(ColumnDef::new(Diary::CanvasPath).string().null())
        .col(ColumnDef::new(Diary::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Diary::UpdatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Diary::Table).to_owned()
}

sqlite_operation!(Operation);
