use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Schedule;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Schedule::Table)
        .col(
            ColumnDef::new(Schedule::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Schedule::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(Schedule::SeriesId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(Schedule::Date).string().not_null().string_len(10))
        .col(
            ColumnDef::new(Schedule::Title)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(ColumnDef::new(Schedule::Time).string().null().string_len(5))
        .col(ColumnDef::new(Schedule::Category).string().null().string_len(30))
        .col(ColumnDef::new(Schedule::Color).string().null().string_len(7))
        .col(
            ColumnDef::new(Schedule::Reminder)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Schedule::Completed)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(Schedule::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Schedule::Table).to_owned()
}

sqlite_operation!(Operation);
