use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::ScheduleTemplate;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(ScheduleTemplate::Table)
        .col(
            ColumnDef::new(ScheduleTemplate::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ScheduleTemplate::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(ScheduleTemplate::Title)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(ScheduleTemplate::Time)
                .string()
                .null()
                .string_len(5),
        )
        .col(
            ColumnDef::new(ScheduleTemplate::Category)
                .string()
                .null()
                .string_len(30),
        )
        .col(
            ColumnDef::new(ScheduleTemplate::Color)
                .string()
                .null()
                .string_len(7),
        )
        .col(
            ColumnDef::new(ScheduleTemplate::Reminder)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(ScheduleTemplate::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(ScheduleTemplate::Table).to_owned()
}

sqlite_operation!(Operation);
