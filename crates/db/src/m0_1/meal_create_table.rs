use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Meal;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Meal::Table)
        .col(
            ColumnDef::new(Meal::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Meal::UserId).string().not_null().string_len(26))
        .col(ColumnDef::new(Meal::Date).string().not_null().string_len(10))
        .col(ColumnDef::new(Meal::MealType).string().not_null().string_len(15))
        .col(ColumnDef::new(Meal::Position).integer().not_null().default(0))
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Meal::Table).to_owned()
}

sqlite_operation!(Operation);
