use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Meal, MealFood};

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(MealFood::Table)
        .col(
            ColumnDef::new(MealFood::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(MealFood::MealId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(MealFood::Name).string().not_null().string_len(100))
        .col(ColumnDef::new(MealFood::Grams).double().not_null().default(0.0))
        .col(ColumnDef::new(MealFood::Calories).double().not_null().default(0.0))
        .col(ColumnDef::new(MealFood::Carbs).double().not_null().default(0.0))
        .col(ColumnDef::new(MealFood::Protein).double().not_null().default(0.0))
        .col(ColumnDef::new(MealFood::Fat).double().not_null().default(0.0))
        .col(ColumnDef::new(MealFood::Position).integer().not_null().default(0))
        .foreign_key(
            ForeignKey::create()
                .from(MealFood::Table, MealFood::MealId)
                .to(Meal::Table, Meal::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(MealFood::Table).to_owned()
}

sqlite_operation!(Operation);
