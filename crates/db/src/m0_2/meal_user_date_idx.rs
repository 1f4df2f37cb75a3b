use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::Meal;

fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_meal_user_date")
        .table(Meal::Table)
        .col(Meal::UserId)
        .col(Meal::Date)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop().name("idx_meal_user_date").table(Meal::Table).to_owned()
}

sqlite_operation!(Operation);
