use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::MealFood;

fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_meal_food_meal")
        .table(MealFood::Table)
        .col(MealFood::MealId)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop().name("idx_meal_food_meal").table(MealFood::Table).to_owned()
}

sqlite_operation!(Operation);
