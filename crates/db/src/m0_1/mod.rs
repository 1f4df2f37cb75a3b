mod cycle_create_table;
mod diary_create_table;
mod meal_create_table;
mod meal_food_create_table;
mod schedule_create_table;
mod schedule_template_create_table;
mod step_create_table;
mod stopwatch_create_table;
mod todo_create_table;
mod user_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "oneday",
    "m0_1",
    vec_box![],
    vec_box![
        user_create_table::Operation,
        schedule_create_table::Operation,
        schedule_template_create_table::Operation,
        todo_create_table::Operation,
        diary_create_table::Operation,
        meal_create_table::Operation,
        meal_food_create_table::Operation,
        stopwatch_create_table::Operation,
        cycle_create_table::Operation,
        step_create_table::Operation
    ]
);
