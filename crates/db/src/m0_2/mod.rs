mod cycle_user_start_idx;
mod diary_user_date_idx;
mod meal_food_meal_idx;
mod meal_user_date_idx;
mod schedule_series_idx;
mod schedule_user_date_idx;
mod stopwatch_user_date_idx;
mod todo_series_idx;
mod todo_user_date_idx;
mod user_email_idx;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "oneday",
    "m0_2",
    vec_box![crate::m0_1::Migration],
    vec_box![
        user_email_idx::Operation,
        schedule_user_date_idx::Operation,
        schedule_series_idx::Operation,
        todo_user_date_idx::Operation,
        todo_series_idx::Operation,
        diary_user_date_idx::Operation,
        meal_user_date_idx::Operation,
        meal_food_meal_idx::Operation,
        stopwatch_user_date_idx::Operation,
        cycle_user_start_idx::Operation
    ]
);
